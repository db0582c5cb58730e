use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use kkuldanji_application::notices::{
    CHAT_INPUT_PLACEHOLDER, GENERATION_FAILED_ALERT, ROOMS_INPUT_PLACEHOLDER,
};
use kkuldanji_application::{HandoverUseCase, SendOutcome, ViewMode, build_usecase};
use kkuldanji_core::auth::{Credentials, LOGIN_REQUIRED_NOTICE};
use kkuldanji_core::error::HandoverError;
use kkuldanji_infrastructure::KkuldanjiPaths;

mod command;
mod form_view;
mod helper;
mod render;

use command::Command;
use helper::CliHelper;

type Repl = Editor<CliHelper, DefaultHistory>;

#[derive(Parser)]
#[command(name = "kkuldanji")]
#[command(about = "꿀단지 - AI handover report assistant", long_about = None)]
struct Cli {
    /// Use this directory instead of the platform config directory
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Mirror logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// What the REPL loop should do after a command.
enum Flow {
    Continue,
    Logout,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = KkuldanjiPaths::new(cli.config_dir.as_deref())?;
    let _log_guard = init_logging(&paths, cli.verbose)?;

    let usecase = match build_usecase(&paths).await {
        Ok((usecase, _config)) => Arc::new(usecase),
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            return Err(e.into());
        }
    };

    let mut rl: Repl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== 꿀단지 인수인계 도우미 ===".bright_yellow().bold());

    loop {
        if !login(&mut rl, &usecase).await {
            break;
        }
        let view = form_view::spawn(&usecase).await;
        let flow = repl(&mut rl, &usecase).await;
        view.abort();
        match flow {
            Flow::Logout => {
                usecase.logout().await;
                println!("{}", "로그아웃되었습니다.".bright_black());
            }
            Flow::Quit | Flow::Continue => break,
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

fn init_logging(paths: &KkuldanjiPaths, verbose: bool) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir();
    std::fs::create_dir_all(&logs_dir)?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "kkuldanji.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env("KKULDANJI_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = verbose.then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(stderr_layer)
        .init();

    tracing::info!("[Cli] Logging to {}", logs_dir.display());
    Ok(guard)
}

/// Prompts until both fields are filled. Returns false on Ctrl-D / Ctrl-C.
async fn login(rl: &mut Repl, usecase: &HandoverUseCase) -> bool {
    println!("{}", "로그인".bold());
    loop {
        let Ok(user_id) = rl.readline("아이디: ") else {
            return false;
        };
        let Ok(password) = rl.readline("비밀번호: ") else {
            return false;
        };

        match usecase.login(&Credentials::new(user_id, password)).await {
            Ok(()) => {
                println!("{}", "환영합니다! /help 로 명령어를 확인하세요.".bright_green());
                println!();
                print_lines(render::tab_view(&usecase.render_active_tab().await));
                println!("{}", CHAT_INPUT_PLACEHOLDER.bright_black());
                return true;
            }
            Err(_) => println!("{}", LOGIN_REQUIRED_NOTICE.yellow()),
        }
    }
}

async fn repl(rl: &mut Repl, usecase: &Arc<HandoverUseCase>) -> Flow {
    loop {
        let prompt = match usecase.view_mode().await {
            ViewMode::Chat => "꿀단지> ",
            ViewMode::Rooms => "채팅방> ",
        };

        match rl.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                let flow = match Command::parse(&line) {
                    Ok(command) => dispatch(usecase, command).await,
                    Err(usage) => {
                        println!("{}", usage.yellow());
                        Flow::Continue
                    }
                };
                if !matches!(flow, Flow::Continue) {
                    return flow;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => return Flow::Quit,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                return Flow::Quit;
            }
        }
    }
}

async fn dispatch(usecase: &Arc<HandoverUseCase>, command: Command) -> Flow {
    match command {
        Command::Empty => {}
        Command::Quit => return Flow::Quit,
        Command::Logout => return Flow::Logout,
        Command::Help => print_lines(render::help()),
        Command::Say(text) => send_in_background(usecase, text).await,
        Command::Generate => generate_in_background(usecase),
        Command::Cancel => match usecase.cancel().await {
            Some(kind) => system(&format!("진행 중인 요청을 취소했습니다 ({kind}).")),
            None => system("진행 중인 요청이 없습니다."),
        },
        Command::Upload(paths) => match usecase.upload_files(&paths).await {
            Ok(files) => {
                system(&format!("{}개 파일을 추가했습니다.", files.len()));
                print_lines(render::file_list(&usecase.files().await));
            }
            Err(e) => error(&e),
        },
        Command::Files => print_lines(render::file_list(&usecase.files().await)),
        Command::Remove(index) => {
            let files = usecase.files().await;
            match files.get(index) {
                Some(file) => match usecase.remove_file(&file.id).await {
                    Ok(removed) => system(&format!("{} 삭제됨", removed.name)),
                    Err(e) => error(&e),
                },
                None => system("해당 번호의 파일이 없습니다."),
            }
        }
        Command::NewChat => {
            if let Some(session) = usecase.start_new_chat().await {
                system(&format!("'{}' 대화를 저장했습니다.", session.title));
            }
            system("새 대화를 시작합니다.");
        }
        Command::Rooms => {
            usecase.set_view_mode(ViewMode::Rooms).await;
            print_lines(render::room_list(&usecase.saved_sessions().await));
            println!("{}", ROOMS_INPUT_PLACEHOLDER.bright_black());
        }
        Command::Chat => {
            usecase.set_view_mode(ViewMode::Chat).await;
            print_chat(usecase).await;
        }
        Command::Load(index) => {
            let sessions = usecase.saved_sessions().await;
            match sessions.get(index) {
                Some(session) => match usecase.load_session(&session.id).await {
                    Ok(_) => print_chat(usecase).await,
                    Err(e) => error(&e),
                },
                None => system("해당 번호의 채팅방이 없습니다."),
            }
        }
        Command::Tab(tab) => {
            usecase.select_tab(tab).await;
            show_tab(usecase).await;
        }
        Command::Show => show_tab(usecase).await,
        Command::Edit { path, value } => match usecase.edit_field(&path, &value).await {
            Ok(changed) => report_edit(changed),
            Err(e) => error(&e),
        },
        Command::Add(list) => report_edit(usecase.add_item(list).await),
        Command::Del { list, index } => report_edit(usecase.remove_item(list, index).await),
        Command::Check(index) => report_edit(usecase.toggle_checklist(index).await),
        Command::Progress { index, value } => {
            report_edit(usecase.set_progress(index, &value).await)
        }
        Command::Print { scope, file } => match file {
            Some(path) => match usecase.export_to_file(scope, &path).await {
                Ok(()) => system(&format!("{} 에 저장했습니다.", path.display())),
                Err(e) => error(&e),
            },
            None => println!("{}", usecase.export_text(scope).await),
        },
    }
    Flow::Continue
}

/// Sends a chat message without blocking the prompt.
async fn send_in_background(usecase: &Arc<HandoverUseCase>, text: String) {
    if usecase.view_mode().await == ViewMode::Rooms {
        println!("{}", ROOMS_INPUT_PLACEHOLDER.yellow());
        return;
    }

    let usecase = Arc::clone(usecase);
    tokio::spawn(async move {
        match usecase.send_message(&text).await {
            Ok(SendOutcome::Replied(message)) | Ok(SendOutcome::Fallback(message)) => {
                print_lines(render::message(&message));
            }
            Ok(SendOutcome::Blank) | Ok(SendOutcome::RoomsView) => {}
            Err(e) => error(&e),
        }
    });
}

/// Generates the report without blocking the prompt.
fn generate_in_background(usecase: &Arc<HandoverUseCase>) {
    system("인수인계서를 생성하는 중입니다... (/cancel 로 취소)");

    let usecase = Arc::clone(usecase);
    tokio::spawn(async move {
        match usecase.generate_report().await {
            Ok(()) => {
                if let Some(confirmation) = usecase.messages().await.last() {
                    print_lines(render::message(confirmation));
                }
            }
            Err(e) if e.is_generation() => {
                println!("{}", GENERATION_FAILED_ALERT.red().bold());
            }
            Err(e) => error(&e),
        }
    });
}

async fn print_chat(usecase: &HandoverUseCase) {
    let messages = usecase.messages().await;
    if messages.is_empty() {
        println!("{}", CHAT_INPUT_PLACEHOLDER.bright_black());
    }
    for message in &messages {
        print_lines(render::message(message));
    }
}

async fn show_tab(usecase: &HandoverUseCase) {
    print_lines(render::tab_view(&usecase.render_active_tab().await));
}

/// Changed reports are redrawn by the form view.
fn report_edit(changed: bool) {
    if !changed {
        system("변경 사항이 없습니다.");
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

fn system(text: &str) {
    println!("{}", text.bright_black());
}

fn error(err: &HandoverError) {
    let text = match err {
        HandoverError::Busy => "이전 요청을 처리하는 중입니다. 잠시만 기다려 주세요.".to_string(),
        HandoverError::Cancelled => "요청이 취소되었습니다.".to_string(),
        HandoverError::Security(_) => LOGIN_REQUIRED_NOTICE.to_string(),
        other => other.to_string(),
    };
    eprintln!("{}", text.red());
}
