//! REPL input parsing.

use kkuldanji_application::ExportScope;
use kkuldanji_core::report::{FieldPath, ListField};
use kkuldanji_core::view::ReportTab;
use std::path::PathBuf;

/// Slash commands offered for completion, in help order.
pub const COMMANDS: &[&str] = &[
    "/upload", "/files", "/remove", "/generate", "/cancel", "/new", "/rooms", "/chat", "/load",
    "/tab", "/show", "/edit", "/add", "/del", "/check", "/progress", "/print", "/logout",
    "/help",
];

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Plain text sent to the chat.
    Say(String),
    Upload(Vec<PathBuf>),
    Files,
    /// 1-based position in the file list.
    Remove(usize),
    Generate,
    Cancel,
    NewChat,
    Rooms,
    Chat,
    /// 1-based position in the saved-session list.
    Load(usize),
    Tab(ReportTab),
    Show,
    Edit { path: String, value: String },
    Add(ListField),
    Del { list: ListField, index: usize },
    Check(usize),
    Progress { index: usize, value: String },
    Print { scope: ExportScope, file: Option<PathBuf> },
    Logout,
    Help,
    Quit,
    Empty,
}

impl Command {
    /// Parses a line. Errors carry a usage message.
    pub fn parse(line: &str) -> Result<Self, String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Command::Empty);
        }
        if trimmed == "quit" || trimmed == "exit" {
            return Ok(Command::Quit);
        }
        if !trimmed.starts_with('/') {
            return Ok(Command::Say(trimmed.to_string()));
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        match name {
            "/upload" => {
                // Quoted paths may contain spaces
                let files = shell_words::split(rest).map_err(|e| format!("/upload: {e}"))?;
                if files.is_empty() {
                    return Err("usage: /upload <file> [file...]".to_string());
                }
                Ok(Command::Upload(files.into_iter().map(PathBuf::from).collect()))
            }
            "/files" => Ok(Command::Files),
            "/remove" => position(&args, "usage: /remove <n>").map(Command::Remove),
            "/generate" => Ok(Command::Generate),
            "/cancel" => Ok(Command::Cancel),
            "/new" => Ok(Command::NewChat),
            "/rooms" => Ok(Command::Rooms),
            "/chat" => Ok(Command::Chat),
            "/load" => position(&args, "usage: /load <n>").map(Command::Load),
            "/tab" => {
                let raw = args.first().ok_or("usage: /tab <1-6|name>")?;
                raw.parse::<ReportTab>()
                    .map(Command::Tab)
                    .map_err(|_| format!("unknown tab: {raw}"))
            }
            "/show" => Ok(Command::Show),
            "/edit" => {
                let (path, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(path, value)| (path, value.trim()))
                    .unwrap_or((rest, ""));
                if path.is_empty() {
                    return Err("usage: /edit <path> <value>".to_string());
                }
                // "\n" in the value stands for a line break.
                Ok(Command::Edit {
                    path: path.to_string(),
                    value: value.replace("\\n", "\n"),
                })
            }
            "/add" => {
                let raw = args.first().ok_or("usage: /add <list>")?;
                list_field(raw).map(Command::Add)
            }
            "/del" => {
                let raw = args.first().ok_or("usage: /del <list> <n>")?;
                let list = list_field(raw)?;
                let index = position(&args[1..], "usage: /del <list> <n>")?;
                Ok(Command::Del { list, index })
            }
            "/check" => position(&args, "usage: /check <n>").map(Command::Check),
            "/progress" => {
                let index = position(&args, "usage: /progress <n> <0-100>")?;
                let value = args
                    .get(1)
                    .ok_or("usage: /progress <n> <0-100>")?
                    .to_string();
                Ok(Command::Progress { index, value })
            }
            "/print" => {
                let mut scope = ExportScope::ActiveTab;
                let mut file = None;
                for arg in args {
                    if arg == "all" {
                        scope = ExportScope::AllTabs;
                    } else {
                        file = Some(PathBuf::from(arg));
                    }
                }
                Ok(Command::Print { scope, file })
            }
            "/logout" => Ok(Command::Logout),
            "/help" => Ok(Command::Help),
            other => Err(format!("unknown command: {other} (try /help)")),
        }
    }
}

/// Parses a 1-based position into a 0-based index.
fn position(args: &[&str], usage: &str) -> Result<usize, String> {
    args.first()
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .map(|n| n - 1)
        .ok_or_else(|| usage.to_string())
}

fn list_field(raw: &str) -> Result<ListField, String> {
    FieldPath::parse(raw)
        .ok()
        .and_then(|path| ListField::from_path(&path))
        .ok_or_else(|| format!("not an editable list: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_chat() {
        assert_eq!(
            Command::parse("  인수인계 일정은? ").unwrap(),
            Command::Say("인수인계 일정은?".to_string())
        );
        assert_eq!(Command::parse("   ").unwrap(), Command::Empty);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_positions_are_one_based() {
        assert_eq!(Command::parse("/remove 2").unwrap(), Command::Remove(1));
        assert_eq!(Command::parse("/load 1").unwrap(), Command::Load(0));
        assert!(Command::parse("/remove 0").is_err());
        assert!(Command::parse("/remove x").is_err());
    }

    #[test]
    fn test_edit_keeps_spaces_and_line_breaks() {
        assert_eq!(
            Command::parse("/edit overview.reason 조직 개편\\n부서 이동").unwrap(),
            Command::Edit {
                path: "overview.reason".to_string(),
                value: "조직 개편\n부서 이동".to_string(),
            }
        );
        assert_eq!(
            Command::parse("/edit overview.reason").unwrap(),
            Command::Edit {
                path: "overview.reason".to_string(),
                value: String::new(),
            }
        );
        assert!(Command::parse("/edit").is_err());
    }

    #[test]
    fn test_list_commands() {
        assert_eq!(
            Command::parse("/add resources.docs").unwrap(),
            Command::Add(ListField::Docs)
        );
        assert_eq!(
            Command::parse("/del teamMembers 3").unwrap(),
            Command::Del {
                list: ListField::TeamMembers,
                index: 2
            }
        );
        assert!(Command::parse("/add overview.reason").is_err());
        assert_eq!(
            Command::parse("/progress 1 85").unwrap(),
            Command::Progress {
                index: 0,
                value: "85".to_string()
            }
        );
    }

    #[test]
    fn test_tab_and_print() {
        assert_eq!(
            Command::parse("/tab 4").unwrap(),
            Command::Tab(ReportTab::Status)
        );
        assert!(Command::parse("/tab 9").is_err());
        assert_eq!(
            Command::parse("/print all out.txt").unwrap(),
            Command::Print {
                scope: ExportScope::AllTabs,
                file: Some(PathBuf::from("out.txt")),
            }
        );
        assert_eq!(
            Command::parse("/print").unwrap(),
            Command::Print {
                scope: ExportScope::ActiveTab,
                file: None,
            }
        );
    }

    #[test]
    fn test_upload_accepts_quoted_paths() {
        assert_eq!(
            Command::parse(r#"/upload "업무 매뉴얼.pdf" 'my notes.txt' plain.md"#).unwrap(),
            Command::Upload(vec![
                PathBuf::from("업무 매뉴얼.pdf"),
                PathBuf::from("my notes.txt"),
                PathBuf::from("plain.md"),
            ])
        );
        assert_eq!(
            Command::parse(r"/upload my\ file.txt").unwrap(),
            Command::Upload(vec![PathBuf::from("my file.txt")])
        );
        assert!(Command::parse("/upload").is_err());
        assert!(Command::parse(r#"/upload "unterminated.txt"#).is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(Command::parse("/plan").unwrap_err().contains("/help"));
    }
}
