//! Colored terminal output for the sidebar, chat panel and report tabs.

use colored::Colorize;
use kkuldanji_application::notices::{NO_SAVED_SESSIONS, NO_SOURCES};
use kkuldanji_core::session::{ChatMessage, ChatSession};
use kkuldanji_core::source::{FileKind, SourceFile};
use kkuldanji_core::view::{
    FieldKind, RenderedField, ReportTab, SectionBody, TabView, progress_bar,
};
use strum::IntoEnumIterator;

pub fn file_list(files: &[SourceFile]) -> Vec<String> {
    if files.is_empty() {
        return vec![NO_SOURCES.bright_black().to_string()];
    }

    files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let kind = match file.kind() {
                FileKind::Image => "IMG".magenta(),
                FileKind::Document => "DOC".cyan(),
            };
            format!(
                "{:>2}. [{}] {} {}",
                i + 1,
                kind,
                file.name,
                file.type_label().bright_black()
            )
        })
        .collect()
}

pub fn message(message: &ChatMessage) -> Vec<String> {
    let time = chrono::DateTime::parse_from_rfc3339(&message.timestamp)
        .map(|at| at.with_timezone(&chrono::Local).format("%H:%M").to_string())
        .unwrap_or_default()
        .bright_black();
    if message.is_user() {
        let mut lines = vec![format!("{} {}", "나".green().bold(), time)];
        lines.extend(message.text.lines().map(|line| line.green().to_string()));
        lines
    } else {
        let mut lines = vec![format!("{} {}", "꿀단지".bright_yellow().bold(), time)];
        lines.extend(message.text.lines().map(|line| line.bright_blue().to_string()));
        lines
    }
}

pub fn room_list(sessions: &[ChatSession]) -> Vec<String> {
    if sessions.is_empty() {
        return vec![NO_SAVED_SESSIONS.bright_black().to_string()];
    }

    sessions
        .iter()
        .enumerate()
        .map(|(i, session)| {
            format!(
                "{:>2}. {} {}",
                i + 1,
                session.title,
                format!("({}개 메시지)", session.messages.len()).bright_black()
            )
        })
        .collect()
}

/// The tab strip with the active tab highlighted.
pub fn tab_strip(active: ReportTab) -> String {
    ReportTab::iter()
        .map(|tab| {
            if tab == active {
                format!("[{}]", tab.title()).bright_yellow().bold().to_string()
            } else {
                tab.title().bright_black().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn tab_view(view: &TabView) -> Vec<String> {
    let mut lines = vec![tab_strip(view.tab()), String::new()];

    let TabView::Filled { sections, .. } = view else {
        lines.push("아직 생성된 보고서가 없습니다.".bright_black().to_string());
        lines.push("/upload 로 자료를 올리고 /generate 로 보고서를 만드세요.".bright_black().to_string());
        return lines;
    };

    for section in sections {
        lines.push(format!("[{}]", section.title).cyan().bold().to_string());
        match &section.body {
            SectionBody::Fields(fields) => {
                for field in fields {
                    push_field(&mut lines, "  ", field);
                }
            }
            SectionBody::Items { list, items } => {
                if items.is_empty() {
                    lines.push(format!("  (항목 없음: /add {list})").bright_black().to_string());
                }
                for item in items {
                    lines.push(format!("  #{}", item.index + 1).yellow().to_string());
                    for field in &item.fields {
                        push_field(&mut lines, "    ", field);
                    }
                }
            }
            SectionBody::Checklist(checks) => {
                if checks.is_empty() {
                    lines.push("  (항목 없음: /add checklist)".bright_black().to_string());
                }
                for check in checks {
                    let line = if check.completed {
                        format!("  {}. [x] {}", check.index + 1, check.text.strikethrough())
                            .bright_black()
                            .to_string()
                    } else {
                        format!("  {}. [ ] {}", check.index + 1, check.text)
                    };
                    lines.push(line);
                }
            }
        }
        lines.push(String::new());
    }
    lines
}

fn push_field(lines: &mut Vec<String>, indent: &str, field: &RenderedField) {
    let label = format!("{indent}{}:", field.label).bold();
    if field.is_placeholder {
        lines.push(format!("{label} {}", field.value.bright_black().italic()));
        return;
    }

    match field.kind {
        FieldKind::Progress => {
            let percent = field.value.parse::<u8>().unwrap_or(0);
            lines.push(format!("{label} {} {percent}%", progress_bar(percent).green()));
        }
        FieldKind::Multiline | FieldKind::Lines if field.value.contains('\n') => {
            lines.push(label.to_string());
            for line in field.value.lines() {
                lines.push(format!("{indent}  - {line}"));
            }
        }
        _ => lines.push(format!("{label} {}", field.value)),
    }
}

pub fn help() -> Vec<String> {
    [
        ("<text>", "채팅 메시지 보내기"),
        ("/upload <file...>", "자료 업로드 (공백이 있는 경로는 따옴표로)"),
        ("/files", "업로드한 자료 목록"),
        ("/remove <n>", "자료 삭제"),
        ("/generate", "인수인계서 생성"),
        ("/cancel", "진행 중인 요청 취소"),
        ("/new", "현재 대화를 저장하고 새 대화 시작"),
        ("/rooms, /chat", "저장된 대화 목록 / 채팅 화면"),
        ("/load <n>", "저장된 대화 불러오기"),
        ("/tab <1-6>, /show", "탭 선택 / 현재 탭 보기"),
        ("/edit <path> <value>", "항목 수정 (\\n 은 줄바꿈)"),
        ("/add <list>, /del <list> <n>", "목록 항목 추가 / 삭제"),
        ("/check <n>", "체크리스트 완료 토글"),
        ("/progress <n> <0-100>", "프로젝트 진행률"),
        ("/print [all] [file]", "인쇄용 텍스트 출력 또는 저장"),
        ("/logout, quit", "로그아웃 / 종료"),
    ]
    .iter()
    .map(|(usage, text)| format!("  {:<30} {}", usage.bright_cyan(), text))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kkuldanji_core::view::render_tab_on;
    use serde_json::json;

    fn plain(lines: Vec<String>) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_empty_sidebar_notice() {
        colored::control::set_override(false);
        assert!(plain(file_list(&[])).contains(NO_SOURCES));
        assert!(plain(room_list(&[])).contains(NO_SAVED_SESSIONS));
    }

    #[test]
    fn test_file_list_shows_kind_and_label() {
        colored::control::set_override(false);
        let files = vec![
            SourceFile::from_bytes("a.png", "image/png", b"x"),
            SourceFile::from_bytes("b.pdf", "application/pdf", b"y"),
        ];
        let text = plain(file_list(&files));
        assert!(text.contains("1. [IMG] a.png PNG"));
        assert!(text.contains("2. [DOC] b.pdf PDF"));
    }

    #[test]
    fn test_tab_view_renders_values_and_lists() {
        colored::control::set_override(false);
        let report = json!({
            "overview": {"transferor": {"name": "김철수"}},
            "ongoingProjects": [{"name": "P1", "progress": 40}],
            "checklist": [{"text": "계정 이관", "completed": true}]
        });

        let overview = plain(tab_view(&render_tab_on(Some(&report), ReportTab::Overview, "2026. 1. 1.")));
        assert!(overview.contains("[1. 개요]"));
        assert!(overview.contains("김철수"));

        let status = plain(tab_view(&render_tab_on(Some(&report), ReportTab::Status, "2026. 1. 1.")));
        assert!(status.contains("#1"));
        assert!(status.contains("40%"));

        let confirmation = plain(tab_view(&render_tab_on(Some(&report), ReportTab::Confirmation, "2026. 1. 1.")));
        assert!(confirmation.contains("[x] 계정 이관"));
    }

    #[test]
    fn test_message_lines() {
        colored::control::set_override(false);
        let lines = message(&ChatMessage::assistant("첫 줄\n둘째 줄"));
        assert!(lines[0].starts_with("꿀단지 "));
        assert_eq!(&lines[1..], &["첫 줄".to_string(), "둘째 줄".to_string()]);
    }

    #[test]
    fn test_empty_tab_prompts_generation() {
        colored::control::set_override(false);
        let text = plain(tab_view(&render_tab_on(None, ReportTab::Role, "")));
        assert!(text.contains("/generate"));
    }
}
