//! Renders one tab of the report into display-ready sections.
//!
//! The projection is read-only. It never writes to the report, so a tab
//! rendered from a document that lacks whole sections simply shows empty
//! fields and empty lists.

use super::layout::{
    CHECKLIST_COLUMNS, FieldKind, ItemColumn, SIGNATURE_PLACEHOLDER, SectionLayout,
    SignatureFallback, progress_percent, tab_layout,
};
use super::tab::ReportTab;
use crate::report::{FieldPath, ListField, get};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

const PROGRESS_BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub label: &'static str,
    pub path: FieldPath,
    pub kind: FieldKind,
    pub value: String,
    /// True when `value` is a stand-in rather than report content.
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedItem {
    pub index: usize,
    pub fields: Vec<RenderedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCheck {
    pub index: usize,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionBody {
    Fields(Vec<RenderedField>),
    Items {
        list: FieldPath,
        items: Vec<RenderedItem>,
    },
    Checklist(Vec<RenderedCheck>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub title: &'static str,
    pub body: SectionBody,
}

/// Result of rendering a tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TabView {
    /// No report exists yet.
    Empty { tab: ReportTab },
    Filled {
        tab: ReportTab,
        sections: Vec<RenderedSection>,
    },
}

impl TabView {
    pub fn tab(&self) -> ReportTab {
        match self {
            TabView::Empty { tab } | TabView::Filled { tab, .. } => *tab,
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, TabView::Empty { .. })
    }

    pub fn sections(&self) -> &[RenderedSection] {
        match self {
            TabView::Empty { .. } => &[],
            TabView::Filled { sections, .. } => sections,
        }
    }

    /// Looks up a rendered field by its full report path.
    pub fn field(&self, path: &str) -> Option<&RenderedField> {
        self.sections().iter().find_map(|section| match &section.body {
            SectionBody::Fields(fields) => fields.iter().find(|f| f.path.to_string() == path),
            SectionBody::Items { items, .. } => items
                .iter()
                .flat_map(|item| item.fields.iter())
                .find(|f| f.path.to_string() == path),
            SectionBody::Checklist(_) => None,
        })
    }

    /// True when nothing on the tab carries report content.
    pub fn is_blank(&self) -> bool {
        self.sections().iter().all(|section| match &section.body {
            SectionBody::Fields(fields) => fields
                .iter()
                .all(|f| f.is_placeholder || f.value.is_empty()),
            SectionBody::Items { items, .. } => items.is_empty(),
            SectionBody::Checklist(checks) => checks.is_empty(),
        })
    }
}

/// Renders `tab` using today's local date for blank confirmation dates.
pub fn render_tab(report: Option<&Value>, tab: ReportTab) -> TabView {
    let today = chrono::Local::now().format("%Y. %-m. %-d.").to_string();
    render_tab_on(report, tab, &today)
}

/// Renders `tab`, using `today` wherever a blank date falls back to today.
pub fn render_tab_on(report: Option<&Value>, tab: ReportTab, today: &str) -> TabView {
    let Some(report) = report else {
        return TabView::Empty { tab };
    };

    let sections = tab_layout(tab)
        .iter()
        .map(|layout| render_section(report, layout, today))
        .collect();

    TabView::Filled { tab, sections }
}

fn render_section(report: &Value, layout: &SectionLayout, today: &str) -> RenderedSection {
    match layout {
        SectionLayout::Fields { title, fields } => RenderedSection {
            title,
            body: SectionBody::Fields(
                fields
                    .iter()
                    .map(|binding| {
                        let path = FieldPath::literal(binding.path);
                        RenderedField {
                            label: binding.label,
                            value: binding.kind.display(get(report, &path)),
                            kind: binding.kind,
                            path,
                            is_placeholder: false,
                        }
                    })
                    .collect(),
            ),
        },
        SectionLayout::List {
            title,
            list,
            columns,
        } => RenderedSection {
            title,
            body: SectionBody::Items {
                list: list.path(),
                items: render_items(report, *list, columns),
            },
        },
        SectionLayout::Signatures { title, lines } => RenderedSection {
            title,
            body: SectionBody::Fields(
                lines
                    .iter()
                    .map(|line| {
                        let path = FieldPath::literal(line.path);
                        let value = FieldKind::Text.display(get(report, &path));
                        let (value, is_placeholder) = if value.trim().is_empty() {
                            let fallback = match line.fallback {
                                SignatureFallback::Placeholder => SIGNATURE_PLACEHOLDER,
                                SignatureFallback::Today => today,
                            };
                            (fallback.to_string(), true)
                        } else {
                            (value, false)
                        };
                        RenderedField {
                            label: line.label,
                            path,
                            kind: FieldKind::Text,
                            value,
                            is_placeholder,
                        }
                    })
                    .collect(),
            ),
        },
        SectionLayout::Checklist { title } => RenderedSection {
            title,
            body: SectionBody::Checklist(render_checklist(report)),
        },
    }
}

fn list_items<'a>(report: &'a Value, list: ListField) -> &'a [Value] {
    get(report, &list.path())
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn render_items(report: &Value, list: ListField, columns: &[ItemColumn]) -> Vec<RenderedItem> {
    let base = list.path();
    list_items(report, list)
        .iter()
        .enumerate()
        .map(|(index, item)| RenderedItem {
            index,
            fields: columns
                .iter()
                .map(|column| RenderedField {
                    label: column.label,
                    path: base.index(index).child(column.key),
                    kind: column.kind,
                    value: column.kind.display(item.get(column.key)),
                    is_placeholder: false,
                })
                .collect(),
        })
        .collect()
}

fn render_checklist(report: &Value) -> Vec<RenderedCheck> {
    let [text_column, done_column] = CHECKLIST_COLUMNS else {
        return Vec::new();
    };
    list_items(report, ListField::Checklist)
        .iter()
        .enumerate()
        .map(|(index, item)| RenderedCheck {
            index,
            text: text_column.kind.display(item.get(text_column.key)),
            completed: item
                .get(done_column.key)
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
        .collect()
}

/// Draws a fixed-width bar for a percentage in `[0, 100]`.
pub fn progress_bar(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        percent
    )
}

fn write_value(f: &mut fmt::Formatter<'_>, indent: &str, field: &RenderedField) -> fmt::Result {
    match field.kind {
        FieldKind::Progress => {
            let percent = progress_percent(&Value::String(field.value.clone()));
            writeln!(f, "{indent}{}: {}", field.label, progress_bar(percent))
        }
        _ if field.value.contains('\n') => {
            writeln!(f, "{indent}{}:", field.label)?;
            for line in field.value.lines() {
                writeln!(f, "{indent}  - {line}")?;
            }
            Ok(())
        }
        _ => writeln!(f, "{indent}{}: {}", field.label, field.value),
    }
}

impl fmt::Display for TabView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.tab().title())?;

        let sections = match self {
            TabView::Empty { .. } => {
                return writeln!(f, "아직 생성된 보고서가 없습니다.");
            }
            TabView::Filled { sections, .. } => sections,
        };

        for section in sections {
            writeln!(f)?;
            writeln!(f, "[{}]", section.title)?;
            match &section.body {
                SectionBody::Fields(fields) => {
                    for field in fields {
                        write_value(f, "  ", field)?;
                    }
                }
                SectionBody::Items { list, items } => {
                    if items.is_empty() {
                        writeln!(f, "  (항목 없음: {list})")?;
                    }
                    for item in items {
                        writeln!(f, "  #{}", item.index)?;
                        for field in &item.fields {
                            write_value(f, "    ", field)?;
                        }
                    }
                }
                SectionBody::Checklist(checks) => {
                    if checks.is_empty() {
                        writeln!(f, "  (항목 없음: checklist)")?;
                    }
                    for check in checks {
                        let mark = if check.completed { "x" } else { " " };
                        let text = if check.completed {
                            format!("~~{}~~", check.text)
                        } else {
                            check.text.clone()
                        };
                        writeln!(f, "  {}. [{mark}] {text}", check.index)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    const TODAY: &str = "2026. 1. 2.";

    #[test]
    fn test_no_report_renders_empty_state() {
        for tab in ReportTab::iter() {
            let view = render_tab_on(None, tab, TODAY);
            assert!(view.is_empty_state());
            assert_eq!(view.tab(), tab);
        }
    }

    #[test]
    fn test_partial_report_shows_value_and_blank_tabs() {
        let report = json!({"overview": {"transferor": {"name": "A"}}});

        let overview = render_tab_on(Some(&report), ReportTab::Overview, TODAY);
        assert_eq!(
            overview.field("overview.transferor.name").map(|f| f.value.as_str()),
            Some("A")
        );
        assert_eq!(
            overview.field("overview.reason").map(|f| f.value.as_str()),
            Some("")
        );

        for tab in [
            ReportTab::Role,
            ReportTab::Priorities,
            ReportTab::Status,
            ReportTab::Resources,
        ] {
            let view = render_tab_on(Some(&report), tab, TODAY);
            assert!(!view.is_empty_state());
            assert!(view.is_blank(), "{tab} should be blank");
        }
    }

    #[test]
    fn test_list_items_render_with_indexed_paths() {
        let report = json!({
            "ongoingProjects": [
                {"name": "P1", "progress": 45},
                {"name": "P2", "progress": 150}
            ]
        });
        let view = render_tab_on(Some(&report), ReportTab::Status, TODAY);

        let second = view.field("ongoingProjects.1.name").unwrap();
        assert_eq!(second.value, "P2");
        assert_eq!(view.field("ongoingProjects.0.progress").unwrap().value, "45");
        assert_eq!(view.field("ongoingProjects.1.progress").unwrap().value, "100");
    }

    #[test]
    fn test_confirmation_placeholders() {
        let report = json!({"overview": {"transferee": {"name": "B"}}});
        let view = render_tab_on(Some(&report), ReportTab::Confirmation, TODAY);

        let transferor = view.field("overview.transferor.name").unwrap();
        assert_eq!(transferor.value, SIGNATURE_PLACEHOLDER);
        assert!(transferor.is_placeholder);

        let transferee = view.field("overview.transferee.name").unwrap();
        assert_eq!(transferee.value, "B");
        assert!(!transferee.is_placeholder);

        assert_eq!(view.field("overview.period").unwrap().value, TODAY);
        assert!(!view.is_blank());
    }

    #[test]
    fn test_checklist_rendering() {
        let report = json!({"checklist": [
            {"text": "인수인계서 작성", "completed": true},
            {"text": "계정 이관"}
        ]});
        let view = render_tab_on(Some(&report), ReportTab::Confirmation, TODAY);
        let checks = view
            .sections()
            .iter()
            .find_map(|s| match &s.body {
                SectionBody::Checklist(c) => Some(c.clone()),
                _ => None,
            })
            .unwrap();

        assert_eq!(checks.len(), 2);
        assert!(checks[0].completed);
        assert!(!checks[1].completed);

        let text = view.to_string();
        assert!(text.contains("[x] ~~인수인계서 작성~~"));
        assert!(text.contains("[ ] 계정 이관"));
    }

    #[test]
    fn test_display_of_empty_and_filled() {
        let empty = render_tab_on(None, ReportTab::Role, TODAY).to_string();
        assert!(empty.contains("2. 직무"));
        assert!(empty.contains("아직 생성된 보고서가 없습니다."));

        let report = json!({"jobStatus": {"responsibilities": ["a", "b"]}});
        let filled = render_tab_on(Some(&report), ReportTab::Role, TODAY).to_string();
        assert!(filled.contains("  - a\n"));
        assert!(filled.contains("  - b\n"));
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), format!("[{}] 0%", "-".repeat(20)));
        assert_eq!(progress_bar(50), format!("[{}{}] 50%", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(200), format!("[{}] 100%", "#".repeat(20)));
    }
}
