//! Plain-text print/export of the report.

use kkuldanji_core::view::{ReportTab, render_tab};
use serde_json::Value;
use strum::IntoEnumIterator;

/// Which tabs an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    ActiveTab,
    AllTabs,
}

pub const EXPORT_HEADER: &str = "꿀단지 인수인계서";

/// Renders `tabs` into one printable document.
pub fn render_document(report: Option<&Value>, tabs: &[ReportTab]) -> String {
    let mut document = format!("{EXPORT_HEADER}\n");
    for tab in tabs {
        document.push('\n');
        document.push_str(&render_tab(report, *tab).to_string());
    }
    document
}

/// The tabs covered by `scope` when `active` is selected.
pub fn scope_tabs(scope: ExportScope, active: ReportTab) -> Vec<ReportTab> {
    match scope {
        ExportScope::ActiveTab => vec![active],
        ExportScope::AllTabs => ReportTab::iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scope_tabs() {
        assert_eq!(scope_tabs(ExportScope::ActiveTab, ReportTab::Status), vec![ReportTab::Status]);
        assert_eq!(scope_tabs(ExportScope::AllTabs, ReportTab::Status).len(), 6);
    }

    #[test]
    fn test_render_document_contains_each_tab() {
        let report = json!({"overview": {"transferor": {"name": "A"}}});
        let document = render_document(Some(&report), &scope_tabs(ExportScope::AllTabs, ReportTab::Overview));

        assert!(document.starts_with(EXPORT_HEADER));
        for tab in ReportTab::iter() {
            assert!(document.contains(tab.title()), "missing {}", tab.title());
        }
        assert!(document.contains("이름: A"));
    }

    #[test]
    fn test_render_document_without_report() {
        let document = render_document(None, &scope_tabs(ExportScope::AllTabs, ReportTab::Overview));
        assert_eq!(document.matches("아직 생성된 보고서가 없습니다.").count(), 6);
    }
}
