//! The single source of truth for the in-progress report.

use super::input::clamp_progress;
use crate::report::{FieldPath, ListField, append_to_list, get, remove_from_list, set};
use serde_json::Value;
use tokio::sync::mpsc;

/// Change notification delivered to the store's subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormChange {
    /// A whole report was installed (generation finished).
    Installed,
    /// A single path was edited.
    Edited(FieldPath),
    /// The report was discarded.
    Cleared,
}

/// Holds the report being edited, or nothing before the first generation.
///
/// Every edit is a path accessor call whose result replaces the held
/// document wholesale. Edits that leave the document equal to what it was
/// are dropped without bumping the revision or notifying. Editing while no
/// report exists is a no-op.
#[derive(Debug, Default)]
pub struct FormStore {
    report: Option<Value>,
    revision: u64,
    subscriber: Option<mpsc::UnboundedSender<FormChange>>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the single subscriber, replacing any previous one.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<FormChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscriber = Some(tx);
        rx
    }

    /// The held report, or `None` before generation.
    pub fn report(&self) -> Option<&Value> {
        self.report.as_ref()
    }

    pub fn has_report(&self) -> bool {
        self.report.is_some()
    }

    /// Incremented on every accepted change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the held report wholesale.
    pub fn update(&mut self, report: Value) {
        self.report = Some(report);
        self.bump(FormChange::Installed);
    }

    /// Discards the held report.
    pub fn clear(&mut self) {
        if self.report.take().is_some() {
            self.bump(FormChange::Cleared);
        }
    }

    /// Reads the value at `path`.
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        self.report.as_ref().and_then(|report| get(report, path))
    }

    /// Writes `value` at `path`. Returns whether the report changed.
    pub fn set_field(&mut self, path: &FieldPath, value: Value) -> bool {
        self.apply(path, |report| set(report, path, value))
    }

    /// Appends `item` to the sequence at `path`. Returns whether the report changed.
    pub fn add_item(&mut self, path: &FieldPath, item: Value) -> bool {
        self.apply(path, |report| append_to_list(report, path, item))
    }

    /// Appends the list's template record.
    pub fn add_template_item(&mut self, list: ListField) -> bool {
        self.add_item(&list.path(), list.template())
    }

    /// Removes element `index` of the sequence at `path`. Returns whether the report changed.
    pub fn remove_item(&mut self, path: &FieldPath, index: usize) -> bool {
        self.apply(path, |report| remove_from_list(report, path, index))
    }

    /// Flips `checklist.<index>.completed`.
    pub fn toggle_checklist(&mut self, index: usize) -> bool {
        let path = ListField::Checklist.path().index(index);
        if self.get(&path).is_none() {
            return false;
        }
        let completed_path = path.child("completed");
        let completed = self
            .get(&completed_path)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        self.set_field(&completed_path, Value::Bool(!completed))
    }

    /// Writes `ongoingProjects.<index>.progress` from raw input, clamped to `[0, 100]`.
    pub fn set_progress(&mut self, index: usize, raw: &str) -> bool {
        let path = ListField::OngoingProjects.path().index(index);
        if self.get(&path).is_none() {
            return false;
        }
        let progress = clamp_progress(raw);
        self.set_field(&path.child("progress"), Value::from(progress))
    }

    fn apply(&mut self, path: &FieldPath, edit: impl FnOnce(&Value) -> Value) -> bool {
        let Some(current) = self.report.as_ref() else {
            tracing::debug!("[Form] Ignoring edit of '{}' with no report", path);
            return false;
        };

        let next = edit(current);
        if &next == current {
            return false;
        }

        self.report = Some(next);
        self.bump(FormChange::Edited(path.clone()));
        true
    }

    fn bump(&mut self, change: FormChange) {
        self.revision += 1;
        if let Some(subscriber) = &self.subscriber
            && subscriber.send(change).is_err()
        {
            // View went away
            self.subscriber = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    fn store_with(report: Value) -> FormStore {
        let mut store = FormStore::new();
        store.update(report);
        store
    }

    #[test]
    fn test_empty_store_has_no_report() {
        let store = FormStore::new();
        assert!(!store.has_report());
        assert!(store.report().is_none());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_edits_without_report_are_ignored() {
        let mut store = FormStore::new();
        assert!(!store.set_field(&path("overview.reason"), json!("x")));
        assert!(!store.add_item(&path("checklist"), json!({})));
        assert!(!store.toggle_checklist(0));
        assert!(store.report().is_none());
    }

    #[test]
    fn test_set_field_routes_through_accessor() {
        let mut store = store_with(json!({}));
        assert!(store.set_field(&path("overview.transferor.name"), json!("A")));
        assert_eq!(store.get(&path("overview.transferor.name")), Some(&json!("A")));
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_unchanged_edit_does_not_bump_revision() {
        let mut store = store_with(json!({"risks": {"issues": "x"}}));
        let before = store.revision();
        assert!(!store.set_field(&path("risks.issues"), json!("x")));
        assert!(!store.remove_item(&path("checklist"), 0));
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_add_and_remove_items() {
        let mut store = store_with(json!({}));
        assert!(store.add_template_item(ListField::TeamMembers));
        assert!(store.add_item(&path("teamMembers"), json!({"name": "B"})));
        assert_eq!(store.get(&path("teamMembers.1.name")), Some(&json!("B")));
        assert!(store.remove_item(&path("teamMembers"), 0));
        assert_eq!(store.get(&path("teamMembers.0.name")), Some(&json!("B")));
        assert!(!store.remove_item(&path("teamMembers"), 5));
    }

    #[test]
    fn test_toggle_checklist() {
        let mut store = store_with(json!({"checklist": [{"text": "키 반납"}]}));
        assert!(store.toggle_checklist(0));
        assert_eq!(store.get(&path("checklist.0.completed")), Some(&json!(true)));
        assert!(store.toggle_checklist(0));
        assert_eq!(store.get(&path("checklist.0.completed")), Some(&json!(false)));
        assert!(!store.toggle_checklist(1));
    }

    #[test]
    fn test_set_progress_clamps_input() {
        let mut store = store_with(json!({"ongoingProjects": [{"name": "p", "progress": 10}]}));
        assert!(store.set_progress(0, "250"));
        assert_eq!(store.get(&path("ongoingProjects.0.progress")), Some(&json!(100)));
        assert!(store.set_progress(0, "oops"));
        assert_eq!(store.get(&path("ongoingProjects.0.progress")), Some(&json!(0)));
        assert!(!store.set_progress(3, "50"));
    }

    #[test]
    fn test_subscriber_sees_changes() {
        let mut store = FormStore::new();
        let mut rx = store.subscribe();
        store.update(json!({}));
        store.set_field(&path("risks.issues"), json!("x"));
        store.set_field(&path("risks.issues"), json!("x"));
        store.clear();

        assert_eq!(rx.try_recv().unwrap(), FormChange::Installed);
        assert_eq!(rx.try_recv().unwrap(), FormChange::Edited(path("risks.issues")));
        assert_eq!(rx.try_recv().unwrap(), FormChange::Cleared);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_new_subscriber_replaces_old() {
        let mut store = FormStore::new();
        let mut first = store.subscribe();
        let mut second = store.subscribe();
        store.update(json!({}));
        assert!(first.try_recv().is_err());
        assert_eq!(second.try_recv().unwrap(), FormChange::Installed);
    }
}
