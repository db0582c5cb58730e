//! Dot-path addressing into a report document.
//!
//! A report is held as a JSON document whose shape is fixed by the schema in
//! [`super::schema`]. Every edit made by the form goes through the four
//! accessors in this module. They never mutate the caller's document: each
//! returns a fresh copy so the store can compare old and new to decide
//! whether anything changed.
//!
//! Segments that look like integers index into sequences when the node being
//! walked is a sequence, so `ongoingProjects.2.progress` addresses the
//! `progress` field of the third project.

use crate::error::{HandoverError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A validated, non-empty dot-delimited path such as `overview.transferor.name`.
///
/// Empty paths and paths with empty segments (`a..b`, `.a`) are rejected at
/// parse time, so every accessor below can assume at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dot-delimited path.
    ///
    /// # Errors
    ///
    /// Returns `HandoverError::InvalidPath` for an empty path or a path with
    /// an empty segment.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HandoverError::InvalidPath(raw.to_string()));
        }

        let segments: Vec<String> = trimmed
            .split('.')
            .map(|segment| segment.trim().to_string())
            .collect();

        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(HandoverError::InvalidPath(raw.to_string()));
        }

        Ok(Self { segments })
    }

    /// Builds a path from a compile-time literal known to be well formed.
    pub(crate) fn literal(raw: &'static str) -> Self {
        Self {
            segments: raw.split('.').map(str::to_string).collect(),
        }
    }

    /// Returns the path segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns a new path addressing item `index` of the sequence at `self`.
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    /// Returns the last segment.
    pub fn leaf(&self) -> &str {
        // Non-empty by construction
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Returns the path without its last segment, or `None` for a single-segment path.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = HandoverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Reads the value at `path`.
///
/// Returns `None` when any segment along the way is missing; absence is a
/// normal state for fields that have never been filled in.
pub fn get<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(root, |node, segment| match node {
            Value::Object(map) => map.get(segment.as_str()),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        })
}

/// Returns a copy of `root` with the value at `path` replaced by `value`.
///
/// Missing records along the way are created empty. A scalar or sequence
/// standing where a record is needed is replaced by an empty record. An index
/// segment past the end of an existing sequence pads it with nulls up to that
/// index, so `get(&set(root, p, v), p) == Some(&v)` holds for every path.
pub fn set(root: &Value, path: &FieldPath, value: Value) -> Value {
    let mut next = root.clone();
    if let Some(slot) = slot_mut(&mut next, path) {
        *slot = value;
    }
    next
}

/// Returns a copy of `root` with `item` appended to the sequence at `path`.
///
/// A missing (or null) sequence is created empty first. If `path` resolves to
/// something that is not a sequence the document is returned unchanged.
pub fn append_to_list(root: &Value, path: &FieldPath, item: Value) -> Value {
    if let Some(existing) = get(root, path)
        && !existing.is_null()
        && !existing.is_array()
    {
        return root.clone();
    }

    let mut next = root.clone();
    if let Some(slot) = slot_mut(&mut next, path) {
        if slot.is_null() {
            *slot = Value::Array(Vec::new());
        }
        if let Value::Array(items) = slot {
            items.push(item);
        }
    }
    next
}

/// Returns a copy of `root` with element `index` removed from the sequence at `path`.
///
/// No-op when `path` does not resolve to a sequence or `index` is out of
/// bounds. Otherwise exactly one element is removed and later elements shift
/// left, keeping their relative order.
pub fn remove_from_list(root: &Value, path: &FieldPath, index: usize) -> Value {
    let mut next = root.clone();
    if let Some(Value::Array(items)) = existing_mut(&mut next, path)
        && index < items.len()
    {
        items.remove(index);
    }
    next
}

/// Walks to the slot at `path`, creating records as needed.
fn slot_mut<'a>(root: &'a mut Value, path: &FieldPath) -> Option<&'a mut Value> {
    path.segments()
        .iter()
        .try_fold(root, |node, segment| entry_mut(node, segment))
}

fn entry_mut<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    let index = match node {
        Value::Array(_) => segment.parse::<usize>().ok(),
        _ => None,
    };
    if let Some(index) = index {
        return match node {
            Value::Array(items) => {
                if items.len() <= index {
                    items.resize(index + 1, Value::Null);
                }
                items.get_mut(index)
            }
            _ => None,
        };
    }

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => Some(map.entry(segment.to_string()).or_insert(Value::Null)),
        _ => None,
    }
}

/// Walks to the slot at `path` without creating anything.
fn existing_mut<'a>(root: &'a mut Value, path: &FieldPath) -> Option<&'a mut Value> {
    path.segments()
        .iter()
        .try_fold(root, |node, segment| match node {
            Value::Object(map) => map.get_mut(segment.as_str()),
            Value::Array(items) => match segment.parse::<usize>() {
                Ok(index) => items.get_mut(index),
                Err(_) => None,
            },
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_rejects_empty_paths() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("   ").is_err());
        assert!(FieldPath::parse("a..b").is_err());
        assert!(FieldPath::parse(".a").is_err());
        assert!(FieldPath::parse("a.").is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let p = path("overview.transferor.name");
        assert_eq!(p.segments().len(), 3);
        assert_eq!(p.leaf(), "name");
        assert_eq!(p.to_string(), "overview.transferor.name");
        assert_eq!(p.parent().unwrap().to_string(), "overview.transferor");
        assert!(path("overview").parent().is_none());
        assert_eq!(path("teamMembers").index(2).child("name").to_string(), "teamMembers.2.name");
    }

    #[test]
    fn test_get_missing_intermediate_is_absent() {
        let doc = json!({"overview": {}});
        assert!(get(&doc, &path("overview.transferor.name")).is_none());
        assert!(get(&doc, &path("risks.issues")).is_none());
    }

    #[test]
    fn test_get_through_sequence_index() {
        let doc = json!({"priorities": [{"title": "a"}, {"title": "b"}]});
        assert_eq!(get(&doc, &path("priorities.1.title")), Some(&json!("b")));
        assert!(get(&doc, &path("priorities.2.title")).is_none());
        assert!(get(&doc, &path("priorities.x.title")).is_none());
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let roots = [json!({}), json!({"overview": {"reason": "r"}}), json!(null)];
        let cases = [
            ("overview.transferor.name", json!("홍길동")),
            ("overview.reason", json!("전보")),
            ("jobStatus.responsibilities", json!(["a", "b"])),
            ("risks", json!({"issues": "x"})),
        ];
        for root in &roots {
            for (raw, value) in &cases {
                let p = path(raw);
                let next = set(root, &p, value.clone());
                assert_eq!(get(&next, &p), Some(value), "path {raw}");
            }
        }
    }

    #[test]
    fn test_set_does_not_touch_original() {
        let original = json!({"overview": {"reason": "old"}});
        let next = set(&original, &path("overview.reason"), json!("new"));
        assert_eq!(original, json!({"overview": {"reason": "old"}}));
        assert_eq!(next, json!({"overview": {"reason": "new"}}));
    }

    #[test]
    fn test_set_creates_missing_records() {
        let next = set(&json!({}), &path("overview.transferee.startDate"), json!("2025-01-02"));
        assert_eq!(
            next,
            json!({"overview": {"transferee": {"startDate": "2025-01-02"}}})
        );
    }

    #[test]
    fn test_set_coerces_scalar_into_record() {
        let doc = json!({"overview": "oops"});
        let next = set(&doc, &path("overview.transferor.name"), json!("A"));
        assert_eq!(next, json!({"overview": {"transferor": {"name": "A"}}}));
    }

    #[test]
    fn test_set_inside_sequence_item() {
        let doc = json!({"ongoingProjects": [{"name": "p1", "progress": 10}]});
        let next = set(&doc, &path("ongoingProjects.0.progress"), json!(55));
        assert_eq!(next["ongoingProjects"][0]["progress"], json!(55));
        assert_eq!(next["ongoingProjects"][0]["name"], json!("p1"));
    }

    #[test]
    fn test_set_past_end_of_sequence_creates_slot() {
        let doc = json!({"checklist": [{"text": "a"}]});

        let p = path("checklist.1.text");
        let next = set(&doc, &p, json!("b"));
        assert_eq!(get(&next, &p), Some(&json!("b")));
        assert_eq!(next["checklist"], json!([{"text": "a"}, {"text": "b"}]));

        let p = path("checklist.3.text");
        let next = set(&doc, &p, json!("d"));
        assert_eq!(get(&next, &p), Some(&json!("d")));
        assert_eq!(
            next["checklist"],
            json!([{"text": "a"}, null, null, {"text": "d"}])
        );
        assert_eq!(doc, json!({"checklist": [{"text": "a"}]}));
    }

    #[test]
    fn test_append_preserves_order() {
        let doc = json!({"checklist": [{"text": "first"}]});
        let p = path("checklist");
        let next = append_to_list(&doc, &p, json!({"text": "i1"}));
        let next = append_to_list(&next, &p, json!({"text": "i2"}));
        assert_eq!(
            next["checklist"],
            json!([{"text": "first"}, {"text": "i1"}, {"text": "i2"}])
        );
    }

    #[test]
    fn test_append_creates_missing_sequence() {
        let next = append_to_list(&json!({}), &path("resources.docs"), json!({"name": "d"}));
        assert_eq!(next, json!({"resources": {"docs": [{"name": "d"}]}}));
    }

    #[test]
    fn test_append_to_non_sequence_is_noop() {
        let doc = json!({"risks": {"issues": "text"}});
        let next = append_to_list(&doc, &path("risks.issues"), json!("x"));
        assert_eq!(next, doc);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let doc = json!({"teamMembers": ["a", "b", "c", "d"]});
        let p = path("teamMembers");
        for k in 0..4 {
            let next = remove_from_list(&doc, &p, k);
            let items = next["teamMembers"].as_array().unwrap();
            assert_eq!(items.len(), 3);
            let mut expected = vec!["a", "b", "c", "d"];
            expected.remove(k);
            let actual: Vec<&str> = items.iter().map(|v| v.as_str().unwrap()).collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let doc = json!({"teamMembers": ["a", "b"]});
        let next = remove_from_list(&doc, &path("teamMembers"), 2);
        assert_eq!(next, doc);
    }

    #[test]
    fn test_remove_from_missing_or_non_sequence_is_noop() {
        let doc = json!({"risks": {"issues": "text"}});
        assert_eq!(remove_from_list(&doc, &path("checklist"), 0), doc);
        assert_eq!(remove_from_list(&doc, &path("risks.issues"), 0), doc);
        assert_eq!(remove_from_list(&doc, &path("risks.issues.deeper"), 0), doc);
    }

    #[test]
    fn test_field_path_serde_round_trip_rejects_invalid() {
        let p: FieldPath = serde_json::from_str("\"overview.reason\"").unwrap();
        assert_eq!(p, path("overview.reason"));
        assert!(serde_json::from_str::<FieldPath>("\"\"").is_err());
    }
}
