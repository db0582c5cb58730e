//! The fixed report shape: top-level sections, editable lists and the
//! structured-output schema sent with the generation request.

use super::model::{
    ChecklistItem, ContactRef, DocumentRef, OngoingProject, Priority, ScheduleEntry, Stakeholder,
    SystemRef, TeamMember,
};
use super::path::FieldPath;
use serde_json::{Value, json};
use strum::{EnumIter, IntoEnumIterator};

/// Top-level keys every complete report carries.
pub const SECTION_KEYS: [&str; 10] = [
    "overview",
    "jobStatus",
    "priorities",
    "stakeholders",
    "teamMembers",
    "ongoingProjects",
    "risks",
    "roadmap",
    "resources",
    "checklist",
];

/// Returns the top-level sections absent from `document`.
///
/// Generated reports are installed as-is; this is only used to log what the
/// model left out.
pub fn missing_sections(document: &Value) -> Vec<&'static str> {
    SECTION_KEYS
        .iter()
        .copied()
        .filter(|key| document.get(key).is_none())
        .collect()
}

/// Every sequence of item records in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ListField {
    Schedule,
    Priorities,
    InternalStakeholders,
    ExternalStakeholders,
    TeamMembers,
    OngoingProjects,
    Docs,
    Systems,
    Contacts,
    Checklist,
}

impl ListField {
    /// The dot path of the sequence.
    pub fn path_str(&self) -> &'static str {
        match self {
            ListField::Schedule => "overview.schedule",
            ListField::Priorities => "priorities",
            ListField::InternalStakeholders => "stakeholders.internal",
            ListField::ExternalStakeholders => "stakeholders.external",
            ListField::TeamMembers => "teamMembers",
            ListField::OngoingProjects => "ongoingProjects",
            ListField::Docs => "resources.docs",
            ListField::Systems => "resources.systems",
            ListField::Contacts => "resources.contacts",
            ListField::Checklist => "checklist",
        }
    }

    pub fn path(&self) -> FieldPath {
        FieldPath::literal(self.path_str())
    }

    /// Looks a list up by its dot path.
    pub fn from_path(path: &FieldPath) -> Option<Self> {
        let raw = path.to_string();
        Self::iter().find(|list| list.path_str() == raw)
    }

    /// The record inserted by "add item".
    pub fn template(&self) -> Value {
        let value = match self {
            ListField::Schedule => serde_json::to_value(ScheduleEntry {
                date: "일자".to_string(),
                activity: "활동".to_string(),
            }),
            ListField::Priorities => serde_json::to_value(Priority {
                rank: 0.0,
                title: "새 과제".to_string(),
                status: "진행 중".to_string(),
                solution: String::new(),
                deadline: String::new(),
            }),
            ListField::InternalStakeholders | ListField::ExternalStakeholders => {
                serde_json::to_value(Stakeholder {
                    name: "이름".to_string(),
                    role: "역할".to_string(),
                })
            }
            ListField::TeamMembers => serde_json::to_value(TeamMember {
                name: "이름".to_string(),
                position: "직급".to_string(),
                role: "역할".to_string(),
                notes: String::new(),
            }),
            ListField::OngoingProjects => serde_json::to_value(OngoingProject {
                name: "새 프로젝트".to_string(),
                owner: "담당자".to_string(),
                status: "진행 중".to_string(),
                progress: 0.0,
                deadline: "2024.12.31".to_string(),
                description: String::new(),
            }),
            ListField::Docs => serde_json::to_value(DocumentRef {
                category: "분류".to_string(),
                name: "문서명".to_string(),
                location: "경로".to_string(),
            }),
            ListField::Systems => serde_json::to_value(SystemRef {
                name: "시스템명".to_string(),
                usage: "용도".to_string(),
                contact: "담당자".to_string(),
            }),
            ListField::Contacts => serde_json::to_value(ContactRef {
                category: "분류".to_string(),
                name: "이름".to_string(),
                position: "직급".to_string(),
                contact: "연락처".to_string(),
            }),
            ListField::Checklist => serde_json::to_value(ChecklistItem {
                text: "추가 확인 사항".to_string(),
                completed: false,
            }),
        };
        value.unwrap_or(Value::Null)
    }
}

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

fn object(properties: Value) -> Value {
    json!({ "type": "OBJECT", "properties": properties })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

/// The `responseSchema` sent with the generation request.
///
/// Uses the OpenAPI subset understood by the Gemini API.
pub fn response_schema() -> Value {
    object(json!({
        "overview": object(json!({
            "transferor": object(json!({ "name": string(), "position": string(), "contact": string() })),
            "transferee": object(json!({
                "name": string(), "position": string(), "contact": string(), "startDate": string()
            })),
            "reason": string(),
            "background": string(),
            "period": string(),
            "schedule": array_of(object(json!({ "date": string(), "activity": string() }))),
        })),
        "jobStatus": object(json!({
            "title": string(),
            "responsibilities": array_of(string()),
            "authority": string(),
            "reportingLine": string(),
            "teamMission": string(),
            "teamGoals": array_of(string()),
        })),
        "priorities": array_of(object(json!({
            "rank": number(), "title": string(), "status": string(), "solution": string(), "deadline": string()
        }))),
        "stakeholders": object(json!({
            "manager": string(),
            "internal": array_of(object(json!({ "name": string(), "role": string() }))),
            "external": array_of(object(json!({ "name": string(), "role": string() }))),
        })),
        "teamMembers": array_of(object(json!({
            "name": string(), "position": string(), "role": string(), "notes": string()
        }))),
        "ongoingProjects": array_of(object(json!({
            "name": string(), "owner": string(), "status": string(), "progress": number(),
            "deadline": string(), "description": string()
        }))),
        "risks": object(json!({ "issues": string(), "risks": string() })),
        "roadmap": object(json!({ "shortTerm": string(), "longTerm": string() })),
        "resources": object(json!({
            "docs": array_of(object(json!({ "category": string(), "name": string(), "location": string() }))),
            "systems": array_of(object(json!({ "name": string(), "usage": string(), "contact": string() }))),
            "contacts": array_of(object(json!({
                "category": string(), "name": string(), "position": string(), "contact": string()
            }))),
        })),
        "checklist": array_of(object(json!({ "text": string(), "completed": { "type": "BOOLEAN" } }))),
    }))
}
