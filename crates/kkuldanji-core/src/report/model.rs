//! Typed mirror of the handover report document.
//!
//! The form edits reports as JSON documents (see [`super::path`]); these
//! types describe the same shape for code that wants typed access: list item
//! templates, the response schema, and read-outs of a finished report.
//! Every field is defaulted so a partial document still deserializes.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandoverReport {
    pub overview: Overview,
    pub job_status: JobStatus,
    pub priorities: Vec<Priority>,
    pub stakeholders: Stakeholders,
    pub team_members: Vec<TeamMember>,
    pub ongoing_projects: Vec<OngoingProject>,
    pub risks: Risks,
    pub roadmap: Roadmap,
    pub resources: Resources,
    pub checklist: Vec<ChecklistItem>,
}

impl HandoverReport {
    /// Reads a typed report out of a document, filling gaps with defaults.
    ///
    /// # Errors
    ///
    /// Fails when a present field has the wrong JSON type.
    pub fn from_document(document: &Value) -> Result<Self> {
        Ok(serde_json::from_value(document.clone())?)
    }

    /// Converts the report into the document form edited by the form store.
    pub fn to_document(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Overview {
    pub transferor: Transferor,
    pub transferee: Transferee,
    pub reason: String,
    pub background: String,
    pub period: String,
    pub schedule: Vec<ScheduleEntry>,
}

/// The person handing the job over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transferor {
    pub name: String,
    pub position: String,
    pub contact: String,
}

/// The person taking the job over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transferee {
    pub name: String,
    pub position: String,
    pub contact: String,
    pub start_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleEntry {
    pub date: String,
    pub activity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStatus {
    pub title: String,
    pub responsibilities: Vec<String>,
    pub authority: String,
    pub reporting_line: String,
    pub team_mission: String,
    pub team_goals: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Priority {
    pub rank: f64,
    pub title: String,
    pub status: String,
    pub solution: String,
    pub deadline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stakeholders {
    pub manager: String,
    pub internal: Vec<Stakeholder>,
    pub external: Vec<Stakeholder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stakeholder {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    pub name: String,
    pub position: String,
    pub role: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OngoingProject {
    pub name: String,
    pub owner: String,
    pub status: String,
    /// Completion percentage, 0 to 100.
    pub progress: f64,
    pub deadline: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Risks {
    pub issues: String,
    pub risks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Roadmap {
    pub short_term: String,
    pub long_term: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resources {
    pub docs: Vec<DocumentRef>,
    pub systems: Vec<SystemRef>,
    pub contacts: Vec<ContactRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentRef {
    pub category: String,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemRef {
    pub name: String,
    pub usage: String,
    pub contact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRef {
    pub category: String,
    pub name: String,
    pub position: String,
    pub contact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecklistItem {
    pub text: String,
    pub completed: bool,
}
