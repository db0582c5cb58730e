//! Static field bindings for each report tab.
//!
//! Each binding ties a label to one report path. The view reads through the
//! path accessor and every edit writes back through the form store, so the
//! tables here are the whole of the tab structure.

use super::tab::ReportTab;
use crate::form::{clamp_progress, parse_flag, split_lines};
use crate::report::{FieldPath, ListField};
use serde::Serialize;
use serde_json::Value;

/// How a field is displayed and how raw input is turned into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Multiline,
    /// A list of strings edited as newline-separated text.
    Lines,
    /// A percentage clamped to `[0, 100]` at input.
    Progress,
    Flag,
}

impl FieldKind {
    /// Converts raw input into the value stored in the report.
    pub fn parse_input(&self, raw: &str) -> Value {
        match self {
            FieldKind::Text | FieldKind::Multiline => Value::String(raw.to_string()),
            FieldKind::Lines => split_lines(raw),
            FieldKind::Progress => Value::from(clamp_progress(raw)),
            FieldKind::Flag => Value::Bool(parse_flag(raw)),
        }
    }

    /// Renders a stored value as text. Absent values render empty.
    pub fn display(&self, value: Option<&Value>) -> String {
        match (self, value) {
            (_, None) | (_, Some(Value::Null)) => String::new(),
            (FieldKind::Progress, Some(value)) => progress_percent(value).to_string(),
            (_, Some(Value::String(s))) => s.clone(),
            (_, Some(Value::Number(n))) => n.to_string(),
            (_, Some(Value::Bool(b))) => b.to_string(),
            (_, Some(Value::Array(items))) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\n"),
            (_, Some(Value::Object(_))) => String::new(),
        }
    }
}

/// Reads a stored progress value as a whole percentage in `[0, 100]`.
pub fn progress_percent(value: &Value) -> u8 {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f.round().clamp(0.0, 100.0) as u8).unwrap_or(0),
        Value::String(s) => clamp_progress(s),
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldBinding {
    pub label: &'static str,
    pub path: &'static str,
    pub kind: FieldKind,
}

/// One column of an item list, addressed relative to the item.
#[derive(Debug, Clone, Copy)]
pub struct ItemColumn {
    pub label: &'static str,
    pub key: &'static str,
    pub kind: FieldKind,
}

/// What a confirmation line shows while its field is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureFallback {
    Placeholder,
    Today,
}

#[derive(Debug, Clone, Copy)]
pub struct SignatureLine {
    pub label: &'static str,
    pub path: &'static str,
    pub fallback: SignatureFallback,
}

pub const SIGNATURE_PLACEHOLDER: &str = "(전자서명)";

#[derive(Debug, Clone, Copy)]
pub enum SectionLayout {
    Fields {
        title: &'static str,
        fields: &'static [FieldBinding],
    },
    List {
        title: &'static str,
        list: ListField,
        columns: &'static [ItemColumn],
    },
    Signatures {
        title: &'static str,
        lines: &'static [SignatureLine],
    },
    Checklist {
        title: &'static str,
    },
}

const fn field(label: &'static str, path: &'static str, kind: FieldKind) -> FieldBinding {
    FieldBinding { label, path, kind }
}

const fn column(label: &'static str, key: &'static str, kind: FieldKind) -> ItemColumn {
    ItemColumn { label, key, kind }
}

use FieldKind::{Flag, Lines, Multiline, Progress, Text};

const OVERVIEW: &[SectionLayout] = &[
    SectionLayout::Fields {
        title: "인계자 (From)",
        fields: &[
            field("이름", "overview.transferor.name", Text),
            field("직급/부서", "overview.transferor.position", Text),
            field("연락처", "overview.transferor.contact", Text),
        ],
    },
    SectionLayout::Fields {
        title: "인수자 (To)",
        fields: &[
            field("이름", "overview.transferee.name", Text),
            field("직급/부서", "overview.transferee.position", Text),
            field("연락처", "overview.transferee.contact", Text),
            field("부임 예정일", "overview.transferee.startDate", Text),
        ],
    },
    SectionLayout::Fields {
        title: "인계 개요",
        fields: &[
            field("인계 사유", "overview.reason", Multiline),
            field("배경 정보 및 히스토리", "overview.background", Multiline),
            field("인계 기간", "overview.period", Text),
        ],
    },
    SectionLayout::List {
        title: "인계 일정",
        list: ListField::Schedule,
        columns: &[column("일자", "date", Text), column("활동", "activity", Text)],
    },
];

const ROLE: &[SectionLayout] = &[
    SectionLayout::Fields {
        title: "직무 정보",
        fields: &[
            field("공식 직무명", "jobStatus.title", Text),
            field("핵심 책임", "jobStatus.responsibilities", Lines),
            field("의사결정 권한", "jobStatus.authority", Text),
            field("보고 체계", "jobStatus.reportingLine", Text),
        ],
    },
    SectionLayout::Fields {
        title: "팀 비전",
        fields: &[
            field("팀 미션", "jobStatus.teamMission", Text),
            field("현재 핵심 목표", "jobStatus.teamGoals", Lines),
        ],
    },
];

const PRIORITIES: &[SectionLayout] = &[
    SectionLayout::List {
        title: "우선순위 과제",
        list: ListField::Priorities,
        columns: &[
            column("과제", "title", Text),
            column("현황", "status", Text),
            column("해결 방안", "solution", Multiline),
            column("기한", "deadline", Text),
        ],
    },
    SectionLayout::Fields {
        title: "이해관계자",
        fields: &[field("담당 매니저", "stakeholders.manager", Text)],
    },
    SectionLayout::List {
        title: "내부 이해관계자",
        list: ListField::InternalStakeholders,
        columns: &[column("이름", "name", Text), column("역할", "role", Text)],
    },
    SectionLayout::List {
        title: "외부 이해관계자",
        list: ListField::ExternalStakeholders,
        columns: &[column("이름", "name", Text), column("역할", "role", Text)],
    },
    SectionLayout::List {
        title: "팀원 현황",
        list: ListField::TeamMembers,
        columns: &[
            column("이름", "name", Text),
            column("직급", "position", Text),
            column("역할", "role", Text),
            column("비고", "notes", Text),
        ],
    },
];

const STATUS: &[SectionLayout] = &[
    SectionLayout::List {
        title: "진행 중인 프로젝트",
        list: ListField::OngoingProjects,
        columns: &[
            column("프로젝트", "name", Text),
            column("담당자", "owner", Text),
            column("진척도", "progress", Progress),
            column("상태", "status", Text),
            column("기한", "deadline", Text),
            column("상세 내용", "description", Multiline),
        ],
    },
    SectionLayout::Fields {
        title: "리스크 관리",
        fields: &[
            field("현재 이슈", "risks.issues", Multiline),
            field("잠재적 리스크", "risks.risks", Multiline),
        ],
    },
    SectionLayout::Fields {
        title: "로드맵",
        fields: &[
            field("단기 계획", "roadmap.shortTerm", Multiline),
            field("장기 계획", "roadmap.longTerm", Multiline),
        ],
    },
];

const RESOURCES: &[SectionLayout] = &[
    SectionLayout::List {
        title: "핵심 문서",
        list: ListField::Docs,
        columns: &[
            column("분류", "category", Text),
            column("문서명", "name", Text),
            column("위치", "location", Text),
        ],
    },
    SectionLayout::List {
        title: "시스템 및 도구",
        list: ListField::Systems,
        columns: &[
            column("시스템", "name", Text),
            column("용도", "usage", Text),
            column("문의", "contact", Text),
        ],
    },
    SectionLayout::List {
        title: "비상 연락망",
        list: ListField::Contacts,
        columns: &[
            column("분류", "category", Text),
            column("이름", "name", Text),
            column("직급", "position", Text),
            column("연락처", "contact", Text),
        ],
    },
];

const CONFIRMATION: &[SectionLayout] = &[
    SectionLayout::Signatures {
        title: "인수인계 확인",
        lines: &[
            SignatureLine {
                label: "인계자",
                path: "overview.transferor.name",
                fallback: SignatureFallback::Placeholder,
            },
            SignatureLine {
                label: "인수자",
                path: "overview.transferee.name",
                fallback: SignatureFallback::Placeholder,
            },
            SignatureLine {
                label: "일자",
                path: "overview.period",
                fallback: SignatureFallback::Today,
            },
            SignatureLine {
                label: "최종 매니저 확인 서명",
                path: "stakeholders.manager",
                fallback: SignatureFallback::Placeholder,
            },
        ],
    },
    SectionLayout::Checklist {
        title: "최종 확인 체크리스트",
    },
];

/// Checklist item columns, used when the checklist is edited by path.
pub const CHECKLIST_COLUMNS: &[ItemColumn] =
    &[column("내용", "text", Text), column("완료", "completed", Flag)];

/// The sections shown on `tab`, in display order.
pub fn tab_layout(tab: ReportTab) -> &'static [SectionLayout] {
    match tab {
        ReportTab::Overview => OVERVIEW,
        ReportTab::Role => ROLE,
        ReportTab::Priorities => PRIORITIES,
        ReportTab::Status => STATUS,
        ReportTab::Resources => RESOURCES,
        ReportTab::Confirmation => CONFIRMATION,
    }
}

/// Finds how the field at `path` is edited.
///
/// Paths not bound by any tab are treated as plain text.
pub fn field_kind(path: &FieldPath) -> FieldKind {
    let raw = path.to_string();
    let all = [OVERVIEW, ROLE, PRIORITIES, STATUS, RESOURCES, CONFIRMATION];

    for section in all.iter().flat_map(|sections| sections.iter()) {
        match section {
            SectionLayout::Fields { fields, .. } => {
                if let Some(binding) = fields.iter().find(|binding| binding.path == raw) {
                    return binding.kind;
                }
            }
            SectionLayout::List { list, columns, .. } => {
                if let Some(kind) = item_column_kind(path, *list, columns) {
                    return kind;
                }
            }
            SectionLayout::Checklist { .. } => {
                if let Some(kind) = item_column_kind(path, ListField::Checklist, CHECKLIST_COLUMNS)
                {
                    return kind;
                }
            }
            SectionLayout::Signatures { .. } => {}
        }
    }

    FieldKind::Text
}

/// Matches `<list>.<index>.<key>` against the list's columns.
fn item_column_kind(path: &FieldPath, list: ListField, columns: &[ItemColumn]) -> Option<FieldKind> {
    let parent = path.parent()?;
    let item = parent.parent()?;
    if ListField::from_path(&item) != Some(list) || parent.leaf().parse::<usize>().is_err() {
        return None;
    }
    columns
        .iter()
        .find(|column| column.key == path.leaf())
        .map(|column| column.kind)
}
