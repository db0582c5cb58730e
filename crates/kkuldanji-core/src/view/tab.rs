//! Report tabs and the navigator that tracks the active one.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::HandoverError;

/// The six mutually exclusive report tabs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportTab {
    #[default]
    Overview,
    Role,
    Priorities,
    Status,
    Resources,
    Confirmation,
}

impl ReportTab {
    /// Zero-based position in the tab strip.
    pub fn index(&self) -> usize {
        Self::iter().position(|tab| tab == *self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Label shown on the tab strip.
    pub fn title(&self) -> &'static str {
        match self {
            ReportTab::Overview => "1. 개요",
            ReportTab::Role => "2. 직무",
            ReportTab::Priorities => "3. 과제",
            ReportTab::Status => "4. 현황",
            ReportTab::Resources => "5. 자료",
            ReportTab::Confirmation => "6. 확인",
        }
    }

    fn korean_name(&self) -> &'static str {
        match self {
            ReportTab::Overview => "개요",
            ReportTab::Role => "직무",
            ReportTab::Priorities => "과제",
            ReportTab::Status => "현황",
            ReportTab::Resources => "자료",
            ReportTab::Confirmation => "확인",
        }
    }
}

impl FromStr for ReportTab {
    type Err = HandoverError;

    /// Accepts the English name, the Korean name, or the 1-based tab number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if let Ok(number) = needle.parse::<usize>()
            && number >= 1
            && let Some(tab) = Self::from_index(number - 1)
        {
            return Ok(tab);
        }

        Self::iter()
            .find(|tab| tab.to_string() == needle || tab.korean_name() == needle)
            .ok_or_else(|| HandoverError::not_found("tab", s))
    }
}

/// Tracks the active tab. Starts on `Overview` and only moves on explicit selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabNavigator {
    active: ReportTab,
}

impl TabNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ReportTab {
        self.active
    }

    /// Activates `tab`. Returns whether the active tab changed.
    pub fn select(&mut self, tab: ReportTab) -> bool {
        let changed = self.active != tab;
        self.active = tab;
        changed
    }
}
