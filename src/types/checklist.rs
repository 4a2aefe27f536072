use serde::Deserialize;
use std::collections::HashMap;

/// The built-in checklist variants, matched to encounter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistKind {
    Default,
    InitialEvaluation,
    FollowUp,
}

impl ChecklistKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistKind::Default => "default",
            ChecklistKind::InitialEvaluation => "initial-evaluation",
            ChecklistKind::FollowUp => "follow-up",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "default" => Some(ChecklistKind::Default),
            "initial-evaluation" => Some(ChecklistKind::InitialEvaluation),
            "follow-up" => Some(ChecklistKind::FollowUp),
            _ => None,
        }
    }

    pub fn all() -> [ChecklistKind; 3] {
        [
            ChecklistKind::Default,
            ChecklistKind::InitialEvaluation,
            ChecklistKind::FollowUp,
        ]
    }
}

/// One trackable discussion topic in a clinical encounter.
///
/// Keyword order matters: entries early in the list are treated as the
/// item's core vocabulary and earn a priority bonus when matched.
#[derive(Debug, Clone, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub threshold: Option<f32>,
}

impl ChecklistItem {
    pub fn effective_threshold(&self, default_threshold: f32) -> f32 {
        self.threshold.unwrap_or(default_threshold)
    }
}

/// A checklist plus the external topic-label mapping for it.
///
/// `topic_map` keys are topic labels as emitted by the speech analysis
/// service; values are the item ids that label should credit. Labels with
/// no entry are ignored during reconciliation.
#[derive(Debug, Clone)]
pub struct Checklist {
    pub name: String,
    pub items: Vec<ChecklistItem>,
    pub topic_map: HashMap<String, Vec<String>>,
}

impl Checklist {
    pub fn item(&self, id: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.id == id)
    }
}
