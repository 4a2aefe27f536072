use crate::error::CovcheckError;
use crate::types::checklist::{ChecklistItem, ChecklistKind};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CovcheckConfig {
    pub session: Option<SessionConfig>,
    pub scoring: Option<ScoringConfig>,
    /// Custom checklist items; when present they replace the built-in
    /// checklist entirely.
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    /// Topic label -> item ids credited by that label.
    pub topics: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub checklist: Option<String>,
    pub policy: Option<PolicyName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyName {
    Diminishing,
    Occurrence,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    pub default_threshold: Option<f32>,
    pub priority_window: Option<usize>,
    pub priority_bonus: Option<f32>,
    pub topic_boost: Option<f32>,
    pub occurrence_point_value: Option<f32>,
    pub occurrence_cap: Option<f32>,
    pub stoplist: Option<Vec<String>>,
}

/// Resolved scoring tunables after config overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringSettings {
    pub default_threshold: f32,
    pub priority_window: usize,
    pub priority_bonus: f32,
    pub topic_boost: f32,
    pub occurrence_point_value: f32,
    pub occurrence_cap: f32,
    pub stoplist: Vec<String>,
}

/// Generic words that are near-certain false positives even when they
/// appear in an item's keyword list.
pub const DEFAULT_STOPLIST: [&str; 7] = ["the", "and", "that", "with", "for", "this", "patient"];

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            default_threshold: 4.0,
            priority_window: 5,
            priority_bonus: 0.2,
            topic_boost: 2.0,
            occurrence_point_value: 20.0,
            occurrence_cap: 100.0,
            stoplist: DEFAULT_STOPLIST.iter().map(|word| word.to_string()).collect(),
        }
    }
}

impl CovcheckConfig {
    pub fn scoring_settings(&self) -> ScoringSettings {
        let defaults = ScoringSettings::default();
        match &self.scoring {
            Some(scoring) => ScoringSettings {
                default_threshold: scoring.default_threshold.unwrap_or(defaults.default_threshold),
                priority_window: scoring.priority_window.unwrap_or(defaults.priority_window),
                priority_bonus: scoring.priority_bonus.unwrap_or(defaults.priority_bonus),
                topic_boost: scoring.topic_boost.unwrap_or(defaults.topic_boost),
                occurrence_point_value: scoring
                    .occurrence_point_value
                    .unwrap_or(defaults.occurrence_point_value),
                occurrence_cap: scoring.occurrence_cap.unwrap_or(defaults.occurrence_cap),
                stoplist: scoring
                    .stoplist
                    .clone()
                    .unwrap_or(defaults.stoplist)
                    .iter()
                    .map(|word| word.to_lowercase())
                    .collect(),
            },
            None => defaults,
        }
    }

    pub fn policy(&self) -> Option<PolicyName> {
        self.session.as_ref().and_then(|session| session.policy)
    }

    pub fn checklist_kind(&self) -> Result<Option<ChecklistKind>, CovcheckError> {
        let name = match self.session.as_ref().and_then(|session| session.checklist.as_ref()) {
            Some(name) => name,
            None => return Ok(None),
        };
        if !self.items.is_empty() {
            // Custom items override any named checklist; the name is only a label.
            return Ok(None);
        }
        ChecklistKind::parse(name)
            .map(Some)
            .ok_or_else(|| CovcheckError::UnknownChecklist(name.clone()))
    }

    pub fn validate(&self) -> Result<(), CovcheckError> {
        if let Some(scoring) = &self.scoring {
            if let Some(default_threshold) = scoring.default_threshold {
                if default_threshold <= 0.0 {
                    return Err(CovcheckError::ConfigParse(
                        "scoring.default_threshold must be greater than 0".to_string(),
                    ));
                }
            }
            if let Some(priority_window) = scoring.priority_window {
                if priority_window == 0 {
                    return Err(CovcheckError::ConfigParse(
                        "scoring.priority_window must be greater than 0".to_string(),
                    ));
                }
            }
            if let Some(priority_bonus) = scoring.priority_bonus {
                if priority_bonus < 0.0 {
                    return Err(CovcheckError::ConfigParse(
                        "scoring.priority_bonus must not be negative".to_string(),
                    ));
                }
            }
            if let Some(topic_boost) = scoring.topic_boost {
                if topic_boost < 0.0 {
                    return Err(CovcheckError::ConfigParse(
                        "scoring.topic_boost must not be negative".to_string(),
                    ));
                }
            }
            if let Some(occurrence_point_value) = scoring.occurrence_point_value {
                if occurrence_point_value <= 0.0 {
                    return Err(CovcheckError::ConfigParse(
                        "scoring.occurrence_point_value must be greater than 0".to_string(),
                    ));
                }
            }
            if let Some(occurrence_cap) = scoring.occurrence_cap {
                if occurrence_cap <= 0.0 {
                    return Err(CovcheckError::ConfigParse(
                        "scoring.occurrence_cap must be greater than 0".to_string(),
                    ));
                }
            }
        }

        let mut seen_ids = HashSet::<&str>::new();
        for item in &self.items {
            let id = item.id.trim();
            if id.is_empty() {
                return Err(CovcheckError::ConfigParse(
                    "items entries must have a non-empty id".to_string(),
                ));
            }
            if !seen_ids.insert(id) {
                return Err(CovcheckError::ConfigParse(format!(
                    "duplicate item id: {id}"
                )));
            }
            // Items with an empty keyword list are legal (manual-only), but
            // blank keyword strings are configuration mistakes.
            if item.keywords.iter().any(|keyword| keyword.trim().is_empty()) {
                return Err(CovcheckError::ConfigParse(format!(
                    "item '{id}' contains a blank keyword"
                )));
            }
            if let Some(threshold) = item.threshold {
                if threshold <= 0.0 {
                    return Err(CovcheckError::ConfigParse(format!(
                        "item '{id}' threshold must be greater than 0"
                    )));
                }
            }
        }

        if let (Some(topics), false) = (&self.topics, self.items.is_empty()) {
            for (label, ids) in topics {
                for id in ids {
                    if !seen_ids.contains(id.as_str()) {
                        return Err(CovcheckError::ConfigParse(format!(
                            "topics.{label} references unknown item id: {id}"
                        )));
                    }
                }
            }
        }

        self.checklist_kind().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml_str = r#"
[session]
checklist = "follow-up"
policy = "diminishing"
"#;
        let cfg: CovcheckConfig = toml::from_str(toml_str).expect("minimal config should parse");
        assert_eq!(cfg.policy(), Some(PolicyName::Diminishing));
        assert_eq!(
            cfg.checklist_kind().expect("kind should resolve"),
            Some(ChecklistKind::FollowUp)
        );
    }

    #[test]
    fn parse_full_config_with_custom_items() {
        let toml_str = r#"
[session]
policy = "occurrence"

[scoring]
default_threshold = 5.0
priority_window = 3
priority_bonus = 0.1

[[items]]
id = "sleep"
text = "Sleep quality"
category = "symptoms"
keywords = ["sleep", "insomnia"]
threshold = 4.0

[topics]
sleep = ["sleep"]
"#;
        let cfg: CovcheckConfig = toml::from_str(toml_str).expect("full config should parse");
        cfg.validate().expect("config should validate");
        let settings = cfg.scoring_settings();
        assert_eq!(settings.default_threshold, 5.0);
        assert_eq!(settings.priority_window, 3);
        assert_eq!(settings.topic_boost, 2.0);
        assert_eq!(cfg.items.len(), 1);
    }

    #[test]
    fn default_settings_carry_stoplist() {
        let settings = ScoringSettings::default();
        assert!(settings.stoplist.contains(&"patient".to_string()));
        assert_eq!(settings.stoplist.len(), DEFAULT_STOPLIST.len());
    }

    #[test]
    fn validate_rejects_duplicate_item_ids() {
        let toml_str = r#"
[[items]]
id = "sleep"
text = "Sleep quality"
keywords = ["sleep"]

[[items]]
id = "sleep"
text = "Sleep again"
keywords = ["rest"]
"#;
        let cfg: CovcheckConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("duplicate item id"));
    }

    #[test]
    fn validate_rejects_dangling_topic_reference() {
        let toml_str = r#"
[[items]]
id = "sleep"
text = "Sleep quality"
keywords = ["sleep"]

[topics]
mood = ["depression"]
"#;
        let cfg: CovcheckConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("unknown item id"));
    }

    #[test]
    fn validate_rejects_nonpositive_threshold() {
        let toml_str = r#"
[scoring]
default_threshold = 0.0
"#;
        let cfg: CovcheckConfig = toml::from_str(toml_str).expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_allows_manual_only_items() {
        let toml_str = r#"
[[items]]
id = "forms"
text = "Consent forms signed"
keywords = []
"#;
        let cfg: CovcheckConfig = toml::from_str(toml_str).expect("config should parse");
        cfg.validate().expect("manual-only item should be legal");
    }

    #[test]
    fn validate_rejects_unknown_builtin_checklist() {
        let toml_str = r#"
[session]
checklist = "triage"
"#;
        let cfg: CovcheckConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("unknown checklist kind"));
    }
}
