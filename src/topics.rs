use crate::error::{CovcheckError, Result};
use crate::types::config::ScoringSettings;
use crate::types::coverage::AnalysisMethod;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// One semantic label from the external speech analysis service.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicSignal {
    pub topic: String,
    pub confidence_score: f32,
}

/// Out-of-band semantic input. Modeled as a tagged variant rather than an
/// optional list so the fallback path is an explicit, exhaustively handled
/// case.
#[derive(Debug, Clone, Default)]
pub enum SemanticInput {
    Topics(Vec<TopicSignal>),
    #[default]
    NoSignal,
}

#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    /// Extra points per item id, on top of (never instead of) the keyword
    /// scorer's result.
    pub boosts: HashMap<String, f32>,
    pub method: AnalysisMethod,
}

/// Blends topic signals with the keyword path. With no signals, or no mapped
/// label, the outcome carries no boosts and the keyword-only result stands
/// unchanged. Each topic label is credited at most once per session via the
/// caller-owned `processed_topics` set, so repeated deliveries are harmless.
pub fn reconcile(
    input: &SemanticInput,
    topic_map: &HashMap<String, Vec<String>>,
    processed_topics: &mut HashSet<String>,
    settings: &ScoringSettings,
) -> ReconcileOutcome {
    let signals = match input {
        SemanticInput::Topics(signals) if !signals.is_empty() => signals,
        _ => return ReconcileOutcome::default(),
    };

    let mut outcome = ReconcileOutcome::default();
    for signal in signals {
        let label = signal.topic.trim().to_lowercase();
        if label.is_empty() {
            continue;
        }
        let item_ids = match topic_map.get(&label) {
            Some(item_ids) => item_ids,
            // Unmapped labels degrade silently to the keyword path.
            None => {
                debug!(topic = %label, "no mapping for topic label, ignoring");
                continue;
            }
        };
        outcome.method = AnalysisMethod::Hybrid;
        if !processed_topics.insert(label.clone()) {
            continue;
        }
        let confidence = if signal.confidence_score.is_finite() {
            signal.confidence_score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        for item_id in item_ids {
            *outcome.boosts.entry(item_id.clone()).or_insert(0.0) +=
                confidence * settings.topic_boost;
        }
    }

    outcome
}

/// Parses the service's JSON payload: `[{"topic": ..., "confidence_score": ...}]`.
pub fn parse_signals(json: &str) -> Result<Vec<TopicSignal>> {
    serde_json::from_str(json).map_err(|error| CovcheckError::TopicParse(error.to_string()))
}
