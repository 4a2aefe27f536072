use crate::matching::count_occurrences;
use crate::types::checklist::ChecklistItem;
use crate::types::config::ScoringSettings;
use std::collections::HashMap;

/// Result of one fixed-weight full rescan.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceOutcome {
    /// Absolute point values per item id; these replace prior values.
    pub points: HashMap<String, f32>,
    /// Keywords with at least one occurrence, per item, in keyword-list order.
    pub matches: HashMap<String, Vec<String>>,
    pub keywords_matched: usize,
}

/// Rescans the entire current transcript from scratch: every whole-word
/// occurrence of a keyword earns `occurrence_point_value` points, capped at
/// `occurrence_cap` per item. No per-session memory, so scores follow
/// transcript edits up as well as down.
pub fn score_full(
    transcript: &str,
    items: &[ChecklistItem],
    settings: &ScoringSettings,
) -> OccurrenceOutcome {
    let mut outcome = OccurrenceOutcome::default();
    if transcript.trim().is_empty() {
        return outcome;
    }
    let haystack = transcript.to_lowercase();

    for item in items {
        if item.keywords.is_empty() {
            continue;
        }
        let mut total = 0usize;
        let mut matched = Vec::new();
        for keyword in &item.keywords {
            let keyword = keyword.to_lowercase();
            let count = count_occurrences(&haystack, &keyword);
            if count > 0 {
                total += count;
                matched.push(keyword);
            }
        }

        let value = settings
            .occurrence_cap
            .min(total as f32 * settings.occurrence_point_value);
        outcome.points.insert(item.id.clone(), value);
        if !matched.is_empty() {
            outcome.keywords_matched += matched.len();
            outcome.matches.insert(item.id.clone(), matched);
        }
    }

    outcome
}
