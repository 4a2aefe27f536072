use crate::matching::matches_word_variation;
use crate::types::checklist::ChecklistItem;
use crate::types::config::ScoringSettings;
use std::collections::{HashMap, HashSet};

const FIRST_KEYWORD_POINTS: f32 = 0.5;
const EARLY_KEYWORD_POINTS: f32 = 0.25;
const LATE_KEYWORD_POINTS: f32 = 0.125;
const DIVERSITY_BURST_MIN: usize = 3;
const DIVERSITY_STEP: f32 = 0.5;
const DIVERSITY_CAP: f32 = 1.0;

/// Result of one diminishing-returns pass over the accumulated transcript.
#[derive(Debug, Clone, Default)]
pub struct DiminishingOutcome {
    /// Point deltas to add per item id. Absent items gained nothing.
    pub deltas: HashMap<String, f32>,
    /// Keywords newly credited this pass, per item, in keyword-list order.
    pub new_matches: HashMap<String, Vec<String>>,
    pub keywords_matched: usize,
}

/// Scores one transcript update, crediting each keyword at most once per
/// session via the caller-owned `processed` sets. Re-running on an unchanged
/// transcript is a no-op, which also makes duplicate final segments from the
/// speech service harmless.
pub fn score_update(
    transcript: &str,
    items: &[ChecklistItem],
    processed: &mut HashMap<String, HashSet<String>>,
    settings: &ScoringSettings,
) -> DiminishingOutcome {
    let mut outcome = DiminishingOutcome::default();
    if transcript.trim().is_empty() {
        return outcome;
    }
    let haystack = transcript.to_lowercase();

    for item in items {
        if item.keywords.is_empty() {
            continue;
        }
        let seen = processed.entry(item.id.clone()).or_default();
        let mut delta = 0.0f32;
        let mut new_keywords = Vec::new();

        for (index, keyword) in item.keywords.iter().enumerate() {
            let keyword = keyword.to_lowercase();
            if settings.stoplist.contains(&keyword) {
                continue;
            }
            if seen.contains(&keyword) {
                continue;
            }
            if !matches_word_variation(&haystack, &keyword) {
                continue;
            }
            seen.insert(keyword.clone());
            delta += match seen.len() {
                1 => FIRST_KEYWORD_POINTS,
                2 | 3 => EARLY_KEYWORD_POINTS,
                _ => LATE_KEYWORD_POINTS,
            };
            if index < settings.priority_window {
                delta += settings.priority_bonus;
            }
            new_keywords.push(keyword);
        }

        // Three or more distinct new keywords in one update means the topic
        // was genuinely discussed, not grazed.
        if new_keywords.len() >= DIVERSITY_BURST_MIN {
            delta += DIVERSITY_CAP.min((new_keywords.len() - 2) as f32 * DIVERSITY_STEP);
        }

        if !new_keywords.is_empty() {
            outcome.keywords_matched += new_keywords.len();
            outcome.deltas.insert(item.id.clone(), delta);
            outcome.new_matches.insert(item.id.clone(), new_keywords);
        }
    }

    outcome
}
