use crate::scoring::{diminishing, occurrence, PassDiagnostics, ScoringPolicy};
use crate::topics::{reconcile, SemanticInput};
use crate::types::checklist::{Checklist, ChecklistItem};
use crate::types::config::ScoringSettings;
use crate::types::coverage::{AnalysisMethod, CoverageReport, ItemCoverage};
use chrono::Utc;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

/// Mutable per-session coverage state. Keyword points and topic boosts are
/// kept apart so a full rescan under the occurrence policy cannot erase
/// semantic credit, and the keyword-only result stays a floor.
#[derive(Debug, Clone, Default)]
struct SessionState {
    keyword_points: HashMap<String, f32>,
    topic_points: HashMap<String, f32>,
    completed: BTreeSet<String>,
    manually_cleared: BTreeSet<String>,
    processed_keywords: HashMap<String, HashSet<String>>,
    processed_topics: HashSet<String>,
    matched_keywords: HashMap<String, Vec<String>>,
}

/// Owns one recording/editing session: the accumulated transcript, the
/// item-points map and the completed set, with the scorers applied on every
/// update. Single logical thread; one pass runs to completion per update.
pub struct CoverageSession {
    checklist: Checklist,
    settings: ScoringSettings,
    policy: ScoringPolicy,
    transcript: String,
    // Last final segment appended, for dropping duplicate deliveries of the
    // same final event from the speech service.
    last_final_update: Option<String>,
    state: SessionState,
    method: AnalysisMethod,
}

impl CoverageSession {
    pub fn new(checklist: Checklist, policy: ScoringPolicy, settings: ScoringSettings) -> Self {
        Self {
            checklist,
            settings,
            policy,
            transcript: String::new(),
            last_final_update: None,
            state: SessionState::default(),
            method: AnalysisMethod::Fallback,
        }
    }

    pub fn method(&self) -> AnalysisMethod {
        self.method
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Accepts one transcript update (an incremental append from the stream,
    /// or a whole pasted transcript for a fresh session) and re-scores.
    /// Blank updates are ignored with prior state preserved. A final segment
    /// re-delivered back-to-back is dropped rather than appended, so a
    /// duplicate upstream event cannot inflate occurrence counts.
    pub fn ingest(&mut self, update: &str, is_final: bool) {
        let update = update.trim();
        if update.is_empty() {
            debug!("ignoring blank transcript update");
            return;
        }
        if is_final && self.last_final_update.as_deref() == Some(update) {
            debug!("ignoring duplicate final transcript segment");
            return;
        }
        self.last_final_update = is_final.then(|| update.to_string());
        if !self.transcript.is_empty() {
            self.transcript.push(' ');
        }
        self.transcript.push_str(update);
        self.rescore(is_final);
    }

    /// Merges out-of-band topic signals; callable at any time, with or
    /// without a corresponding transcript update.
    pub fn apply_topics(&mut self, input: SemanticInput) {
        let outcome = reconcile(
            &input,
            &self.checklist.topic_map,
            &mut self.state.processed_topics,
            &self.settings,
        );
        if outcome.method == AnalysisMethod::Hybrid {
            self.method = AnalysisMethod::Hybrid;
        }
        let boost_total: f32 = outcome.boosts.values().sum();
        for (item_id, boost) in outcome.boosts {
            *self.state.topic_points.entry(item_id).or_insert(0.0) += boost;
        }
        self.auto_complete();
        debug!(
            method = self.method.as_str(),
            boost_total, "topic reconciliation pass"
        );
    }

    /// Completion flip, independent of the numeric score. Toggling off marks
    /// the item so auto-completion will not silently re-complete it. Ids not
    /// on the checklist are ignored; they could never be rendered.
    pub fn toggle_item(&mut self, item_id: &str) {
        if self.checklist.item(item_id).is_none() {
            warn!(item_id, "toggling id not present in checklist");
            return;
        }
        if self.state.completed.remove(item_id) {
            self.state.manually_cleared.insert(item_id.to_string());
        } else {
            self.state.completed.insert(item_id.to_string());
            self.state.manually_cleared.remove(item_id);
        }
    }

    /// Hard state clear; used when a session is discarded or restarted.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.last_final_update = None;
        self.state = SessionState::default();
        self.method = AnalysisMethod::Fallback;
    }

    pub fn points(&self, item_id: &str) -> f32 {
        self.state.keyword_points.get(item_id).copied().unwrap_or(0.0)
            + self.state.topic_points.get(item_id).copied().unwrap_or(0.0)
    }

    pub fn is_complete(&self, item_id: &str) -> bool {
        self.state.completed.contains(item_id)
    }

    pub fn snapshot(&self) -> Vec<ItemCoverage> {
        self.checklist
            .items
            .iter()
            .map(|item| ItemCoverage {
                id: item.id.clone(),
                text: item.text.clone(),
                category: item.category.clone(),
                points: self.points(&item.id),
                threshold: self.completion_bar(item),
                complete: self.state.completed.contains(&item.id),
                matched_keywords: self
                    .state
                    .matched_keywords
                    .get(&item.id)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect()
    }

    pub fn report(&self) -> CoverageReport {
        let items = self.snapshot();
        let completed_count = items.iter().filter(|item| item.complete).count();
        CoverageReport {
            checklist: self.checklist.name.clone(),
            policy: self.policy.as_str().to_string(),
            method: self.method,
            generated_at: Utc::now().to_rfc3339(),
            completed_count,
            total_count: items.len(),
            items,
        }
    }

    fn rescore(&mut self, is_final: bool) {
        let before: f32 = self.total_points();
        let (items_touched, keywords_matched) = match self.policy {
            ScoringPolicy::DiminishingReturns => {
                let outcome = diminishing::score_update(
                    &self.transcript,
                    &self.checklist.items,
                    &mut self.state.processed_keywords,
                    &self.settings,
                );
                for (item_id, delta) in &outcome.deltas {
                    *self
                        .state
                        .keyword_points
                        .entry(item_id.clone())
                        .or_insert(0.0) += delta;
                }
                for (item_id, keywords) in outcome.new_matches {
                    self.state
                        .matched_keywords
                        .entry(item_id)
                        .or_default()
                        .extend(keywords);
                }
                (outcome.deltas.len(), outcome.keywords_matched)
            }
            ScoringPolicy::FixedWeightOccurrence => {
                let outcome =
                    occurrence::score_full(&self.transcript, &self.checklist.items, &self.settings);
                let items_touched = outcome.matches.len();
                self.state.keyword_points = outcome.points;
                self.state.matched_keywords = outcome.matches;
                (items_touched, outcome.keywords_matched)
            }
        };
        self.auto_complete();
        let diagnostics = PassDiagnostics {
            items_touched,
            keywords_matched,
            points_delta: self.total_points() - before,
        };
        debug!(
            method = self.method.as_str(),
            policy = self.policy.as_str(),
            is_final,
            items_touched = diagnostics.items_touched,
            keywords_matched = diagnostics.keywords_matched,
            points_delta = diagnostics.points_delta,
            "scoring pass"
        );
    }

    // Monotonic auto-completion: ids are only ever added here, and manually
    // cleared ids are skipped until the user toggles them back on.
    fn auto_complete(&mut self) {
        let newly_complete = self
            .checklist
            .items
            .iter()
            .filter(|item| !self.state.completed.contains(&item.id))
            .filter(|item| !self.state.manually_cleared.contains(&item.id))
            .filter(|item| self.points(&item.id) >= self.completion_bar(item))
            .map(|item| item.id.clone())
            .collect::<Vec<_>>();
        for item_id in newly_complete {
            debug!(item_id = %item_id, "auto-completing item");
            self.state.completed.insert(item_id);
        }
    }

    fn completion_bar(&self, item: &ChecklistItem) -> f32 {
        match self.policy {
            ScoringPolicy::DiminishingReturns => {
                item.effective_threshold(self.settings.default_threshold)
            }
            ScoringPolicy::FixedWeightOccurrence => self.settings.occurrence_cap,
        }
    }

    fn total_points(&self) -> f32 {
        self.checklist
            .items
            .iter()
            .map(|item| self.points(&item.id))
            .sum()
    }
}
