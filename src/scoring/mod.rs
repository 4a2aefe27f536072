pub mod diminishing;
pub mod occurrence;

use crate::types::config::PolicyName;

/// The canonical scoring policies. Both are preserved as explicit variants;
/// there is no hybrid of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// Incremental, rewards breadth: tiered per-keyword deltas with a
    /// processed-keywords set, priority and diversity bonuses. Points only
    /// grow within a session.
    DiminishingReturns,
    /// Full rescan: every whole-word occurrence earns a fixed point value,
    /// capped per item. Idempotent and tolerant of transcript edits.
    FixedWeightOccurrence,
}

impl ScoringPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringPolicy::DiminishingReturns => "diminishing",
            ScoringPolicy::FixedWeightOccurrence => "occurrence",
        }
    }
}

impl From<PolicyName> for ScoringPolicy {
    fn from(name: PolicyName) -> Self {
        match name {
            PolicyName::Diminishing => ScoringPolicy::DiminishingReturns,
            PolicyName::Occurrence => ScoringPolicy::FixedWeightOccurrence,
        }
    }
}

/// Structured diagnostics for one scoring pass, emitted via tracing.
/// Observability only; never consulted by the scorers themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassDiagnostics {
    pub items_touched: usize,
    pub keywords_matched: usize,
    pub points_delta: f32,
}
