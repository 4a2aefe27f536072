use serde::Serialize;

/// Which analysis path produced a scoring result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    /// Topic signals were reconciled with the keyword scorer.
    Hybrid,
    /// Keyword matching only; no usable semantic signal.
    #[default]
    Fallback,
}

impl AnalysisMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMethod::Hybrid => "hybrid",
            AnalysisMethod::Fallback => "fallback",
        }
    }
}

/// Per-item view of a session's coverage, in checklist order.
#[derive(Debug, Clone, Serialize)]
pub struct ItemCoverage {
    pub id: String,
    pub text: String,
    pub category: String,
    pub points: f32,
    pub threshold: f32,
    pub complete: bool,
    pub matched_keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub checklist: String,
    pub policy: String,
    pub method: AnalysisMethod,
    pub generated_at: String,
    pub completed_count: usize,
    pub total_count: usize,
    pub items: Vec<ItemCoverage>,
}

impl CoverageReport {
    pub fn fully_complete(&self) -> bool {
        self.completed_count == self.total_count
    }
}
