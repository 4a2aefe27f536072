use crate::types::coverage::CoverageReport;

pub fn to_json(report: &CoverageReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
