pub mod json;
pub mod md;

use crate::error::CovcheckError;
use crate::types::coverage::CoverageReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &CoverageReport, format: OutputFormat) -> Result<String, CovcheckError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(CovcheckError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
