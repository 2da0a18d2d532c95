pub mod json;
pub mod md;

use crate::error::ReelPassError;
use crate::scoring::ScoreReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &ScoreReport, format: OutputFormat) -> Result<String, ReelPassError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ReelPassError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
