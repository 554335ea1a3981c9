use std::path::Path;

use crate::errors::GenerationError;
use crate::model::GenerationReport;

/// Persist a run report as pretty JSON.
pub fn write_report(path: &Path, report: &GenerationReport) -> Result<(), GenerationError> {
    std::fs::write(path, serde_json::to_vec_pretty(report)?)?;
    Ok(())
}
