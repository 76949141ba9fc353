//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::report::AnalysisReport;
use crate::error::Result;

/// Writes the analysis report to a file as pretty-printed JSON.
pub fn write_json(report: &AnalysisReport, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(report)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the analysis report to a pretty-printed JSON string.
pub fn to_json(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
