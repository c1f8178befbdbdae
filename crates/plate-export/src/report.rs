use std::path::Path;

use plate_ops::{Diagnostics, PlateOutput};
use serde::Serialize;

use crate::errors::ExportError;

/// JSON summary of one run, written next to the exported plates.
#[derive(Debug, Clone, Serialize)]
pub struct PlateReport<'a> {
    pub source: &'a str,
    pub footprint: [f64; 2],
    pub diagnostics: &'a Diagnostics,
}

impl<'a> PlateReport<'a> {
    pub fn new(source: &'a str, output: &'a PlateOutput) -> Self {
        Self {
            source,
            footprint: [output.footprint.0, output.footprint.1],
            diagnostics: &output.diagnostics,
        }
    }
}

/// Pretty-print the report as JSON to `path`.
pub fn write_report(path: &Path, report: &PlateReport<'_>) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(report).map_err(|e| ExportError::Report {
        reason: e.to_string(),
    })?;
    std::fs::write(path, json).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
