mod colors;
mod json;
mod terminal;
mod text;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;
pub use text::{TextReporter, REPORT_HEADER};

use crate::analysis::UnusedReport;
use crate::error::Result;
use crate::output::write_file;
use std::path::Path;

/// Output format for the unused-type report file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text, one block per file
    #[default]
    Text,
    /// JSON machine-readable format
    Json,
}

/// Renders the unused-type report and writes it to disk
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    pub fn render(&self, report: &UnusedReport) -> Result<String> {
        match self.format {
            ReportFormat::Text => Ok(TextReporter::new().render(report)),
            ReportFormat::Json => JsonReporter::new().render(report),
        }
    }

    /// Render `report` and write it to `path`
    pub fn write(&self, report: &UnusedReport, path: &Path) -> Result<()> {
        let rendered = self.render(report)?;
        write_file(path, &rendered)
    }
}
