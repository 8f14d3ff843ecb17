use crate::analysis::UnusedReport;
use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    total_files: usize,
    total_symbols: usize,
    files: Vec<JsonFile<'a>>,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a str,
    symbols: Vec<&'a str>,
}

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &UnusedReport) -> Result<String> {
        let json = JsonReport {
            version: env!("CARGO_PKG_VERSION"),
            total_files: report.file_count(),
            total_symbols: report.total_symbols(),
            files: report
                .files()
                .map(|(path, names)| JsonFile {
                    path,
                    symbols: names.iter().map(String::as_str).collect(),
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&json)?)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
