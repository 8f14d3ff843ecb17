//! Plain-text unused-type report
//!
//! ```text
//! Likely unused scripts (classes/structs only referenced where defined):
//!
//! AI/Zombie/ZombieBite.cs
//!   - ZombieBite
//!
//! ```

use crate::analysis::UnusedReport;

pub const REPORT_HEADER: &str =
    "Likely unused scripts (classes/structs only referenced where defined):";

pub struct TextReporter;

impl TextReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &UnusedReport) -> String {
        let mut out = String::new();
        out.push_str(REPORT_HEADER);
        out.push_str("\n\n");

        for (file, names) in report.files() {
            out.push_str(file);
            out.push('\n');
            for name in names {
                out.push_str(&format!("  - {}\n", name));
            }
            out.push('\n');
        }

        out
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}
