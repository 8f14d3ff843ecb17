//! Terminal summary of a run

use crate::pipeline::RunSummary;
use crate::report::colors::{BoxChars, StructureColors};
use colored::Colorize;

/// Prints what a run produced
pub struct TerminalReporter {
    /// List every annotated method and unused type, not just the counts
    detailed: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { detailed: false }
    }

    pub fn with_details(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    pub fn report(&self, summary: &RunSummary) {
        println!();
        println!("{}", "codescrub".cyan().bold());
        println!("{}", BoxChars::heavy_line(50));

        if summary.files_found == 0 {
            println!("{}", "No source files found.".yellow());
        }

        if self.detailed {
            self.print_annotated(summary);
            self.print_unused(summary);
        }

        println!(
            "  Files processed:     {}",
            StructureColors::count(&summary.files_written.to_string())
        );
        if summary.files_skipped > 0 {
            println!(
                "  Files skipped:       {}",
                summary.files_skipped.to_string().yellow().bold()
            );
        }
        println!(
            "  Methods annotated:   {}",
            StructureColors::count(&summary.annotated.len().to_string())
        );
        println!(
            "  Likely unused types: {} in {} files",
            StructureColors::count(&summary.unused.total_symbols().to_string()),
            StructureColors::count(&summary.unused.file_count().to_string())
        );
        println!();
        println!(
            "  {} {}",
            "Cleaned code:".dimmed(),
            StructureColors::detail(&summary.output_root.display().to_string())
        );
        println!(
            "  {} {}",
            "Unused report:".dimmed(),
            StructureColors::detail(&summary.report_path.display().to_string())
        );
        println!(
            "{}",
            format!("⏱  Done in {:.2}s", summary.elapsed.as_secs_f64()).dimmed()
        );
    }

    fn print_annotated(&self, summary: &RunSummary) {
        if summary.annotated.is_empty() {
            return;
        }

        println!();
        println!("{}", "Long methods:".yellow().bold());
        for method in &summary.annotated {
            println!(
                "  {}:{}  {} ({} lines)",
                StructureColors::file_path(&method.file),
                method.line,
                StructureColors::symbol_name(&method.name),
                method.line_span
            );
        }
    }

    fn print_unused(&self, summary: &RunSummary) {
        if summary.unused.is_empty() {
            return;
        }

        println!();
        println!("{}", "Likely unused types:".yellow().bold());
        for (file, names) in summary.unused.files() {
            println!("  {}", StructureColors::file_path(file));
            for name in names {
                println!("    {} {}", "○".dimmed(), StructureColors::symbol_name(name));
            }
        }
        println!();
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
