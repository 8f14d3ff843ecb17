//! Centralized color scheme for console output

use colored::{ColoredString, Colorize};

/// Structural element colors
pub struct StructureColors;

impl StructureColors {
    /// File path header
    pub fn file_path(text: &str) -> ColoredString {
        text.cyan().bold()
    }

    /// Type or method name
    pub fn symbol_name(text: &str) -> ColoredString {
        text.white().bold()
    }

    /// Count/statistics numbers
    pub fn count(text: &str) -> ColoredString {
        text.white().bold()
    }

    /// Secondary information (paths written, timings)
    pub fn detail(text: &str) -> ColoredString {
        text.dimmed()
    }
}

/// Box drawing characters
pub struct BoxChars;

impl BoxChars {
    /// Heavy separator line
    pub fn heavy_line(width: usize) -> String {
        "━".repeat(width)
    }
}
