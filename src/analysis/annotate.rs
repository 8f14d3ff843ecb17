//! Complexity Annotator
//!
//! Inserts a marker comment above every flagged method signature:
//!
//! ```csharp
//!     // Core logic for SpawnWave. Involves multiple steps and state changes.
//!     private IEnumerator SpawnWave(int count)
//! ```
//!
//! Every insertion shifts the lines below it, so markers are collected as
//! patches keyed by their original line index and applied together in one
//! pass over the line buffer. Each marker therefore lands above the line its
//! span was measured against, however many markers precede it.

use super::MethodSpan;
use std::collections::BTreeMap;

pub struct ComplexityAnnotator {
    comment_marker: String,
}

impl ComplexityAnnotator {
    pub fn new(comment_marker: impl Into<String>) -> Self {
        Self {
            comment_marker: comment_marker.into(),
        }
    }

    /// Marker line for `name`, without indentation
    pub fn marker(&self, name: &str) -> String {
        format!(
            "{} Core logic for {}. Involves multiple steps and state changes.",
            self.comment_marker, name
        )
    }

    /// Insert markers for `spans` into `text`
    pub fn annotate(&self, text: &str, spans: &[MethodSpan]) -> String {
        if spans.is_empty() {
            return text.to_string();
        }

        let lines: Vec<&str> = text.split('\n').collect();

        let mut patches: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for span in spans {
            let anchor = lines.get(span.start_line).copied();
            let indent = anchor.map(leading_indent).unwrap_or("");
            let line_ending = match anchor {
                Some(line) if line.ends_with('\r') => "\r",
                _ => "",
            };

            patches.entry(span.start_line).or_default().push(format!(
                "{}{}{}",
                indent,
                self.marker(&span.name),
                line_ending
            ));
        }

        let mut out: Vec<String> = Vec::with_capacity(lines.len() + spans.len());
        for (idx, line) in lines.iter().enumerate() {
            if let Some(markers) = patches.remove(&idx) {
                out.extend(markers);
            }
            out.push(line.to_string());
        }
        // Anchors past the end of the buffer
        for (_, markers) in patches {
            out.extend(markers);
        }

        out.join("\n")
    }
}

impl Default for ComplexityAnnotator {
    fn default() -> Self {
        Self::new("//")
    }
}

fn leading_indent(line: &str) -> &str {
    let trimmed = line.trim_start_matches(|c: char| c == ' ' || c == '\t');
    &line[..line.len() - trimmed.len()]
}
