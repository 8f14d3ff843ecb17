// Lexical analysis - comment stripping, long-method annotation and
// unused-type indexing. Everything here is pattern matching over text;
// nothing builds a syntax tree.

mod annotate;
mod methods;
mod strip;
mod symbols;

pub use annotate::ComplexityAnnotator;
pub use methods::{
    extract_method_name, find_matching_close, MethodScanner, MethodSpan, PLACEHOLDER_NAME,
};
pub use strip::CommentStripper;
pub use symbols::{SymbolIndex, SymbolIndexer, UnusedReport};

use crate::config::Config;
use crate::error::Result;

/// Escaped `a|b|c` alternation of the non-empty `words`, `None` if there are none
pub(crate) fn alternation(words: &[String]) -> Option<String> {
    let escaped: Vec<String> = words
        .iter()
        .filter(|word| !word.is_empty())
        .map(|word| regex::escape(word))
        .collect();
    if escaped.is_empty() {
        None
    } else {
        Some(escaped.join("|"))
    }
}

/// Result of scrubbing one file
#[derive(Debug, Clone)]
pub struct ScrubbedText {
    /// Stripped and annotated text
    pub text: String,
    /// Methods that received a marker, in source order
    pub annotated: Vec<MethodSpan>,
}

/// Per-file transformation: strip, scan, annotate
pub struct FileScrubber {
    stripper: CommentStripper,
    scanner: MethodScanner,
    annotator: ComplexityAnnotator,
}

impl FileScrubber {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            stripper: CommentStripper::new(&config.syntax)?,
            scanner: MethodScanner::new(&config.syntax, config.line_threshold)?,
            annotator: ComplexityAnnotator::new(config.syntax.line_comment.clone()),
        })
    }

    pub fn scrub(&self, source: &str) -> ScrubbedText {
        let stripped = self.stripper.strip(source);
        let annotated = self.scanner.flagged(&stripped);
        let text = self.annotator.annotate(&stripped, &annotated);

        ScrubbedText { text, annotated }
    }
}
