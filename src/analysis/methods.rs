//! Method Boundary Scanner
//!
//! Finds method-like signatures in stripped source and measures their bodies
//! by brace counting.
//!
//! ## Detection
//!
//! A candidate is a line starting with a modifier keyword (`public`,
//! `private`, `static`, ...), running up to a closing parenthesis without
//! crossing `;`, `{` or a newline, and followed by an opening brace:
//!
//! ```csharp
//! private IEnumerator SpawnWave(int count)
//! {
//!     ...
//! }
//! ```
//!
//! Control statements never start with a modifier, so they are not matched.
//! Anything else shaped like modifier + `)` + `{` is, and false positives are
//! accepted.
//!
//! ## Body Span
//!
//! From the opening brace every `{` and `}` counts, nested or not. The close
//! is where the depth first returns to zero. Bodies that never close are
//! dropped silently.

use super::alternation;
use crate::config::{SyntaxConfig, DEFAULT_LINE_THRESHOLD};
use crate::error::Result;
use regex::Regex;
use std::sync::OnceLock;

/// Name used when the signature has no recognizable identifier before `(`
pub const PLACEHOLDER_NAME: &str = "Method";

/// A method candidate located in stripped text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpan {
    /// Line of the signature (0-based)
    pub start_line: usize,
    /// Line of the closing brace (0-based, inclusive)
    pub end_line: usize,
    /// Signature text without surrounding whitespace
    pub signature: String,
    pub name: String,
}

impl MethodSpan {
    /// Newlines between the signature and the closing brace
    pub fn line_span(&self) -> usize {
        self.end_line - self.start_line
    }
}

/// Locates method bodies and flags the ones longer than a threshold
pub struct MethodScanner {
    /// `None` when no modifiers are configured; nothing is detected then
    signature: Option<Regex>,
    threshold: usize,
}

impl MethodScanner {
    pub fn new(syntax: &SyntaxConfig, threshold: usize) -> Result<Self> {
        let signature = match alternation(&syntax.modifiers) {
            Some(modifiers) => Some(Regex::new(&format!(
                r"(?m)(^[ \t]*(?:{})\b[^;\n{{]*\))\s*\{{",
                modifiers
            ))?),
            None => None,
        };

        Ok(Self {
            signature,
            threshold,
        })
    }

    /// Scanner with the built-in C# modifiers and the default threshold
    pub fn csharp() -> Result<Self> {
        Self::new(&SyntaxConfig::default(), DEFAULT_LINE_THRESHOLD)
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// All candidates whose body is terminated, in source order
    pub fn scan(&self, text: &str) -> Vec<MethodSpan> {
        let mut spans = Vec::new();
        let Some(signature) = &self.signature else {
            return spans;
        };

        for caps in signature.captures_iter(text) {
            let (Some(whole), Some(sig)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            // The match always ends on the body's opening brace
            let open_brace = whole.end() - 1;
            let Some(close_brace) = find_matching_close(text, open_brace) else {
                continue;
            };

            let signature = sig.as_str().trim().to_string();
            let name = extract_method_name(&signature)
                .unwrap_or(PLACEHOLDER_NAME)
                .to_string();

            spans.push(MethodSpan {
                start_line: count_newlines(&text[..sig.start()]),
                end_line: count_newlines(&text[..close_brace]),
                signature,
                name,
            });
        }

        spans
    }

    /// Candidates whose body spans more lines than the threshold
    pub fn flagged(&self, text: &str) -> Vec<MethodSpan> {
        self.scan(text)
            .into_iter()
            .filter(|span| span.line_span() > self.threshold)
            .collect()
    }
}

/// Byte offset of the brace closing the one at `open`, if any
pub fn find_matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth: i64 = 0;

    for (offset, byte) in text.as_bytes()[open..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }

    None
}

/// First identifier directly followed by `(` (whitespace allowed between)
pub fn extract_method_name(signature: &str) -> Option<&str> {
    call_name()
        .captures(signature)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn call_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("call name regex is valid")
    })
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count()
}
