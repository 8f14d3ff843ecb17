//! Comment Stripper
//!
//! Removes comments from source text while keeping a 1:1 line correspondence
//! with the input, so line numbers in the output still point at the same code.
//!
//! ## Algorithm
//!
//! 1. Remove block comments (`/* ... */`). Matching is non-nested: the first
//!    close after an open ends the comment. Newlines inside a removed comment
//!    are kept.
//! 2. Blank out full-line doc comments (`/// ...`).
//! 3. Truncate every line at the first line-comment marker (`//`) and trim
//!    trailing whitespace.
//!
//! ## Known Limitations
//!
//! String and character literals are not recognized. A `"http://..."` literal
//! is truncated at `//`, and a `/*` inside a literal opens a block comment.

use crate::config::SyntaxConfig;
use crate::error::Result;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Strips comments according to a [`SyntaxConfig`]
pub struct CommentStripper {
    /// `None` when either block marker is empty
    block_comment: Option<Regex>,
    /// `None` when the doc marker is empty
    doc_line: Option<Regex>,
    line_marker: String,
}

impl CommentStripper {
    pub fn new(syntax: &SyntaxConfig) -> Result<Self> {
        let block_comment = if syntax.block_comment_open.is_empty()
            || syntax.block_comment_close.is_empty()
        {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?s){}.*?{}",
                regex::escape(&syntax.block_comment_open),
                regex::escape(&syntax.block_comment_close)
            ))?)
        };
        let doc_line = if syntax.doc_comment.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?m)^[ \t]*{}[^\r\n]*",
                regex::escape(&syntax.doc_comment)
            ))?)
        };

        Ok(Self {
            block_comment,
            doc_line,
            line_marker: syntax.line_comment.clone(),
        })
    }

    /// Strip all comments from `source`. Empty markers disable their pass.
    pub fn strip(&self, source: &str) -> String {
        let without_blocks = match &self.block_comment {
            Some(re) => re.replace_all(source, |caps: &Captures| newlines_only(&caps[0])),
            None => Cow::Borrowed(source),
        };
        let without_docs = match &self.doc_line {
            Some(re) => re.replace_all(&without_blocks, ""),
            None => Cow::Borrowed(&*without_blocks),
        };

        without_docs
            .split('\n')
            .map(|line| self.strip_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Truncate a single line at the first line-comment marker
    fn strip_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if self.line_marker.is_empty() {
            return Cow::Borrowed(line);
        }

        let (body, line_ending) = match line.strip_suffix('\r') {
            Some(body) => (body, "\r"),
            None => (line, ""),
        };

        match body.find(&self.line_marker) {
            Some(idx) => Cow::Owned(format!("{}{}", body[..idx].trim_end(), line_ending)),
            None => Cow::Borrowed(line),
        }
    }
}

/// Keep only the line breaks of a removed comment
fn newlines_only(comment: &str) -> String {
    comment.chars().filter(|c| *c == '\n').collect()
}
