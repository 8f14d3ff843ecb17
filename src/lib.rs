//! codescrub - comment stripping and unused-type reporting for C# trees
//!
//! Rewrites a source tree into a cleaned mirror and reports types that look
//! unused. Everything is lexical: regexes and brace counting, no parser.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **File Discovery** - Find all source files by extension
//! 2. **Indexing** - Collect `class`/`struct` definitions and count mentions
//! 3. **Stripping** - Remove block, doc and line comments, keeping line numbers
//! 4. **Annotation** - Mark methods whose body exceeds the line threshold
//! 5. **Reporting** - Write the cleaned tree and the unused-type report

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod report;

pub use analysis::{
    CommentStripper, ComplexityAnnotator, FileScrubber, MethodScanner, MethodSpan, SymbolIndex,
    SymbolIndexer, UnusedReport,
};
pub use config::{Config, SyntaxConfig};
pub use discovery::{FileFinder, SourceFile, SourceUnit};
pub use error::{Result, ScrubError};
pub use pipeline::{Pipeline, RunSummary};
pub use report::{ReportFormat, Reporter};
