//! Error types for a scrub run
//!
//! Only configuration and output-side failures surface here. Unreadable input
//! files and malformed constructs are recovered where they happen.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrubError>;

#[derive(Debug, Error, Diagnostic)]
pub enum ScrubError {
    #[error("failed to read config file {}", path.display())]
    #[diagnostic(code(codescrub::config::read))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {message}", path.display())]
    #[diagnostic(
        code(codescrub::config::parse),
        help("config files are TOML (.toml) or YAML (.yml, .yaml)")
    )]
    ConfigParse { path: PathBuf, message: String },

    #[error("invalid syntax pattern")]
    #[diagnostic(
        code(codescrub::config::pattern),
        help("check the [syntax] section of your config file")
    )]
    Pattern(#[from] regex::Error),

    #[error("input directory {} does not exist", .0.display())]
    #[diagnostic(code(codescrub::input::missing))]
    MissingInput(PathBuf),

    #[error("output directory {} overlaps input directory {}", output.display(), input.display())]
    #[diagnostic(
        code(codescrub::output::overlap),
        help("the output directory is deleted at the start of every run; point it outside the input tree")
    )]
    OverlappingRoots { input: PathBuf, output: PathBuf },

    #[error("failed to prepare output directory {}", path.display())]
    #[diagnostic(code(codescrub::output::prepare))]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    #[diagnostic(code(codescrub::output::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report")]
    #[diagnostic(code(codescrub::report::json))]
    Json(#[from] serde_json::Error),
}
