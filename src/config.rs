//! Run configuration
//!
//! Values come from built-in defaults, then an optional config file
//! (`.codescrub.toml` / `.codescrub.yml`), then CLI flags.

use crate::error::{Result, ScrubError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file names probed by [`Config::from_default_locations`], in order
const DEFAULT_CONFIG_FILES: &[&str] = &[".codescrub.toml", ".codescrub.yml", ".codescrub.yaml"];

pub const DEFAULT_LINE_THRESHOLD: usize = 25;
pub const DEFAULT_REPORT_NAME: &str = "UNUSED_SCRIPTS_REPORT.txt";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Root of the source tree to scrub
    pub input: PathBuf,

    /// Root of the mirrored output tree (recreated on every run)
    pub output: PathBuf,

    /// Unused-symbol report; relative paths live under `output`
    pub report: PathBuf,

    /// Method bodies spanning more lines than this get a marker
    pub line_threshold: usize,

    /// File extensions (without the dot) treated as source files
    pub extensions: Vec<String>,

    /// Strip and annotate files in parallel
    pub parallel: bool,

    pub syntax: SyntaxConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("Code"),
            output: PathBuf::from("Code_Cleaned"),
            report: PathBuf::from(DEFAULT_REPORT_NAME),
            line_threshold: DEFAULT_LINE_THRESHOLD,
            extensions: vec!["cs".to_string()],
            parallel: false,
            syntax: SyntaxConfig::default(),
        }
    }
}

/// Lexical markers of the scrubbed language. Defaults describe C#.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SyntaxConfig {
    pub block_comment_open: String,
    pub block_comment_close: String,
    pub doc_comment: String,
    pub line_comment: String,

    /// Keywords a method signature line may start with
    pub modifiers: Vec<String>,

    /// Keywords that introduce a type definition
    pub definition_keywords: Vec<String>,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        let modifiers = [
            "public",
            "private",
            "protected",
            "internal",
            "static",
            "virtual",
            "override",
            "async",
            "sealed",
            "extern",
            "new",
            "partial",
        ];

        Self {
            block_comment_open: "/*".to_string(),
            block_comment_close: "*/".to_string(),
            doc_comment: "///".to_string(),
            line_comment: "//".to_string(),
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            definition_keywords: vec!["class".to_string(), "struct".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from a TOML or YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ScrubError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_error = |message: String| ScrubError::ConfigParse {
            path: path.to_path_buf(),
            message,
        };

        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => {
                serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))
            }
            Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            other => Err(parse_error(format!(
                "unsupported config extension {:?}",
                other.unwrap_or("")
            ))),
        }
    }

    /// Look for a config file in `dir`, falling back to defaults
    pub fn from_default_locations(dir: &Path) -> Result<Self> {
        for name in DEFAULT_CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                tracing::debug!("Loading config from {}", candidate.display());
                return Self::from_file(&candidate);
            }
        }

        Ok(Self::default())
    }

    /// Where the unused-symbol report is written
    pub fn report_path(&self) -> PathBuf {
        if self.report.is_absolute() {
            self.report.clone()
        } else {
            self.output.join(&self.report)
        }
    }

    /// Whether `path` carries one of the configured source extensions
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|known| known == ext))
            .unwrap_or(false)
    }
}
