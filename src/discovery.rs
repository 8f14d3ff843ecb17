//! Source file discovery and loading

use crate::config::Config;
use crate::error::{Result, ScrubError};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A source file found under the input root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the input root; the file's identity in reports and
    /// in the output tree
    pub relative: PathBuf,
}

impl SourceFile {
    pub fn new(path: PathBuf, relative: PathBuf) -> Self {
        Self { path, relative }
    }

    /// Read the file, decoding invalid UTF-8 lossily
    pub fn load(&self) -> std::io::Result<SourceUnit> {
        let bytes = std::fs::read(&self.path)?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "{} is not valid UTF-8, invalid bytes replaced",
                    self.relative.display()
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        Ok(SourceUnit {
            path: self.path.clone(),
            relative: self.relative.clone(),
            text,
        })
    }
}

/// One loaded input file. Transformations produce new strings; the raw text
/// is never modified.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub text: String,
}

impl SourceUnit {
    /// Build a unit from in-memory text
    pub fn from_text(relative: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let relative = relative.into();
        Self {
            path: relative.clone(),
            relative,
            text: text.into(),
        }
    }

    /// `/`-separated relative path, used as the report key
    pub fn display_path(&self) -> String {
        display_path(&self.relative)
    }
}

pub(crate) fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Finds source files under the input root by extension
pub struct FileFinder<'a> {
    config: &'a Config,
    /// Subtree never treated as input (the output root)
    skip: Option<PathBuf>,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, skip: None }
    }

    /// Never descend into `dir`
    pub fn skipping(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.skip = Some(dir.canonicalize().unwrap_or(dir));
        self
    }

    fn is_skipped(&self, entry: &walkdir::DirEntry) -> bool {
        let Some(skip) = &self.skip else {
            return false;
        };
        entry.file_type().is_dir()
            && entry
                .path()
                .canonicalize()
                .map(|path| &path == skip)
                .unwrap_or(false)
    }

    /// Recursively collect matching files, sorted by path
    pub fn find_files(&self, root: &Path) -> Result<Vec<SourceFile>> {
        if !root.is_dir() {
            return Err(ScrubError::MissingInput(root.to_path_buf()));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_skipped(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.config.is_source_file(entry.path()) {
                continue;
            }

            let path = entry.path().to_path_buf();
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            debug!("Found {}", relative.display());
            files.push(SourceFile::new(path, relative));
        }

        Ok(files)
    }
}

/// Load every file, skipping the unreadable ones with a warning
pub fn load_all(files: &[SourceFile]) -> (Vec<SourceUnit>, usize) {
    let mut units = Vec::with_capacity(files.len());
    let mut skipped = 0;

    for file in files {
        match file.load() {
            Ok(unit) => units.push(unit),
            Err(e) => {
                warn!("Skipping {}: {}", file.path.display(), e);
                skipped += 1;
            }
        }
    }

    (units, skipped)
}
