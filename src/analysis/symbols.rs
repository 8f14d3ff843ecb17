//! Symbol Definition/Usage Indexer
//!
//! Detects class/struct-like types that are never mentioned outside their own
//! definitions.
//!
//! ## Detection Algorithm
//!
//! 1. Find every `class Name` / `struct Name` in every file and record the set
//!    of files defining each name (partial and duplicate definitions across
//!    files are all kept).
//! 2. Count whole-identifier, case-sensitive occurrences of each name across
//!    the whole corpus, definition sites included.
//! 3. A name is likely unused when its occurrence count does not exceed the
//!    number of files defining it.
//! 4. Group likely-unused names under each of their defining files.
//!
//! ## Known Imprecision
//!
//! Counting is purely textual. A mention inside a comment or string literal
//! counts as a use, and unrelated types sharing a name share one count. A type
//! whose name appears in a `// used by X` comment is therefore never flagged,
//! while a type referenced only through reflection always is.

use super::alternation;
use crate::config::SyntaxConfig;
use crate::discovery::SourceUnit;
use crate::error::Result;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::OnceLock;
use tracing::debug;

/// Regex matching maximal identifier-like runs, the unit of usage counting
fn identifier_finder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("identifier regex is valid"))
}

/// Collects type definitions and counts their mentions
pub struct SymbolIndexer {
    /// `None` when no definition keywords are configured
    definition: Option<Regex>,
}

impl SymbolIndexer {
    pub fn new(syntax: &SyntaxConfig) -> Result<Self> {
        let definition = match alternation(&syntax.definition_keywords) {
            Some(keywords) => Some(Regex::new(&format!(
                r"\b(?:{})\s+([A-Za-z_][A-Za-z0-9_]*)",
                keywords
            ))?),
            None => None,
        };

        Ok(Self { definition })
    }

    pub fn csharp() -> Result<Self> {
        Self::new(&SyntaxConfig::default())
    }

    /// Names defined in `text`, in source order (may repeat)
    pub fn definitions_in<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.definition.iter().flat_map(move |definition| {
            definition
                .captures_iter(text)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        })
    }

    /// Index a whole corpus. Every unit must be present before counting,
    /// since usage is corpus-wide.
    pub fn index(&self, units: &[SourceUnit]) -> SymbolIndex {
        let mut definitions: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for unit in units {
            let file = unit.display_path();
            for name in self.definitions_in(&unit.text) {
                definitions
                    .entry(name.to_string())
                    .or_default()
                    .insert(file.clone());
            }
        }

        let mut usage: HashMap<String, usize> =
            definitions.keys().map(|name| (name.clone(), 0)).collect();
        for unit in units {
            count_mentions(&unit.text, &mut usage);
        }

        debug!(
            "Indexed {} type names across {} files",
            definitions.len(),
            units.len()
        );

        SymbolIndex { definitions, usage }
    }
}

/// Add the whole-identifier mentions in `text` of every key in `usage`
fn count_mentions(text: &str, usage: &mut HashMap<String, usize>) {
    for token in identifier_finder().find_iter(text) {
        if let Some(count) = usage.get_mut(token.as_str()) {
            *count += 1;
        }
    }
}

/// Definitions and usage counts for one corpus
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    definitions: BTreeMap<String, BTreeSet<String>>,
    usage: HashMap<String, usize>,
}

impl SymbolIndex {
    /// Defined name -> files defining it
    pub fn definitions(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.definitions
    }

    pub fn defining_files(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.definitions.get(name)
    }

    /// Corpus-wide mentions of `name`, definition sites included
    pub fn usage_count(&self, name: &str) -> usize {
        self.usage.get(name).copied().unwrap_or(0)
    }

    /// Defined, but mentioned no more often than it is defined
    pub fn is_likely_unused(&self, name: &str) -> bool {
        match self.definitions.get(name) {
            Some(files) => self.usage_count(name) <= files.len(),
            None => false,
        }
    }

    /// Likely-unused names grouped by defining file
    pub fn unused_report(&self) -> UnusedReport {
        let mut report = UnusedReport::default();
        for (name, files) in &self.definitions {
            if !self.is_likely_unused(name) {
                continue;
            }
            for file in files {
                report
                    .files
                    .entry(file.clone())
                    .or_default()
                    .insert(name.clone());
            }
        }
        report
    }
}

/// Likely-unused names per file, both sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnusedReport {
    files: BTreeMap<String, BTreeSet<String>>,
}

impl UnusedReport {
    /// (file, names) pairs in path order
    pub fn files(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.files.iter().map(|(file, names)| (file.as_str(), names))
    }

    pub fn symbols_for(&self, file: &str) -> Option<&BTreeSet<String>> {
        self.files.get(file)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Entries across all files (a name defined in two files counts twice)
    pub fn total_symbols(&self) -> usize {
        self.files.values().map(|names| names.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
