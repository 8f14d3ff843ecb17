//! Batch run over a source tree
//!
//! 1. Compile the syntax patterns (before anything is deleted)
//! 2. Recreate the output root
//! 3. Discover and load input files
//! 4. Index type definitions and usages across the whole corpus
//! 5. Strip and annotate each file into the output tree
//! 6. Write the unused-type report

use crate::analysis::{FileScrubber, SymbolIndexer, UnusedReport};
use crate::config::Config;
use crate::discovery::{load_all, FileFinder, SourceUnit};
use crate::error::{Result, ScrubError};
use crate::output::OutputTree;
use crate::report::{ReportFormat, Reporter};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A method that received a complexity marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedMethod {
    pub file: String,
    pub name: String,
    /// 1-based line of the signature in the stripped input
    pub line: usize,
    pub line_span: usize,
}

/// What a run did
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub files_found: usize,
    pub files_written: usize,
    pub files_skipped: usize,
    pub annotated: Vec<AnnotatedMethod>,
    pub unused: UnusedReport,
    pub output_root: PathBuf,
    pub report_path: PathBuf,
    pub elapsed: Duration,
}

pub struct Pipeline {
    config: Config,
    format: ReportFormat,
    show_progress: bool,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            format: ReportFormat::Text,
            show_progress: false,
        }
    }

    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Show a progress bar while writing files (sequential mode only)
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let config = &self.config;

        if !config.input.is_dir() {
            return Err(ScrubError::MissingInput(config.input.clone()));
        }

        let scrubber = FileScrubber::new(config)?;
        let indexer = SymbolIndexer::new(&config.syntax)?;

        info!("Preparing output directory {}", config.output.display());
        let tree = OutputTree::recreate(&config.output, &config.input)?;

        info!("Discovering files...");
        let files = FileFinder::new(config)
            .skipping(tree.root())
            .find_files(&config.input)?;
        info!("Found {} files to process", files.len());

        let (units, files_skipped) = load_all(&files);

        let index = indexer.index(&units);
        let unused = index.unused_report();
        info!(
            "{} likely unused types in {} files",
            unused.total_symbols(),
            unused.file_count()
        );

        let annotated = if config.parallel {
            self.scrub_parallel(&scrubber, &tree, &units)?
        } else {
            self.scrub_sequential(&scrubber, &tree, &units)?
        };
        info!("Cleaned code written to {}", tree.root().display());

        let report_path = config.report_path();
        Reporter::new(self.format).write(&unused, &report_path)?;
        info!("Unused type report written to {}", report_path.display());

        Ok(RunSummary {
            files_found: files.len(),
            files_written: units.len(),
            files_skipped,
            annotated,
            unused,
            output_root: tree.root().to_path_buf(),
            report_path,
            elapsed: start_time.elapsed(),
        })
    }

    fn scrub_sequential(
        &self,
        scrubber: &FileScrubber,
        tree: &OutputTree,
        units: &[SourceUnit],
    ) -> Result<Vec<AnnotatedMethod>> {
        let pb = if self.show_progress {
            ProgressBar::new(units.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }

        let mut annotated = Vec::new();
        for unit in units {
            annotated.extend(scrub_unit(scrubber, tree, unit)?);
            pb.inc(1);
        }
        pb.finish_and_clear();

        Ok(annotated)
    }

    fn scrub_parallel(
        &self,
        scrubber: &FileScrubber,
        tree: &OutputTree,
        units: &[SourceUnit],
    ) -> Result<Vec<AnnotatedMethod>> {
        let per_file: Vec<Result<Vec<AnnotatedMethod>>> = units
            .par_iter()
            .map(|unit| scrub_unit(scrubber, tree, unit))
            .collect();

        let mut annotated = Vec::new();
        for result in per_file {
            annotated.extend(result?);
        }
        Ok(annotated)
    }
}

/// Strip and annotate one file and write it to the output tree
fn scrub_unit(
    scrubber: &FileScrubber,
    tree: &OutputTree,
    unit: &SourceUnit,
) -> Result<Vec<AnnotatedMethod>> {
    let scrubbed = scrubber.scrub(&unit.text);
    tree.write(&unit.relative, &scrubbed.text)?;

    let file = unit.display_path();
    if !scrubbed.annotated.is_empty() {
        debug!("{}: {} long methods", file, scrubbed.annotated.len());
    }

    Ok(scrubbed
        .annotated
        .into_iter()
        .map(|span| AnnotatedMethod {
            file: file.clone(),
            line: span.start_line + 1,
            line_span: span.line_span(),
            name: span.name,
        })
        .collect())
}
