use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use codescrub::report::TerminalReporter;
use codescrub::{Config, Pipeline, ReportFormat};
use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// codescrub - Strip comments, flag long methods and report unused types
#[derive(Parser, Debug)]
#[command(name = "codescrub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source tree to scrub (default: Code)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory, deleted and recreated on every run (default: Code_Cleaned)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Unused-type report file; relative paths are placed under the output directory
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Annotate methods whose body spans more than this many lines (default: 25)
    #[arg(short, long, value_name = "LINES")]
    threshold: Option<usize>,

    /// Source file extension without the dot (can be specified multiple times)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strip and annotate files in parallel
    #[arg(long)]
    parallel: bool,

    /// Format of the unused-type report file
    #[arg(long, value_enum, default_value = "text")]
    report_format: OutputFormat,

    /// List every annotated method and unused type in the console summary
    #[arg(long)]
    details: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only errors
    #[arg(short, long)]
    quiet: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completions
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet);

    info!("codescrub v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    run(config, &cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        // Try to load from the working directory
        Config::from_default_locations(Path::new("."))?
    };

    // Override with CLI arguments
    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(report) = &cli.report {
        config.report = report.clone();
    }
    if let Some(threshold) = cli.threshold {
        config.line_threshold = threshold;
    }
    if !cli.extensions.is_empty() {
        config.extensions = cli
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();
    }
    if cli.parallel {
        config.parallel = true;
    }

    Ok(config)
}

fn run(config: Config, cli: &Cli) -> Result<()> {
    if !cli.quiet {
        println!(
            "{}",
            format!(
                "🧹 Scrubbing {} → {}",
                config.input.display(),
                config.output.display()
            )
            .cyan()
        );
    }

    let show_progress = !cli.quiet && !config.parallel;
    let pipeline = Pipeline::new(config)
        .with_report_format(cli.report_format.into())
        .with_progress(show_progress);

    let summary = pipeline.run()?;

    if !cli.quiet {
        TerminalReporter::new()
            .with_details(cli.details)
            .report(&summary);
    }

    Ok(())
}
