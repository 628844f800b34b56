//! CLI argument definitions for policy form auto-fill.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "policy-map",
    version,
    about = "Auto-fill policy form fields from scanned document data",
    long_about = "Fill empty policy form fields by matching scanned document text against\n\
                  master-data catalogs (fuel, destination, department, insured quality,\n\
                  vehicle category and tariff). Fields that already hold a value are\n\
                  never changed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow raw scanned text in trace logs.
    ///
    /// Scanned policies carry personal data; it is redacted by default.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fill empty form fields from a scanner output file.
    Autofill(AutofillArgs),

    /// Print the similarity score of two strings.
    Similarity(SimilarityArgs),

    /// Show where each catalog is loaded from and how many items it has.
    Catalogs(CatalogsArgs),
}

#[derive(Args)]
pub struct AutofillArgs {
    /// Scanner output: a JSON object of extracted fields.
    #[arg(long = "extracted", value_name = "JSON")]
    pub extracted: PathBuf,

    /// Current form state as JSON (default: every field empty).
    #[arg(long = "form", value_name = "JSON")]
    pub form: Option<PathBuf>,

    #[command(flatten)]
    pub catalogs: CatalogsArgs,

    /// Write the updated form here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "JSON")]
    pub output: Option<PathBuf>,

    /// Only accept close similarity matches.
    #[arg(long = "strict", conflicts_with = "relaxed")]
    pub strict: bool,

    /// Accept looser similarity matches for noisy scans.
    #[arg(long = "relaxed")]
    pub relaxed: bool,
}

#[derive(Args)]
pub struct SimilarityArgs {
    #[arg(value_name = "A")]
    pub a: String,

    #[arg(value_name = "B")]
    pub b: String,
}

#[derive(Args)]
pub struct CatalogsArgs {
    /// Catalog directory (default: $POLICY_CATALOG_DIR, then ./catalogs).
    #[arg(long = "catalogs", value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
