use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;
use crate::pooling::DEFAULT_RESULT_FILE;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "qc-results")]
#[command(author, version, about = "Pool, filter and summarize quality-check result files")]
#[command(long_about = "Works with .xqar result files and XML run configurations \
    produced by OpenDRIVE / OpenSCENARIO checker bundles.\n\n\
    Exit codes:\n  \
    0 - Success\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pool the result files of a directory into one report
    Pool(PoolArgs),

    /// Derive a run configuration from a result file
    ToConfig(ToConfigArgs),

    /// Merge run configurations
    MergeConfig(MergeConfigArgs),

    /// Print issue counts per bundle and checker
    Summary(SummaryArgs),
}

#[derive(Parser, Debug)]
pub struct PoolArgs {
    /// Directory holding the .xqar files
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Run configuration selecting result files, checkers and levels
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pooled report to write
    #[arg(short, long, default_value = DEFAULT_RESULT_FILE)]
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ToConfigArgs {
    /// Result file to read
    pub result: PathBuf,

    /// Configuration file to write
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
pub struct MergeConfigArgs {
    /// Configuration the others are merged into
    pub base: PathBuf,

    /// Configurations to merge, in order
    #[arg(required = true)]
    pub others: Vec<PathBuf>,

    /// Merged configuration to write
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Result files to summarize; several files are merged first
    #[arg(required = true)]
    pub results: Vec<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
