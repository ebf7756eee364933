//! CLI interface using clap
//!
//! Provides the command-line interface for DocDrift

mod commands;

pub use commands::*;

use crate::drift::MatcherKind;
use clap::{Args, Parser, Subcommand};

/// DocDrift - flags documentation left stale by a code change
#[derive(Parser, Debug)]
#[command(name = "docdrift")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the repository (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    pub path: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the current change for stale documentation
    Check(CheckArgs),

    /// List the changed symbols found in the diff
    Symbols(SymbolsArgs),

    /// Write a default configuration file
    Init(InitArgs),

    /// Show the effective configuration
    Config,

    /// Install or remove the pre-push hook
    Hooks(HooksArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Where the diff comes from
#[derive(Args, Debug, Clone, Default)]
pub struct DiffSource {
    /// Base git reference to diff the working tree against
    #[arg(short, long)]
    pub base: Option<String>,

    /// Read a unified diff from a file instead of git ("-" for stdin)
    #[arg(long, conflicts_with = "base")]
    pub diff: Option<String>,
}

/// Arguments for check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: DiffSource,

    /// Minimum freshness score (0-100) required to pass
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Root directory to scan for documentation
    #[arg(short, long)]
    pub docs: Option<String>,

    /// How documents are matched against symbols
    #[arg(short, long)]
    pub matcher: Option<MatcherKind>,
}

/// Arguments for symbols command
#[derive(Args, Debug)]
pub struct SymbolsArgs {
    #[command(flatten)]
    pub source: DiffSource,
}

/// Arguments for init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for hooks command
#[derive(Args, Debug)]
pub struct HooksArgs {
    /// Install the hook
    #[arg(long)]
    pub install: bool,

    /// Uninstall the hook
    #[arg(long, conflicts_with = "install")]
    pub uninstall: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
