//! DocDrift - documentation drift detection tool
//!
//! Exit status: 0 pass, 1 documentation drift over threshold, 2 error.

use anyhow::Result;
use docdrift::cli::{
    check, hooks, init, print_report_json, print_report_text, print_symbols_json,
    print_symbols_text, show_config, symbols, CheckSettings, Cli, Commands, OutputFormat,
    Workspace,
};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging; stdout stays reserved for reports
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Execute a command, returning the pass verdict
fn run(cli: Cli) -> Result<bool> {
    let repo_path = Path::new(&cli.path);

    match cli.command {
        Commands::Check(args) => {
            let workspace = Workspace::load(repo_path, &args.source)?;
            let settings = CheckSettings::resolve(
                &workspace.config,
                args.threshold,
                args.docs.as_deref(),
                args.matcher,
            )?;
            let outcome = check(&workspace, &settings)?;

            match cli.format {
                OutputFormat::Json => print_report_json(&outcome.report)?,
                OutputFormat::Text => print_report_text(&outcome),
            }

            Ok(outcome.report.pass)
        }

        Commands::Symbols(args) => {
            let workspace = Workspace::load(repo_path, &args.source)?;
            let refs = symbols(&workspace);

            match cli.format {
                OutputFormat::Json => print_symbols_json(&refs)?,
                OutputFormat::Text => print_symbols_text(&refs),
            }

            Ok(true)
        }

        Commands::Init(args) => {
            init(repo_path, args.force)?;
            Ok(true)
        }

        Commands::Config => {
            show_config(repo_path)?;
            Ok(true)
        }

        Commands::Hooks(args) => {
            hooks(repo_path, args.install, args.uninstall)?;
            Ok(true)
        }
    }
}
