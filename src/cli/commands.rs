//! Command implementations

use super::DiffSource;
use crate::drift::{DriftAnalyzer, DriftDetector, MatcherKind, Report, SymbolRef};
use crate::error::{validate_threshold, DocDriftError};
use crate::extract::{DocCorpus, SymbolExtractor};
use crate::repo::{DiffSegmenter, RepoConfig, Repository};
use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Marker line identifying hooks written by DocDrift
const HOOK_MARKER: &str = "# DocDrift pre-push hook";

/// Diff text plus the repository root and configuration it belongs to
pub struct Workspace {
    pub root: PathBuf,
    pub config: RepoConfig,
    pub diff: String,
}

impl Workspace {
    /// Resolve the diff from `--diff` when given, otherwise from git
    pub fn load(path: &Path, source: &DiffSource) -> Result<Self> {
        if let Some(ref input) = source.diff {
            let root = Repository::discover_root(path);
            let config = RepoConfig::load_or_default(&root)?;
            let diff = read_diff_input(input)?;
            return Ok(Self {
                root,
                config,
                diff,
            });
        }

        let repo = Repository::open(path)?;
        let base = source.base.as_deref().unwrap_or(&repo.config().base);
        tracing::info!("Comparing working tree against {}", base);
        let diff = repo.diff_against(base)?;

        Ok(Self {
            root: repo.root().to_path_buf(),
            config: repo.config().clone(),
            diff,
        })
    }

    /// Nothing changed
    pub fn is_unchanged(&self) -> bool {
        self.diff.trim().is_empty()
    }
}

fn read_diff_input(input: &str) -> Result<String> {
    let mut diff = String::new();
    if input == "-" {
        std::io::stdin()
            .read_to_string(&mut diff)
            .with_context(|| DocDriftError::DiffInput("stdin".to_string()))?;
    } else {
        diff = std::fs::read_to_string(input)
            .with_context(|| DocDriftError::DiffInput(input.to_string()))?;
    }
    Ok(diff)
}

/// Settings for one check run after flags override the config file
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSettings {
    pub threshold: f64,
    pub docs_root: String,
    pub matcher: MatcherKind,
}

impl CheckSettings {
    /// Flag > config file > default
    pub fn resolve(
        config: &RepoConfig,
        threshold: Option<f64>,
        docs_root: Option<&str>,
        matcher: Option<MatcherKind>,
    ) -> Result<Self> {
        let threshold = validate_threshold(threshold.unwrap_or(config.threshold))?;

        Ok(Self {
            threshold,
            docs_root: docs_root.unwrap_or(&config.docs_root).to_string(),
            matcher: matcher.unwrap_or(config.matcher),
        })
    }
}

/// Result of the check command
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub report: Report,
    /// The diff was empty; no documentation was read
    pub unchanged: bool,
}

/// Check the change for stale documentation
pub fn check(workspace: &Workspace, settings: &CheckSettings) -> Result<CheckOutcome> {
    if workspace.is_unchanged() {
        return Ok(CheckOutcome {
            report: Report::empty(settings.threshold),
            unchanged: true,
        });
    }

    let config = &workspace.config;
    let corpus = DocCorpus::discover(
        &workspace.root,
        Path::new(&settings.docs_root),
        &config.classifier(),
        &config.skip_dirs,
    )?;

    let analyzer = DriftAnalyzer::with_parts(SymbolExtractor::new(), settings.matcher.build());
    let detector = DriftDetector::with_parts(DiffSegmenter::new(config.classifier()), analyzer);
    let report = detector.detect(&workspace.diff, &corpus, settings.threshold);

    tracing::info!(
        "Checked {} documents: freshness {:.0}%, {} drift(s)",
        corpus.len(),
        report.score,
        report.drifts.len()
    );

    Ok(CheckOutcome {
        report,
        unchanged: false,
    })
}

/// List the distinct changed symbols in the workspace diff
pub fn symbols(workspace: &Workspace) -> Vec<SymbolRef> {
    let changes = DiffSegmenter::new(workspace.config.classifier()).segment(&workspace.diff);
    DriftAnalyzer::new().symbol_refs(&changes.code_units)
}

/// Write the default configuration at the repository root
pub fn init(path: &Path, force: bool) -> Result<PathBuf> {
    let root = Repository::discover_root(path);
    let config_path = RepoConfig::path(&root);
    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    RepoConfig::default().save(&root)?;
    println!("✓ Wrote {:?}", config_path);

    Ok(config_path)
}

/// Print the effective configuration as TOML
pub fn show_config(path: &Path) -> Result<()> {
    let root = Repository::discover_root(path);
    let config = RepoConfig::load_or_default(&root)?;
    let rendered = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;

    println!("# {:?}", RepoConfig::path(&root));
    print!("{}", rendered);

    Ok(())
}

/// Install, uninstall or report the pre-push hook
pub fn hooks(path: &Path, install: bool, uninstall: bool) -> Result<()> {
    let repo = Repository::open(path)?;
    let hook_path = repo.hooks_dir().join("pre-push");

    if install {
        if hook_path.exists() && !is_own_hook(&hook_path) {
            anyhow::bail!("A foreign pre-push hook already exists at {:?}", hook_path);
        }

        let hook_content = format!("#!/bin/sh\n{}\ndocdrift check\n", HOOK_MARKER);
        std::fs::create_dir_all(repo.hooks_dir())?;
        std::fs::write(&hook_path, hook_content)
            .with_context(|| format!("Failed to write {:?}", hook_path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&hook_path)?.permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&hook_path, perms)?;
        }

        println!("✓ Installed pre-push hook");
    } else if uninstall {
        if is_own_hook(&hook_path) {
            std::fs::remove_file(&hook_path)?;
            println!("✓ Removed pre-push hook");
        } else {
            println!("No DocDrift pre-push hook installed");
        }
    } else if is_own_hook(&hook_path) {
        println!("pre-push hook: installed");
    } else {
        println!("pre-push hook: not installed");
    }

    Ok(())
}

fn is_own_hook(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .map(|content| content.contains(HOOK_MARKER))
        .unwrap_or(false)
}

/// Print a report in JSON format
pub fn print_report_json(report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

/// Print a report in text format
pub fn print_report_text(outcome: &CheckOutcome) {
    if outcome.unchanged {
        println!("✅ No changes detected.");
        return;
    }

    let report = &outcome.report;
    println!(
        "\n📊 DocDrift Report - Freshness: {:.0}% (threshold: {:.0}%)\n",
        report.score, report.threshold
    );

    if report.drifts.is_empty() {
        println!("✅ No documentation drift detected!");
        return;
    }

    for (i, drift) in report.drifts.iter().enumerate() {
        println!(
            "  ⚠️  [{}] Symbol '{}' changed in {}",
            i + 1,
            drift.symbol,
            drift.code_file
        );
        for doc in &drift.stale_docs {
            println!("      📄 Stale: {}", doc);
        }
    }

    println!();
    if report.pass {
        println!("✅ PASS - within threshold");
    } else {
        println!("❌ FAIL - doc drift exceeds threshold. Update docs before merging.");
    }
}

/// Print extracted symbols in JSON format
pub fn print_symbols_json(refs: &[SymbolRef]) -> Result<()> {
    let json = serde_json::to_string_pretty(refs)?;
    println!("{}", json);
    Ok(())
}

/// Print extracted symbols in text format
pub fn print_symbols_text(refs: &[SymbolRef]) {
    if refs.is_empty() {
        println!("No changed symbols found.");
        return;
    }

    for symbol_ref in refs {
        println!("{}\t{}", symbol_ref.symbol, symbol_ref.code_file);
    }
}
