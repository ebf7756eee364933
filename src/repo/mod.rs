//! Repository access and change segmentation
//!
//! This module handles:
//! - Producing a unified diff against a base reference
//! - Segmenting diff text into code units and changed documentation
//! - File categorization (code vs documentation)

mod change;
mod config;

pub use change::{ChangeSet, CodeUnit, DiffSegmenter, FILE_HEADER};
pub use config::RepoConfig;

use crate::error::DocDriftError;
use anyhow::{Context, Result};
use git2::{DiffFormat, DiffOptions, Repository as GitRepo};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Documentation suffixes recognized out of the box
pub const DEFAULT_DOC_EXTENSIONS: &[&str] = &["md", "rst", "adoc"];

/// Name of the per-repository settings directory
pub const CONFIG_DIR: &str = ".docdrift";

/// Type of file in a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Code,
    Documentation,
}

/// Classifies paths by extension into code or documentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileClassifier {
    doc_extensions: BTreeSet<String>,
}

impl FileClassifier {
    /// Create a classifier for the given documentation extensions (without dot)
    pub fn new<I, S>(doc_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doc_extensions = doc_extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        Self { doc_extensions }
    }

    /// Categorize a path. Anything that is not documentation counts as code.
    pub fn categorize(&self, path: &str) -> FileType {
        match extension(path) {
            Some(ext) if self.doc_extensions.contains(&ext.to_lowercase()) => {
                FileType::Documentation
            }
            _ => FileType::Code,
        }
    }

    /// Check if a path is a documentation file
    pub fn is_documentation(&self, path: &str) -> bool {
        self.categorize(path) == FileType::Documentation
    }

    /// The recognized documentation extensions, sorted
    pub fn doc_extensions(&self) -> impl Iterator<Item = &str> {
        self.doc_extensions.iter().map(String::as_str)
    }
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_DOC_EXTENSIONS)
    }
}

/// Extension of the last path component, without the dot
fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// A git repository being checked for drift
pub struct Repository {
    /// The underlying git2 repository
    repo: GitRepo,
    /// Path to the working tree root
    root: PathBuf,
    /// Repository configuration
    config: RepoConfig,
}

impl Repository {
    /// Open the repository containing the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = GitRepo::discover(path)
            .map_err(|_| DocDriftError::NotARepository(path.display().to_string()))?;

        let root = repo
            .workdir()
            .ok_or_else(|| anyhow::anyhow!("Repository has no working directory (bare repo?)"))?
            .to_path_buf();

        let config = RepoConfig::load_or_default(&root)?;

        Ok(Self { repo, root, config })
    }

    /// Working tree root of the repository enclosing `path`, or `path`
    /// itself when it is not inside a git working tree
    pub fn discover_root<P: AsRef<Path>>(path: P) -> PathBuf {
        let path = path.as_ref();
        GitRepo::discover(path)
            .ok()
            .and_then(|repo| repo.workdir().map(Path::to_path_buf))
            .unwrap_or_else(|| path.to_path_buf())
    }

    /// Get the working tree root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the repository configuration
    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// Get the path to the .docdrift directory
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    /// Directory holding git hooks
    pub fn hooks_dir(&self) -> PathBuf {
        self.repo.path().join("hooks")
    }

    /// Unified diff of the working tree (with index) against `base`,
    /// equivalent to `git diff <base>`
    pub fn diff_against(&self, base: &str) -> Result<String> {
        let tree = self
            .repo
            .revparse_single(base)
            .map_err(|_| DocDriftError::UnknownBase(base.to_string()))?
            .peel_to_tree()
            .with_context(|| format!("Failed to resolve tree for {}", base))?;

        let mut diff_opts = DiffOptions::new();
        diff_opts.include_untracked(false);

        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(Some(&tree), Some(&mut diff_opts))
            .context("Failed to compute diff")?;

        let mut patch = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            // Content lines come without their origin marker
            if matches!(line.origin(), '+' | '-' | ' ') {
                patch.push(line.origin());
            }
            patch.push_str(&String::from_utf8_lossy(line.content()));
            true
        })
        .context("Failed to render diff")?;

        tracing::debug!(base, bytes = patch.len(), "computed diff");

        Ok(patch)
    }
}
