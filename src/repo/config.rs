//! Repository configuration for DocDrift

use super::{FileClassifier, CONFIG_DIR, DEFAULT_DOC_EXTENSIONS};
use crate::drift::MatcherKind;
use crate::error::validate_threshold;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a repository being checked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Minimum freshness score (0 - 100) required to pass
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Base git reference the working tree is compared against
    #[serde(default = "default_base")]
    pub base: String,

    /// Root directory scanned for documentation, relative to the repository
    #[serde(default = "default_docs_root")]
    pub docs_root: String,

    /// File extensions treated as documentation
    #[serde(default = "default_doc_extensions")]
    pub doc_extensions: Vec<String>,

    /// Directory names never descended into while collecting docs
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    /// How a document is judged to reference a symbol
    #[serde(default)]
    pub matcher: MatcherKind,
}

fn default_threshold() -> f64 {
    80.0
}

fn default_base() -> String {
    "HEAD~1".to_string()
}

fn default_docs_root() -> String {
    ".".to_string()
}

fn default_doc_extensions() -> Vec<String> {
    DEFAULT_DOC_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_skip_dirs() -> Vec<String> {
    vec![
        ".git".to_string(),
        "node_modules".to_string(),
        "vendor".to_string(),
    ]
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            base: default_base(),
            docs_root: default_docs_root(),
            doc_extensions: default_doc_extensions(),
            skip_dirs: default_skip_dirs(),
            matcher: MatcherKind::default(),
        }
    }
}

impl RepoConfig {
    /// Location of the config file under a repository root
    pub fn path(repo_root: &Path) -> PathBuf {
        repo_root.join(CONFIG_DIR).join("config.toml")
    }

    /// Load configuration from the repository or return defaults
    pub fn load_or_default(repo_root: &Path) -> Result<Self> {
        let config_path = Self::path(repo_root);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let config: RepoConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
            validate_threshold(config.threshold)
                .with_context(|| format!("Invalid config file: {:?}", config_path))?;
            tracing::debug!(path = ?config_path, "loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the repository
    pub fn save(&self, repo_root: &Path) -> Result<()> {
        let config_dir = repo_root.join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create {:?}", config_dir))?;

        let config_path = Self::path(repo_root);
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Classifier built from the configured documentation extensions
    pub fn classifier(&self) -> FileClassifier {
        FileClassifier::new(&self.doc_extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RepoConfig::default();
        assert_eq!(config.threshold, 80.0);
        assert_eq!(config.base, "HEAD~1");
        assert_eq!(config.doc_extensions, vec!["md", "rst", "adoc"]);
        assert!(config.skip_dirs.contains(&"node_modules".to_string()));
        assert_eq!(config.matcher, MatcherKind::Substring);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: RepoConfig = toml::from_str("threshold = 95.0\nmatcher = \"word\"\n").unwrap();
        assert_eq!(config.threshold, 95.0);
        assert_eq!(config.matcher, MatcherKind::Word);
        assert_eq!(config.base, "HEAD~1");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = RepoConfig {
            base: "origin/main".to_string(),
            ..RepoConfig::default()
        };
        config.save(dir.path()).unwrap();

        let loaded = RepoConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = RepoConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(loaded, RepoConfig::default());
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();
        std::fs::write(RepoConfig::path(dir.path()), "threshold = 150.0\n").unwrap();
        assert!(RepoConfig::load_or_default(dir.path()).is_err());
    }
}
