//! Documentation corpus
//!
//! Maps documentation paths to their full text. Backed by a `BTreeMap` so
//! iteration is always in path order. A lowercased copy of each document is
//! kept beside the original for case-insensitive reference matching.

use crate::repo::FileClassifier;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// Documentation files available for cross-referencing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocCorpus {
    docs: BTreeMap<String, Document>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Document {
    content: String,
    folded: String,
}

impl Document {
    fn new(content: String) -> Self {
        let folded = content.to_lowercase();
        Self { content, folded }
    }
}

impl DocCorpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.docs.insert(path.into(), Document::new(content.into()));
    }

    /// Documents in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.docs.iter().map(|(p, d)| (p.as_str(), d.content.as_str()))
    }

    /// Documents in path order, lowercased once at insert time
    pub fn iter_folded(&self) -> impl Iterator<Item = (&str, &str)> {
        self.docs.iter().map(|(p, d)| (p.as_str(), d.folded.as_str()))
    }

    /// Look up a document by path
    pub fn get(&self, path: &str) -> Option<&str> {
        self.docs.get(path).map(|d| d.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Walk `docs_root` (relative to `repo_root`) collecting documentation files.
    ///
    /// Directories named in `skip_dirs` are pruned. Keys are paths relative
    /// to `repo_root` with forward slashes, so they line up with diff paths.
    /// Unreadable files are skipped.
    pub fn discover(
        repo_root: &Path,
        docs_root: &Path,
        classifier: &FileClassifier,
        skip_dirs: &[String],
    ) -> Result<Self> {
        let mut corpus = Self::new();
        let root = repo_root.join(docs_root);
        let root = root.as_path();

        let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !skip_dirs.iter().any(|d| e.file_name() == d.as_str())
        });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // The root itself must be readable
                Err(e) if e.depth() == 0 => {
                    return Err(e).with_context(|| format!("Failed to read docs root {:?}", root));
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(repo_root)
                .or_else(|_| entry.path().strip_prefix(root))
                .unwrap_or(entry.path());
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if !classifier.is_documentation(&key) {
                continue;
            }

            match std::fs::read_to_string(entry.path()) {
                Ok(content) => corpus.insert(key, content),
                Err(e) => tracing::warn!("Skipping unreadable doc {:?}: {}", entry.path(), e),
            }
        }

        tracing::debug!(docs = corpus.len(), root = ?root, "discovered documentation");

        Ok(corpus)
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for DocCorpus {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut corpus = Self::new();
        for (path, content) in iter {
            corpus.insert(path, content);
        }
        corpus
    }
}
