//! Diff segmentation into per-file code units and changed documentation
//!
//! A unified diff is split on its `diff --git ` file headers. Each section is
//! classified by the extension of its post-change path (`+++ b/<path>`).
//!
//! Splitting on a textual delimiter means a file whose content itself contains
//! `diff --git ` (a patch checked into the repository, for instance) can be
//! mis-segmented. The tool is a heuristic and accepts that.

use super::{FileClassifier, FileType};
use std::collections::BTreeSet;

/// Delimiter introducing each per-file section of a unified diff
pub const FILE_HEADER: &str = "diff --git ";

/// Prefix of the header line naming the post-change file
const NEW_PATH_MARKER: &str = "+++ b/";

/// The diff text belonging to a single non-documentation file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeUnit {
    /// Post-change path of the file
    pub path: String,
    /// Raw diff section for the file (headers and hunks)
    pub text: String,
}

impl CodeUnit {
    /// Create a new code unit
    pub fn new(path: &str, text: &str) -> Self {
        Self {
            path: path.to_string(),
            text: text.to_string(),
        }
    }
}

/// Result of segmenting one diff
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Code units in diff order
    pub code_units: Vec<CodeUnit>,
    /// Documentation paths modified in the same diff
    pub changed_docs: BTreeSet<String>,
}

impl ChangeSet {
    /// True when the diff touched no recognizable file
    pub fn is_empty(&self) -> bool {
        self.code_units.is_empty() && self.changed_docs.is_empty()
    }

    /// Check whether a documentation path was modified in this change
    pub fn touches_doc(&self, path: &str) -> bool {
        self.changed_docs.contains(path)
    }
}

/// Splits unified diff text into code units and changed documentation paths
#[derive(Debug, Clone, Default)]
pub struct DiffSegmenter {
    classifier: FileClassifier,
}

impl DiffSegmenter {
    /// Create a segmenter using the given file classifier
    pub fn new(classifier: FileClassifier) -> Self {
        Self { classifier }
    }

    /// Segment a diff. An empty diff yields an empty change set.
    pub fn segment(&self, diff: &str) -> ChangeSet {
        let mut changes = ChangeSet::default();

        for section in diff.split(FILE_HEADER) {
            // Preamble, binary sections and deletions carry no `+++ b/` line
            let Some(path) = new_file_path(section) else {
                continue;
            };

            match self.classifier.categorize(path) {
                FileType::Documentation => {
                    changes.changed_docs.insert(path.to_string());
                }
                FileType::Code => {
                    changes.code_units.push(CodeUnit::new(path, section));
                }
            }
        }

        tracing::debug!(
            code_units = changes.code_units.len(),
            changed_docs = changes.changed_docs.len(),
            "segmented diff"
        );

        changes
    }
}

/// Find the post-change path in a section's file header
fn new_file_path(section: &str) -> Option<&str> {
    for line in section.lines() {
        // Header ends where the first hunk starts
        if line.starts_with("@@") {
            return None;
        }
        if let Some(path) = line.strip_prefix(NEW_PATH_MARKER) {
            let path = path.trim_end_matches(['\r', '\t']);
            return (!path.is_empty()).then_some(path);
        }
    }
    None
}
