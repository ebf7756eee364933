//! Drift detection engine
//!
//! Cross-references changed symbols against the documentation corpus:
//! - A document mentioning a changed symbol is a reference
//! - A reference from a document not touched by the same diff is stale
//! - Freshness is the share of references that are not stale

mod detector;
mod rules;

pub use detector::{DriftAnalyzer, DriftDetector};
pub use rules::{MatcherKind, ReferenceMatcher, SubstringMatcher, WordBoundaryMatcher};

use serde::{Deserialize, Serialize};

/// A changed symbol and the code file it came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolRef {
    /// Symbol name as extracted
    pub symbol: String,
    /// Code file the symbol changed in
    pub code_file: String,
}

impl SymbolRef {
    pub fn new(symbol: &str, code_file: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            code_file: code_file.to_string(),
        }
    }
}

/// A changed symbol still mentioned by documents that were not updated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drift {
    pub symbol: String,
    pub code_file: String,
    /// Stale documents in corpus order
    pub stale_docs: Vec<String>,
}

/// Reference counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceCounts {
    /// Symbol-to-document references found
    pub total: usize,
    /// References from documents not updated in the diff
    pub stale: usize,
}

impl ReferenceCounts {
    /// Percentage of references that are fresh; 100 when there are none
    pub fn freshness_score(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.total - self.stale) as f64 / self.total as f64 * 100.0
    }
}

/// Full result of a drift analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub drifts: Vec<Drift>,
    #[serde(rename = "freshness_score")]
    pub score: f64,
    pub pass: bool,
    pub threshold: f64,
    /// Counters behind the score; not part of the serialized form
    #[serde(skip)]
    pub references: ReferenceCounts,
}

impl Report {
    /// Assemble a report, deriving score and verdict from the counters.
    /// The pass boundary is inclusive.
    pub fn new(drifts: Vec<Drift>, references: ReferenceCounts, threshold: f64) -> Self {
        let score = references.freshness_score();
        Self {
            drifts,
            score,
            pass: score >= threshold,
            threshold,
            references,
        }
    }

    /// Report for a change with nothing to check
    pub fn empty(threshold: f64) -> Self {
        Self::new(Vec::new(), ReferenceCounts::default(), threshold)
    }

    /// Number of stale document mentions across all drifts
    pub fn stale_doc_count(&self) -> usize {
        self.drifts.iter().map(|d| d.stale_docs.len()).sum()
    }
}
