//! DocDrift - flags documentation that went stale relative to a code change
//!
//! Given a unified diff and a documentation corpus, this library extracts the
//! names of changed code symbols and reports documents that still mention
//! them without having been updated in the same change.

pub mod cli;
pub mod drift;
pub mod error;
pub mod extract;
pub mod repo;

/// Re-export commonly used types
pub use drift::{Drift, DriftAnalyzer, DriftDetector, Report, SymbolRef};
pub use error::DocDriftError;
pub use extract::{DocCorpus, SymbolExtractor};
pub use repo::{ChangeSet, CodeUnit, DiffSegmenter, Repository};

/// Application-wide error type
pub use anyhow::Result;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "docdrift";

/// Run drift detection with default classification, patterns and matcher
pub fn detect(diff: &str, corpus: &DocCorpus, threshold: f64) -> Report {
    DriftDetector::new().detect(diff, corpus, threshold)
}
