//! Main drift detection engine
//!
//! Coordinates segmentation, extraction and cross-referencing. Every step is
//! a pure function of its inputs and iterates ordered collections, so equal
//! inputs always produce equal reports.

use super::{Drift, ReferenceCounts, ReferenceMatcher, Report, SubstringMatcher, SymbolRef};
use crate::extract::{DocCorpus, SymbolExtractor};
use crate::repo::{CodeUnit, DiffSegmenter};
use std::collections::{BTreeSet, HashSet};

/// Cross-references changed symbols against the documentation corpus
pub struct DriftAnalyzer {
    extractor: SymbolExtractor,
    matcher: Box<dyn ReferenceMatcher>,
}

impl DriftAnalyzer {
    /// Create an analyzer with the built-in extractor and substring matching
    pub fn new() -> Self {
        Self::with_parts(SymbolExtractor::new(), Box::new(SubstringMatcher))
    }

    /// Create an analyzer from explicit parts
    pub fn with_parts(extractor: SymbolExtractor, matcher: Box<dyn ReferenceMatcher>) -> Self {
        Self { extractor, matcher }
    }

    /// Distinct (symbol, file) pairs across all units, in unit order then
    /// first-occurrence order within each unit
    pub fn symbol_refs(&self, units: &[CodeUnit]) -> Vec<SymbolRef> {
        let mut seen = HashSet::new();
        let mut refs = Vec::new();

        for unit in units {
            for symbol in self.extractor.extract(&unit.text) {
                let symbol_ref = SymbolRef::new(&symbol, &unit.path);
                if seen.insert(symbol_ref.clone()) {
                    refs.push(symbol_ref);
                }
            }
        }

        refs
    }

    /// Analyze code units against the corpus.
    ///
    /// Each `SymbolRef` is counted on its own: a document naming a symbol
    /// that changed in two files contributes two references.
    pub fn analyze(
        &self,
        units: &[CodeUnit],
        corpus: &DocCorpus,
        changed_docs: &BTreeSet<String>,
        threshold: f64,
    ) -> Report {
        let refs = self.symbol_refs(units);
        let mut counts = ReferenceCounts::default();
        let mut drifts = Vec::new();

        for symbol_ref in refs {
            let mut stale_docs = Vec::new();
            let symbol = symbol_ref.symbol.to_lowercase();

            for (doc_path, content) in corpus.iter_folded() {
                if !self.matcher.references_folded(&symbol, content) {
                    continue;
                }
                counts.total += 1;
                if !changed_docs.contains(doc_path) {
                    counts.stale += 1;
                    stale_docs.push(doc_path.to_string());
                }
            }

            if !stale_docs.is_empty() {
                drifts.push(Drift {
                    symbol: symbol_ref.symbol,
                    code_file: symbol_ref.code_file,
                    stale_docs,
                });
            }
        }

        tracing::debug!(
            matcher = self.matcher.name(),
            total = counts.total,
            stale = counts.stale,
            drifts = drifts.len(),
            "cross-referenced symbols"
        );

        Report::new(drifts, counts, threshold)
    }
}

impl Default for DriftAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Diff-to-report pipeline: segmenter, then extractor, then analyzer
#[derive(Default)]
pub struct DriftDetector {
    segmenter: DiffSegmenter,
    analyzer: DriftAnalyzer,
}

impl DriftDetector {
    /// Create a detector with default classification, patterns and matcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom parts
    pub fn with_parts(segmenter: DiffSegmenter, analyzer: DriftAnalyzer) -> Self {
        Self {
            segmenter,
            analyzer,
        }
    }

    /// Run the full analysis on a unified diff
    pub fn detect(&self, diff: &str, corpus: &DocCorpus, threshold: f64) -> Report {
        let changes = self.segmenter.segment(diff);
        self.analyzer
            .analyze(&changes.code_units, corpus, &changes.changed_docs, threshold)
    }

    /// The segmenter in use
    pub fn segmenter(&self) -> &DiffSegmenter {
        &self.segmenter
    }

    /// The analyzer in use
    pub fn analyzer(&self) -> &DriftAnalyzer {
        &self.analyzer
    }
}
