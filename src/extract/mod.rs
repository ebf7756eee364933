//! Symbol and documentation extraction
//!
//! This module handles:
//! - Pulling changed symbol names out of code units (pattern matching)
//! - Collecting the documentation corpus from disk

pub mod code;
pub mod doc;

pub use code::{DefinitionRule, SymbolExtractor, SymbolPatterns, DEFINITION_RULES};
pub use doc::DocCorpus;
