//! Reference tests between documents and symbols
//!
//! A `ReferenceMatcher` answers one question: does this document text
//! mention this symbol? Scoring never looks past that answer, so a stricter
//! matcher can replace the default without touching aggregation.

use serde::{Deserialize, Serialize};

/// Decides whether a document references a symbol
pub trait ReferenceMatcher: Send + Sync {
    /// Matcher name
    fn name(&self) -> &str;

    /// Check whether `document` mentions `symbol`, ignoring case
    fn references(&self, symbol: &str, document: &str) -> bool {
        self.references_folded(&symbol.to_lowercase(), &document.to_lowercase())
    }

    /// Same test on text the caller has already lowercased.
    ///
    /// The analyzer folds each document once per run and each symbol once,
    /// then calls this directly.
    fn references_folded(&self, symbol: &str, document: &str) -> bool;
}

/// Case-insensitive substring containment
///
/// Short or common identifiers produce false positives; that is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl ReferenceMatcher for SubstringMatcher {
    fn name(&self) -> &str {
        "substring"
    }

    fn references_folded(&self, symbol: &str, document: &str) -> bool {
        document.contains(symbol)
    }
}

/// Case-insensitive match that must not sit inside a longer identifier
///
/// `get_users` matches "call get_users()" but not "get_users_page".
#[derive(Debug, Clone, Copy, Default)]
pub struct WordBoundaryMatcher;

impl ReferenceMatcher for WordBoundaryMatcher {
    fn name(&self) -> &str {
        "word"
    }

    fn references_folded(&self, symbol: &str, document: &str) -> bool {
        if symbol.is_empty() {
            return false;
        }

        document.match_indices(symbol).any(|(start, _)| {
            let end = start + symbol.len();
            let before = document[..start].chars().next_back();
            let after = document[end..].chars().next();
            !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Selectable matcher implementations
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    /// Case-insensitive substring containment
    #[default]
    Substring,
    /// Case-insensitive whole-identifier match
    Word,
}

impl MatcherKind {
    /// Build the matcher
    pub fn build(self) -> Box<dyn ReferenceMatcher> {
        match self {
            MatcherKind::Substring => Box::new(SubstringMatcher),
            MatcherKind::Word => Box::new(WordBoundaryMatcher),
        }
    }
}

impl std::fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatcherKind::Substring => write!(f, "substring"),
            MatcherKind::Word => write!(f, "word"),
        }
    }
}

impl std::str::FromStr for MatcherKind {
    type Err = crate::error::DocDriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "substring" => Ok(MatcherKind::Substring),
            "word" => Ok(MatcherKind::Word),
            _ => Err(crate::error::DocDriftError::UnknownMatcher(s.to_string())),
        }
    }
}
