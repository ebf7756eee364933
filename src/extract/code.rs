//! Changed-symbol extraction from code units
//!
//! Two pattern families run over a unit's diff text:
//! - Definition rules: a changed line containing a keyword that introduces a
//!   function, method or type, an optional receiver/parameter clause, then
//!   the identifier being defined
//! - Flag tokens: a quoted long option such as `"--output-format"`
//!
//! Each changed line yields at most one definition. Added and removed lines
//! are both scanned, so a rename surfaces the old name and the new name.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Keyword that introduces a definition in some language convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionRule {
    /// Trigger keyword, matched case-sensitively and followed by a space
    pub keyword: &'static str,
    /// Language family the keyword comes from
    pub convention: &'static str,
}

/// Ordered keyword table. Adding a convention is a new row here.
pub const DEFINITION_RULES: &[DefinitionRule] = &[
    DefinitionRule { keyword: "def", convention: "python" },
    DefinitionRule { keyword: "func", convention: "go" },
    DefinitionRule { keyword: "function", convention: "javascript" },
    DefinitionRule { keyword: "class", convention: "python/javascript/java" },
    DefinitionRule { keyword: "fn", convention: "rust" },
    DefinitionRule { keyword: "struct", convention: "rust/go/c" },
    DefinitionRule { keyword: "interface", convention: "typescript/java/go" },
    DefinitionRule { keyword: "trait", convention: "rust" },
];

/// Optional receiver/parameter clause, then an identifier of two or more chars
const CAPTURE_RULE: &str = r"\s*(?:\([^)]*\)\s*)?([A-Za-z_][A-Za-z0-9_]+)";

/// Quoted long option
const FLAG_PATTERN: &str = r#""(--[A-Za-z0-9_][A-Za-z0-9_-]*)""#;

/// Compiled matchers, built once and shared by reference
#[derive(Debug, Clone)]
pub struct SymbolPatterns {
    rules: Vec<DefinitionRule>,
    definition: Regex,
    flag: Regex,
}

impl SymbolPatterns {
    /// Compile the given definition rules into one alternation plus the flag matcher.
    /// A changed line yields at most one definition: the first keyword that is
    /// followed by a capturable identifier.
    pub fn new(rules: &[DefinitionRule]) -> Result<Self> {
        if rules.is_empty() {
            anyhow::bail!("At least one definition rule is required");
        }

        let keywords = rules
            .iter()
            .map(|rule| regex::escape(rule.keyword))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"^[+-].*?\b(?:{}) {}", keywords, CAPTURE_RULE);
        let definition = Regex::new(&pattern)
            .with_context(|| format!("Invalid definition rules: {}", keywords))?;

        let flag = Regex::new(FLAG_PATTERN).context("Invalid flag pattern")?;

        Ok(Self {
            rules: rules.to_vec(),
            definition,
            flag,
        })
    }

    /// Patterns for the built-in rule table, compiled once per process
    pub fn builtin() -> &'static SymbolPatterns {
        static BUILTIN: OnceLock<SymbolPatterns> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            SymbolPatterns::new(DEFINITION_RULES).expect("built-in symbol patterns are valid")
        })
    }

    /// Rules in table order
    pub fn rules(&self) -> impl Iterator<Item = &DefinitionRule> {
        self.rules.iter()
    }
}

/// Extracts distinct symbol names from code unit text
#[derive(Debug, Clone)]
pub struct SymbolExtractor {
    patterns: SymbolPatterns,
}

impl SymbolExtractor {
    /// Create an extractor with the built-in rule table
    pub fn new() -> Self {
        Self::with_patterns(SymbolPatterns::builtin().clone())
    }

    /// Create an extractor around already compiled patterns
    pub fn with_patterns(patterns: SymbolPatterns) -> Self {
        Self { patterns }
    }

    /// Extract symbol names, distinct, in order of first occurrence.
    /// Matching is case-sensitive.
    pub fn extract(&self, unit_text: &str) -> Vec<String> {
        // (byte offset, family, name); definitions sort ahead of flags at equal offsets
        let mut found: Vec<(usize, u8, &str)> = Vec::new();

        for (line_start, line) in changed_lines(unit_text) {
            let caps = self.patterns.definition.captures(line);
            if let Some(name) = caps.and_then(|caps| caps.get(1)) {
                found.push((line_start + name.start(), 0, name.as_str()));
            }
        }

        for caps in self.patterns.flag.captures_iter(unit_text) {
            if let Some(flag) = caps.get(1) {
                found.push((flag.start(), 1, flag.as_str()));
            }
        }

        found.sort_by_key(|&(offset, family, _)| (offset, family));

        let mut seen = HashSet::new();
        found
            .into_iter()
            .filter(|(_, _, name)| seen.insert(*name))
            .map(|(_, _, name)| name.to_string())
            .collect()
    }
}

impl Default for SymbolExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Added or removed lines inside hunks, with their byte offsets.
/// File header lines (`--- a/..`, `+++ b/..`) precede the first `@@` and are skipped.
fn changed_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    let mut in_hunk = false;

    text.split_inclusive('\n').filter_map(move |raw| {
        let start = offset;
        offset += raw.len();
        let line = raw.trim_end_matches(['\n', '\r']);

        if line.starts_with("@@") {
            in_hunk = true;
            return None;
        }
        if in_hunk && (line.starts_with('+') || line.starts_with('-')) {
            Some((start, line))
        } else {
            None
        }
    })
}
