//! Ordered cue tables.
//!
//! A cue table maps lexical cues in free text to values from a closed
//! vocabulary.  Each entry pairs a matcher with the value it produces:
//!
//! | Matcher | Technique |
//! |---------|-----------|
//! | [`CueSpec::Keywords`] | Substring match via [`aho_corasick`], ASCII case-insensitive |
//! | [`CueSpec::Pattern`] | Compiled [`regex`], case-insensitive |
//!
//! Entries are evaluated in table order, which is also the priority order
//! for [`CueTable::first_match`].
//!
//! # Example
//!
//! ```rust
//! # use flowsmith_compiler::cue::{CueSpec, CueTable};
//! let table = CueTable::build(&[
//!     (CueSpec::Keywords(&["hour"]), "hourly"),
//!     (CueSpec::Pattern(r"\bweek(ly)?\b"), "weekly"),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.first_match("Run it every HOUR"), Some("hourly"));
//! assert_eq!(table.first_match("once a week"), Some("weekly"));
//! assert_eq!(table.first_match("now"), None);
//! ```

use aho_corasick::AhoCorasick;
use regex::{Regex, RegexBuilder};

use crate::error::{CompileError, Result};

/// Static description of a cue, suitable for `const` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueSpec {
    /// Matches when any of the keywords occurs anywhere in the text.
    Keywords(&'static [&'static str]),
    /// Matches when the regex finds a match anywhere in the text.
    Pattern(&'static str),
}

impl CueSpec {
    /// Human-readable form used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Keywords(words) => words.join("|"),
            Self::Pattern(pattern) => (*pattern).to_string(),
        }
    }
}

/// A compiled cue.
#[derive(Debug, Clone)]
enum Matcher {
    Keywords(AhoCorasick),
    Pattern(Regex),
}

impl Matcher {
    fn compile(spec: &CueSpec) -> Result<Self> {
        match spec {
            CueSpec::Keywords(words) => AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(words.iter())
                .map(Self::Keywords)
                .map_err(|e| CompileError::InvalidCue {
                    pattern: spec.describe(),
                    reason: e.to_string(),
                }),
            CueSpec::Pattern(pattern) => RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map(Self::Pattern)
                .map_err(|e| CompileError::InvalidCue {
                    pattern: spec.describe(),
                    reason: e.to_string(),
                }),
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Keywords(ac) => ac.is_match(text),
            Self::Pattern(re) => re.is_match(text),
        }
    }
}

/// An ordered list of `(cue, value)` pairs.
///
/// Tables are built once and shared; matching takes `&self` and keeps no
/// state between calls.
#[derive(Debug, Clone)]
pub struct CueTable<T> {
    entries: Vec<(Matcher, T)>,
}

impl<T: Copy + PartialEq> CueTable<T> {
    /// Compile a table from its static description.
    ///
    /// Returns [`CompileError::InvalidCue`] if any pattern fails to compile.
    pub fn build(specs: &[(CueSpec, T)]) -> Result<Self> {
        let entries = specs
            .iter()
            .map(|(spec, value)| Matcher::compile(spec).map(|m| (m, *value)))
            .collect::<Result<Vec<_>>>()?;

        tracing::trace!(entries = entries.len(), "cue table compiled");
        Ok(Self { entries })
    }

    /// Return the value of the first entry whose cue occurs in `text`.
    pub fn first_match(&self, text: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(matcher, _)| matcher.is_match(text))
            .map(|(_, value)| *value)
    }

    /// Return the value of every entry whose cue occurs in `text`, in table
    /// order.  A value listed under several entries is reported once.
    pub fn all_matches(&self, text: &str) -> Vec<T> {
        let mut hits = Vec::new();
        for (matcher, value) in &self.entries {
            if !hits.contains(value) && matcher.is_match(text) {
                hits.push(*value);
            }
        }
        hits
    }

    /// Return the number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
