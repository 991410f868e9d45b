//! Search patterns.
//!
//! A query compiles to a regular expression. Queries that are not valid
//! regular expressions are matched literally, so typing `(` or `a[` still
//! finds something instead of failing.
//!
//! Matching uses smart case: a query without uppercase letters matches
//! case-insensitively, a query with any uppercase letter is case-sensitive.

use regex::{Regex, RegexBuilder};
use std::ops::Range;
use tracing::debug;

// ===== SearchDirection =====

/// Direction a search scans in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    /// Towards higher line numbers.
    #[default]
    Forward,
    /// Towards line 0.
    Backward,
}

impl SearchDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

// ===== SearchPattern =====

/// Compiled search query.
///
/// Two patterns built from the same query string always match the same
/// lines.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    query: String,
    regex: Regex,
}

impl PartialEq for SearchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.query == other.query
    }
}

impl SearchPattern {
    /// The query this pattern was compiled from.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// True if the pattern occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Byte ranges of all non-overlapping occurrences in `text`.
    pub fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
            .collect()
    }

    /// Index of the display row holding the first occurrence in `text`.
    ///
    /// `rows` are the wrapped byte ranges of `text` (see
    /// [`wrap_line`](crate::state::wrap::wrap_line)). An occurrence that
    /// starts in whitespace trimmed away between two rows belongs to the
    /// following row. Returns `None` if the line does not match.
    pub fn first_hit_row(&self, text: &str, rows: &[Range<usize>]) -> Option<usize> {
        let start = self.regex.find(text)?.start();
        Some(row_of(start, rows))
    }

    /// Indices of every display row an occurrence starts on, ascending and
    /// without duplicates. Rows are assigned as in
    /// [`first_hit_row`](Self::first_hit_row).
    pub fn hit_rows(&self, text: &str, rows: &[Range<usize>]) -> Vec<usize> {
        let mut hit_rows: Vec<usize> = self
            .regex
            .find_iter(text)
            .map(|m| row_of(m.start(), rows))
            .collect();
        hit_rows.dedup();
        hit_rows
    }
}

/// Row containing byte `start`, or the row after the gap it falls into.
fn row_of(start: usize, rows: &[Range<usize>]) -> usize {
    rows.iter()
        .position(|row| start < row.end)
        .unwrap_or(rows.len().saturating_sub(1))
}

/// Compile a query string into a pattern.
///
/// Returns `None` for an empty query.
pub fn to_pattern(query: &str) -> Option<SearchPattern> {
    if query.is_empty() {
        return None;
    }

    let case_insensitive = !query.chars().any(char::is_uppercase);
    let regex = match build(query, case_insensitive) {
        Ok(regex) => regex,
        Err(error) => {
            debug!(query, %error, "Not a valid regex, matching literally");
            // An escaped literal always compiles
            build(&regex::escape(query), case_insensitive).ok()?
        }
    };

    Some(SearchPattern {
        query: query.to_string(),
        regex,
    })
}

fn build(source: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source)
        .case_insensitive(case_insensitive)
        .build()
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
