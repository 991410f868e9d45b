//! Logical line newtype.

use std::fmt;

/// Index of a logical line as delivered by the reader. 0-indexed internally,
/// 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LineIndex(usize);

impl LineIndex {
    /// The first line.
    pub const ZERO: Self = Self(0);

    /// Create a new LineIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Create a LineIndex from a 1-based line number, saturating at the first line.
    pub fn from_one_based(number: usize) -> Self {
        Self(number.saturating_sub(1))
    }

    /// Get the raw 0-based index value.
    pub fn index(&self) -> usize {
        self.0
    }

    /// True for the first line.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Get the 1-based line number for display purposes.
    pub fn display(&self) -> usize {
        self.0 + 1
    }

    /// Get the next line index, saturating at `usize::MAX`.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Get the previous line index, or `None` on the first line.
    pub fn checked_prev(&self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}

impl From<usize> for LineIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for LineIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
