// Diff result types.

use std::ops::Range;

/// A contiguous range in one of the two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mark {
    /// Offset of the first element.
    pub from: usize,
    /// Number of elements covered.
    pub length: usize,
}

impl Mark {
    pub const fn new(from: usize, length: usize) -> Self {
        Self { from, length }
    }

    /// One past the last covered offset.
    pub const fn end(&self) -> usize {
        self.from + self.length
    }

    pub const fn range(&self) -> Range<usize> {
        self.from..self.end()
    }
}

/// Result of a diff: ranges added in the second sequence and ranges removed
/// from the first, each ordered by position.
///
/// Marks produced by different leaves of the search are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    pub added: Vec<Mark>,
    pub removed: Vec<Mark>,
}

impl Delta {
    /// True when both sequences are equal.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Total number of elements added.
    pub fn added_len(&self) -> usize {
        self.added.iter().map(|m| m.length).sum()
    }

    /// Total number of elements removed.
    pub fn removed_len(&self) -> usize {
        self.removed.iter().map(|m| m.length).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_bounds() {
        let m = Mark::new(3, 4);
        assert_eq!(m.end(), 7);
        assert_eq!(m.range(), 3..7);
    }

    #[test]
    fn delta_totals() {
        let delta = Delta {
            added: vec![Mark::new(0, 2), Mark::new(5, 1)],
            removed: vec![Mark::new(1, 4)],
        };
        assert!(!delta.is_empty());
        assert_eq!(delta.added_len(), 3);
        assert_eq!(delta.removed_len(), 4);
        assert!(Delta::default().is_empty());
    }
}
