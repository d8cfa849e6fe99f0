// Sequence comparison capability consumed by the engine.
//
// The engine never sees elements, only the two lengths and a cross-sequence
// equality predicate. Adapters are provided for closures and slices.

/// Everything the engine needs to know about two sequences.
pub trait Compare {
    /// Lengths of the first and second sequence.
    fn lengths(&self) -> (usize, usize);

    /// Whether element `i` of the first sequence equals element `j` of the
    /// second. Only called with `i < lengths().0` and `j < lengths().1`.
    fn equal(&self, i: usize, j: usize) -> bool;
}

impl<C: Compare + ?Sized> Compare for &C {
    fn lengths(&self) -> (usize, usize) {
        (**self).lengths()
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        (**self).equal(i, j)
    }
}

// ---------------------------------------------------------------------------
// Closure adapter
// ---------------------------------------------------------------------------

/// A [`Compare`] built from two lengths and an equality closure.
#[derive(Debug, Clone, Copy)]
pub struct WithEqual<F> {
    len_x: usize,
    len_y: usize,
    equal: F,
}

impl<F> Compare for WithEqual<F>
where
    F: Fn(usize, usize) -> bool,
{
    fn lengths(&self) -> (usize, usize) {
        (self.len_x, self.len_y)
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        (self.equal)(i, j)
    }
}

/// Build a [`Compare`] for sequences of length `len_x` and `len_y` whose
/// elements are compared by `equal`.
///
/// ```
/// let old = ["a", "b", "c"];
/// let new = ["a", "c"];
/// let cmp = seqdiff::with_equal(old.len(), new.len(), |i, j| old[i] == new[j]);
/// let delta = seqdiff::diff(&cmp);
/// assert_eq!(delta.removed, vec![seqdiff::Mark::new(1, 1)]);
/// ```
pub fn with_equal<F>(len_x: usize, len_y: usize, equal: F) -> WithEqual<F>
where
    F: Fn(usize, usize) -> bool,
{
    WithEqual {
        len_x,
        len_y,
        equal,
    }
}

// ---------------------------------------------------------------------------
// Slice adapter
// ---------------------------------------------------------------------------

/// A [`Compare`] over two slices of `PartialEq` elements.
#[derive(Debug, Clone, Copy)]
pub struct Slices<'a, T> {
    old: &'a [T],
    new: &'a [T],
}

impl<'a, T: PartialEq> Slices<'a, T> {
    pub fn new(old: &'a [T], new: &'a [T]) -> Self {
        Self { old, new }
    }
}

impl<T: PartialEq> Compare for Slices<'_, T> {
    fn lengths(&self) -> (usize, usize) {
        (self.old.len(), self.new.len())
    }

    #[inline]
    fn equal(&self, i: usize, j: usize) -> bool {
        self.old[i] == self.new[j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_equal_reports_lengths_and_forwards_predicate() {
        let cmp = with_equal(3, 2, |i, j| i == j);
        assert_eq!(cmp.lengths(), (3, 2));
        assert!(cmp.equal(1, 1));
        assert!(!cmp.equal(2, 1));
    }

    #[test]
    fn slices_compare_elements() {
        let old = [1, 2, 3];
        let new = [3, 2];
        let cmp = Slices::new(&old, &new);
        assert_eq!(cmp.lengths(), (3, 2));
        assert!(cmp.equal(2, 0));
        assert!(cmp.equal(1, 1));
        assert!(!cmp.equal(0, 0));
    }

    #[test]
    fn references_are_comparable() {
        fn lengths_of(c: impl Compare) -> (usize, usize) {
            c.lengths()
        }
        let cmp = with_equal(4, 5, |_, _| false);
        assert_eq!(lengths_of(&cmp), (4, 5));
        let dynamic: &dyn Compare = &cmp;
        assert_eq!(lengths_of(dynamic), (4, 5));
    }
}
