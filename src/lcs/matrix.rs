// Positional equality matrix.
//
// Cell (x, y) holds `equal(x, y)` for every pair of indices. The grid is
// filled once, row by row, before any search runs and is read-only after.
// Cells are laid out with y varying fastest: `address = y + x * len_y`.

use crate::compare::Compare;

use super::bits::BitVector;

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A cell address: `x` indexes the first sequence, `y` the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The point `steps` cells further down the same diagonal.
    #[inline(always)]
    pub const fn diagonal(self, steps: usize) -> Self {
        Self {
            x: self.x + steps,
            y: self.y + steps,
        }
    }
}

/// A run of equal cells along one diagonal. `length == 0` means no match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Run {
    pub point: Point,
    pub length: usize,
}

impl Run {
    pub const fn new(point: Point, length: usize) -> Self {
        Self { point, length }
    }

    /// First point after the run.
    pub const fn end(&self) -> Point {
        self.point.diagonal(self.length)
    }
}

/// Rectangular subproblem `[origin, (limit_x, limit_y))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub origin: Point,
    pub limit_x: usize,
    pub limit_y: usize,
}

impl Region {
    pub fn new(origin: Point, limit_x: usize, limit_y: usize) -> Self {
        debug_assert!(origin.x <= limit_x && origin.y <= limit_y);
        Self {
            origin,
            limit_x,
            limit_y,
        }
    }

    /// The same bounds, searched from a different anchor.
    pub fn anchored_at(&self, origin: Point) -> Self {
        Self::new(origin, self.limit_x, self.limit_y)
    }

    pub fn span_x(&self) -> usize {
        self.limit_x - self.origin.x
    }

    pub fn span_y(&self) -> usize {
        self.limit_y - self.origin.y
    }

    /// Cells left on the diagonal through `p` before leaving the region.
    #[inline(always)]
    pub fn steps_from(&self, p: Point) -> usize {
        self.limit_x
            .saturating_sub(p.x)
            .min(self.limit_y.saturating_sub(p.y))
    }
}

// ---------------------------------------------------------------------------
// EqualityMatrix
// ---------------------------------------------------------------------------

/// The full `len_x * len_y` grid of equality results.
#[derive(Debug, Clone)]
pub struct EqualityMatrix {
    bits: BitVector,
    len_x: usize,
    len_y: usize,
}

impl EqualityMatrix {
    /// Fill the grid by evaluating `data.equal(x, y)` exactly once per cell.
    ///
    /// The caller guarantees `len_x * len_y` does not overflow.
    pub fn build<C: Compare + ?Sized>(data: &C) -> Self {
        let (len_x, len_y) = data.lengths();
        let mut bits = BitVector::new(len_x * len_y);
        for x in 0..len_x {
            let row = x * len_y;
            for y in 0..len_y {
                if data.equal(x, y) {
                    bits.set(row + y, true);
                }
            }
        }
        Self { bits, len_x, len_y }
    }

    pub fn len_x(&self) -> usize {
        self.len_x
    }

    pub fn len_y(&self) -> usize {
        self.len_y
    }

    /// Number of cells in the grid.
    pub fn cells(&self) -> usize {
        self.bits.len()
    }

    /// Number of equal cells.
    pub fn equal_cells(&self) -> usize {
        self.bits.count_ones()
    }

    /// The region covering both sequences entirely.
    pub fn full_region(&self) -> Region {
        Region::new(Point::default(), self.len_x, self.len_y)
    }

    #[inline(always)]
    fn at(&self, p: Point) -> usize {
        p.y + p.x * self.len_y
    }

    #[inline(always)]
    pub fn get(&self, p: Point) -> bool {
        debug_assert!(p.x < self.len_x && p.y < self.len_y);
        self.bits.get(self.at(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::with_equal;
    use std::cell::RefCell;

    #[test]
    fn evaluates_every_cell_once_in_row_major_order() {
        let calls = RefCell::new(Vec::new());
        let cmp = with_equal(2, 3, |i, j| {
            calls.borrow_mut().push((i, j));
            i == j
        });
        let mx = EqualityMatrix::build(&cmp);
        assert_eq!(
            calls.into_inner(),
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        assert_eq!(mx.cells(), 6);
        assert_eq!(mx.equal_cells(), 2);
        assert!(mx.get(Point::new(0, 0)));
        assert!(mx.get(Point::new(1, 1)));
        assert!(!mx.get(Point::new(1, 2)));
    }

    #[test]
    fn layout_is_y_fastest() {
        let cmp = with_equal(3, 4, |i, j| (i, j) == (2, 1));
        let mx = EqualityMatrix::build(&cmp);
        assert_eq!(mx.at(Point::new(2, 1)), 9);
        assert!(mx.bits.get(9));
        assert_eq!(mx.equal_cells(), 1);
    }

    #[test]
    fn empty_sequences_give_empty_grid() {
        let mx = EqualityMatrix::build(&with_equal(0, 7, |_, _| true));
        assert_eq!(mx.cells(), 0);
        assert_eq!(mx.full_region().span_y(), 7);
        assert_eq!(mx.full_region().span_x(), 0);
    }

    #[test]
    fn steps_from_is_bounded_by_the_nearer_limit() {
        let r = Region::new(Point::new(1, 2), 5, 4);
        assert_eq!(r.steps_from(r.origin), 2);
        assert_eq!(r.steps_from(Point::new(4, 2)), 1);
        assert_eq!(r.steps_from(Point::new(6, 2)), 0);
    }
}
