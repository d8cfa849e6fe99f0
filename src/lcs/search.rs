// Diagonal run search with memoization, and the largest-match finder.
//
// `search` walks one down-right diagonal of a region. Every run it sees is
// recorded in the `MatchCache` under the run's start point, including each
// intermediate length, so later walks over the same cells can skip ahead.
//
// `largest` sweeps every diagonal intersecting a region: first the ones
// anchored on the top edge (including the main diagonal), then the ones
// anchored on the left edge. Each sweep stops once no remaining diagonal
// can beat the best run found.

use std::collections::HashMap;

use super::matrix::{EqualityMatrix, Point, Region, Run};

// ---------------------------------------------------------------------------
// MatchCache
// ---------------------------------------------------------------------------

/// Known run lengths keyed by start point. Scoped to a single diff call.
///
/// A cached length counts cells that are all equal, but it may have been
/// measured inside a larger region than the one reading it back. Readers
/// clamp it to their own bounds; entries are never invalidated.
#[derive(Debug, Default)]
pub struct MatchCache {
    runs: HashMap<Point, usize>,
    hits: u64,
    diagonals: u64,
}

impl MatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached start points.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Times a walk skipped ahead over a cached run.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Diagonals walked so far.
    pub fn diagonals(&self) -> u64 {
        self.diagonals
    }

    pub fn get(&self, p: Point) -> Option<usize> {
        self.runs.get(&p).copied()
    }

    fn record(&mut self, run: Run) {
        self.runs.insert(run.point, run.length);
    }
}

// ---------------------------------------------------------------------------
// Diagonal search
// ---------------------------------------------------------------------------

/// Longest run of equal cells on the diagonal anchored at `region.origin`,
/// inside `region`.
pub fn search(mx: &EqualityMatrix, cache: &mut MatchCache, region: Region) -> Run {
    cache.diagonals += 1;

    let steps = region.steps_from(region.origin);
    let mut best = Run::default();
    let mut current = Run::default();
    let mut in_run = false;
    let mut step = 0;

    while step < steps {
        let p = region.origin.diagonal(step);

        if let Some(cached) = cache.get(p) {
            cache.hits += 1;
            let length = cached.min(steps - step);
            if length > best.length {
                best = Run::new(p, length);
            }
            // An open run stays open across the skip.
            step += cached.max(1);
            continue;
        }

        if mx.get(p) {
            if in_run {
                current.length += 1;
            } else {
                in_run = true;
                current = Run::new(p, 1);
            }
            cache.record(current);
            if current.length > best.length {
                best = current;
            }
        } else {
            in_run = false;
        }
        step += 1;
    }

    best
}

// ---------------------------------------------------------------------------
// Largest-match finder
// ---------------------------------------------------------------------------

/// Longest run anywhere in `region`. Ties go to the first run found.
pub fn largest(mx: &EqualityMatrix, cache: &mut MatchCache, region: Region) -> Run {
    let mut best = Run::default();
    let Region {
        origin,
        limit_x,
        limit_y,
    } = region;

    // Top edge, main diagonal included.
    let mut x = origin.x;
    while x < limit_x && best.length < limit_x - x {
        let run = search(mx, cache, region.anchored_at(Point::new(x, origin.y)));
        if run.length > best.length {
            best = run;
        }
        x += 1;
    }

    // Left edge, main diagonal excluded.
    let mut y = origin.y + 1;
    while y < limit_y && best.length < limit_y - y {
        let run = search(mx, cache, region.anchored_at(Point::new(origin.x, y)));
        if run.length > best.length {
            best = run;
        }
        y += 1;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::with_equal;

    fn matrix_of(len_x: usize, len_y: usize, cells: &[(usize, usize)]) -> EqualityMatrix {
        EqualityMatrix::build(&with_equal(len_x, len_y, |i, j| cells.contains(&(i, j))))
    }

    #[test]
    fn search_finds_longest_run_on_diagonal() {
        // Diagonal from (0,0): T F T T T F
        let mx = matrix_of(6, 6, &[(0, 0), (2, 2), (3, 3), (4, 4)]);
        let mut cache = MatchCache::new();
        let run = search(&mx, &mut cache, mx.full_region());
        assert_eq!(run, Run::new(Point::new(2, 2), 3));
        assert_eq!(cache.get(Point::new(0, 0)), Some(1));
        assert_eq!(cache.get(Point::new(2, 2)), Some(3));
        assert_eq!(cache.get(Point::new(3, 3)), None);
    }

    #[test]
    fn search_without_matches_returns_empty_run() {
        let mx = matrix_of(4, 4, &[(1, 0)]);
        let mut cache = MatchCache::new();
        assert_eq!(search(&mx, &mut cache, mx.full_region()).length, 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn search_skips_ahead_over_cached_runs() {
        let mx = matrix_of(5, 5, &[(1, 1), (2, 2), (3, 3)]);
        let mut cache = MatchCache::new();
        let inner = Region::new(Point::new(1, 1), 5, 5);
        assert_eq!(search(&mx, &mut cache, inner).length, 3);
        assert_eq!(cache.hits(), 0);

        let run = search(&mx, &mut cache, mx.full_region());
        assert_eq!(run, Run::new(Point::new(1, 1), 3));
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn open_run_survives_a_cache_skip() {
        // Cells (0,0)..(4,4) all equal; (2,2) cached with length 2 first.
        let mx = matrix_of(5, 5, &[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
        let mut cache = MatchCache::new();
        let tail = Region::new(Point::new(2, 2), 4, 4);
        assert_eq!(search(&mx, &mut cache, tail), Run::new(Point::new(2, 2), 2));

        // Walk: (0,0) (1,1) open a run, (2,2) hits the cache and skips to
        // (4,4), which extends the still-open run to length 3.
        let run = search(&mx, &mut cache, mx.full_region());
        assert_eq!(run, Run::new(Point::new(0, 0), 3));
        assert_eq!(cache.get(Point::new(0, 0)), Some(3));
    }

    #[test]
    fn cached_length_is_clamped_to_the_querying_region() {
        let mx = matrix_of(4, 4, &[(0, 0), (1, 1), (2, 2), (3, 3)]);
        let mut cache = MatchCache::new();
        assert_eq!(search(&mx, &mut cache, mx.full_region()).length, 4);

        let small = Region::new(Point::new(0, 0), 2, 3);
        let run = search(&mx, &mut cache, small);
        assert_eq!(run, Run::new(Point::new(0, 0), 2));
        assert!(run.end().x <= small.limit_x && run.end().y <= small.limit_y);
    }

    #[test]
    fn largest_checks_off_main_diagonals() {
        // Main diagonal has a run of 1, the diagonal at (0,2) a run of 2.
        let mx = matrix_of(4, 4, &[(0, 0), (0, 2), (1, 3)]);
        let mut cache = MatchCache::new();
        let run = largest(&mx, &mut cache, mx.full_region());
        assert_eq!(run, Run::new(Point::new(0, 2), 2));
    }

    #[test]
    fn largest_keeps_first_of_equal_runs() {
        // Two runs of length 2: one on the top-edge sweep, one on the left.
        let mx = matrix_of(5, 5, &[(1, 0), (2, 1), (0, 2), (1, 3)]);
        let mut cache = MatchCache::new();
        let run = largest(&mx, &mut cache, mx.full_region());
        assert_eq!(run, Run::new(Point::new(1, 0), 2));
        assert_eq!(cache.get(Point::new(0, 2)), Some(2));
    }

    #[test]
    fn largest_prunes_once_nothing_longer_fits() {
        let n = 6;
        let cells: Vec<_> = (0..n).map(|i| (i, i)).collect();
        let mx = matrix_of(n, n, &cells);
        let mut cache = MatchCache::new();
        let run = largest(&mx, &mut cache, mx.full_region());
        assert_eq!(run.length, n);
        // Full-length main diagonal: every other diagonal is pruned.
        assert_eq!(cache.diagonals(), 1);
    }

    #[test]
    fn largest_of_empty_region_is_empty() {
        let mx = matrix_of(3, 3, &[(0, 0)]);
        let mut cache = MatchCache::new();
        let region = Region::new(Point::new(1, 1), 1, 3);
        assert_eq!(largest(&mx, &mut cache, region).length, 0);
    }
}
