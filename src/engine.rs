// Diff engine: ties the equality matrix and match search into a delta.
//
// One call:
//   - validates the grid size against `DiffOptions`
//   - builds the equality matrix (one predicate call per cell)
//   - splits regions around their largest match until no match is left
//   - emits added/removed marks for every leaf region, left to right
//
// Matrix and cache are owned by the call, so calls are independent.

use thiserror::Error;

use crate::compare::{Compare, Slices};
use crate::delta::{Delta, Mark};
use crate::lcs::matrix::{EqualityMatrix, Region};
use crate::lcs::search::{self, MatchCache};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Default cap on equality grid cells (2^32 cells, 512 MiB of bits).
pub const DEFAULT_MAX_CELLS: u64 = 1 << 32;

/// Configuration for a diff call.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Largest equality grid (`len_x * len_y`) the call may allocate.
    pub max_cells: u64,
}

impl DiffOptions {
    /// No cell limit beyond what fits in memory.
    pub fn unbounded() -> Self {
        Self {
            max_cells: u64::MAX,
        }
    }
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    #[error("equality grid of {len_x}x{len_y} cells overflows the address space")]
    GridOverflow { len_x: usize, len_y: usize },
    #[error("equality grid of {cells} cells exceeds the limit of {limit}")]
    GridTooLarge { cells: u64, limit: u64 },
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Counters collected during one diff call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub len_x: usize,
    pub len_y: usize,
    /// Grid cells, equal to the number of predicate evaluations.
    pub cells: usize,
    /// Cells whose elements compared equal.
    pub equal_cells: usize,
    /// Start points held in the match cache at the end of the call.
    pub cache_entries: usize,
    /// Cache skip-aheads taken by diagonal walks.
    pub cache_hits: u64,
    /// Diagonals walked.
    pub diagonals: u64,
    /// Regions processed, leaves included.
    pub regions: u64,
    /// Common runs the delta was split around.
    pub matches: u64,
}

/// A delta plus the stats of the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub delta: Delta,
    pub stats: DiffStats,
}

// ---------------------------------------------------------------------------
// High-level diff
// ---------------------------------------------------------------------------

/// Diff two sequences described by `data`.
///
/// # Panics
///
/// Panics if `len_x * len_y` overflows `usize`; such a grid could never be
/// allocated. Use [`diff_with_options`] to get an error instead.
pub fn diff<C: Compare + ?Sized>(data: &C) -> Delta {
    match diff_with_options(data, &DiffOptions::unbounded()) {
        Ok(report) => report.delta,
        Err(e) => panic!("seqdiff: {e}"),
    }
}

/// Diff with explicit options, returning the delta together with stats.
pub fn diff_with_options<C: Compare + ?Sized>(
    data: &C,
    opts: &DiffOptions,
) -> Result<Report, DiffError> {
    let (len_x, len_y) = data.lengths();
    let cells = len_x
        .checked_mul(len_y)
        .ok_or(DiffError::GridOverflow { len_x, len_y })?;
    if cells as u64 > opts.max_cells {
        return Err(DiffError::GridTooLarge {
            cells: cells as u64,
            limit: opts.max_cells,
        });
    }

    log::debug!("building {len_x}x{len_y} equality matrix ({cells} cells)");
    let mx = EqualityMatrix::build(data);
    let mut cache = MatchCache::new();
    let mut stats = DiffStats {
        len_x,
        len_y,
        cells,
        equal_cells: mx.equal_cells(),
        ..Default::default()
    };

    let delta = assemble(&mx, &mut cache, &mut stats);

    stats.cache_entries = cache.len();
    stats.cache_hits = cache.hits();
    stats.diagonals = cache.diagonals();
    log::debug!(
        "diff done: {} removed / {} added marks, {} matches, {} regions, {} diagonals, {} cache hits",
        delta.removed.len(),
        delta.added.len(),
        stats.matches,
        stats.regions,
        stats.diagonals,
        stats.cache_hits
    );

    Ok(Report { delta, stats })
}

/// Diff two slices element by element.
pub fn diff_slices<T: PartialEq>(old: &[T], new: &[T]) -> Delta {
    diff(&Slices::new(old, new))
}

/// Diff two texts line by line. Marks are in line numbers (0-based).
pub fn diff_lines(old: &str, new: &str) -> Delta {
    let old: Vec<&str> = old.lines().collect();
    let new: Vec<&str> = new.lines().collect();
    diff_slices(&old, &new)
}

/// Diff a batch of independent inputs on the rayon pool. Results keep the
/// input order.
#[cfg(feature = "parallel")]
pub fn diff_all<C: Compare + Sync>(
    inputs: &[C],
    opts: &DiffOptions,
) -> Vec<Result<Report, DiffError>> {
    inputs
        .par_iter()
        .map(|data| diff_with_options(data, opts))
        .collect()
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Split regions around their largest match until only leaves remain.
///
/// Regions live on an explicit stack rather than the call stack. The right
/// half is pushed before the left so leaves come off in left-to-right
/// order, which keeps both mark lists sorted without a merge step.
fn assemble(mx: &EqualityMatrix, cache: &mut MatchCache, stats: &mut DiffStats) -> Delta {
    let mut delta = Delta::default();
    let mut pending = vec![mx.full_region()];

    while let Some(region) = pending.pop() {
        stats.regions += 1;
        let m = search::largest(mx, cache, region);

        if m.length == 0 {
            if region.span_y() > 0 {
                delta
                    .added
                    .push(Mark::new(region.origin.y, region.span_y()));
            }
            if region.span_x() > 0 {
                delta
                    .removed
                    .push(Mark::new(region.origin.x, region.span_x()));
            }
            continue;
        }

        log::trace!(
            "match ({}, {}) len {} in [{:?}, ({}, {}))",
            m.point.x,
            m.point.y,
            m.length,
            region.origin,
            region.limit_x,
            region.limit_y
        );
        stats.matches += 1;

        pending.push(Region::new(m.end(), region.limit_x, region.limit_y));
        pending.push(Region::new(region.origin, m.point.x, m.point.y));
    }

    delta
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
