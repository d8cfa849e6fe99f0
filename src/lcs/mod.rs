// LCS building blocks used by the diff engine.
//
// This module provides:
// - Dense bit storage for the equality grid
// - The equality matrix and its coordinate types
// - Memoized diagonal search and the largest-match finder

pub mod bits;
pub mod matrix;
pub mod search;
