//! Seqdiff: LCS-based diffing of any two indexable sequences.
//!
//! The engine never touches elements directly. It only asks for the two
//! lengths and whether element `i` of the first sequence equals element `j`
//! of the second (see [`Compare`]), so the same code diffs lines, tokens,
//! bytes or records.
//!
//! The crate provides:
//! - The diff engine (`engine`) and its LCS building blocks (`lcs`)
//! - Comparison adapters for closures and slices (`compare`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use seqdiff::{Mark, diff_slices};
//!
//! let old = ["fn main() {", "    old();", "}"];
//! let new = ["fn main() {", "    new();", "    more();", "}"];
//!
//! let delta = diff_slices(&old, &new);
//! assert_eq!(delta.removed, vec![Mark::new(1, 1)]);
//! assert_eq!(delta.added, vec![Mark::new(1, 2)]);
//! ```

pub mod compare;
pub mod delta;
pub mod engine;
pub mod io;
pub mod lcs;

#[cfg(feature = "cli")]
pub mod cli;

pub use compare::{Compare, Slices, WithEqual, with_equal};
pub use delta::{Delta, Mark};
pub use engine::{
    DiffError, DiffOptions, DiffStats, Report, diff, diff_lines, diff_slices, diff_with_options,
};

#[cfg(feature = "parallel")]
pub use engine::diff_all;
