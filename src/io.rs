// File-level helpers for diffing.
//
// Provides `diff_files()`, which reads two files into memory, splits them
// into lines or bytes and runs the engine over the pieces. Optionally
// computes SHA-256 digests of both inputs (feature-gated behind `file-io`).

use std::io;
use std::path::Path;

use thiserror::Error;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::compare::Slices;
use crate::engine::{self, DiffError, DiffOptions, Report};

// ---------------------------------------------------------------------------
// Granularity
// ---------------------------------------------------------------------------

/// Unit the files are compared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Lines, each keeping its `\n` terminator.
    Lines,
    /// Single bytes.
    Bytes,
}

/// Split `data` into lines, keeping terminators. A missing final newline
/// makes the last line differ from the same text with one.
pub fn split_lines(data: &[u8]) -> Vec<&[u8]> {
    data.split_inclusive(|&b| b == b'\n').collect()
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Result of `diff_files()`.
#[derive(Debug, Clone)]
pub struct FileDiff {
    pub granularity: Granularity,
    /// Contents of the old file.
    pub old: Vec<u8>,
    /// Contents of the new file.
    pub new: Vec<u8>,
    /// Delta (in units of `granularity`) and engine stats.
    pub report: Report,
    /// SHA-256 of the old file (if `file-io` feature is enabled).
    pub old_sha256: Option<[u8; 32]>,
    /// SHA-256 of the new file (if `file-io` feature is enabled).
    pub new_sha256: Option<[u8; 32]>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file diffs.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("diff error: {0}")]
    Diff(#[from] DiffError),
}

// ---------------------------------------------------------------------------
// diff_files
// ---------------------------------------------------------------------------

/// Diff the file at `old_path` against the file at `new_path`.
///
/// Both files are read fully into memory.
pub fn diff_files(
    old_path: &Path,
    new_path: &Path,
    granularity: Granularity,
    opts: &DiffOptions,
) -> Result<FileDiff, IoError> {
    let old = std::fs::read(old_path)?;
    let new = std::fs::read(new_path)?;
    log::debug!(
        "diffing {} ({} bytes) against {} ({} bytes) by {granularity:?}",
        old_path.display(),
        old.len(),
        new_path.display(),
        new.len()
    );

    let report = match granularity {
        Granularity::Lines => {
            let old_lines = split_lines(&old);
            let new_lines = split_lines(&new);
            engine::diff_with_options(&Slices::new(&old_lines, &new_lines), opts)?
        }
        Granularity::Bytes => engine::diff_with_options(&Slices::new(&old, &new), opts)?,
    };

    Ok(FileDiff {
        granularity,
        old_sha256: sha256(&old),
        new_sha256: sha256(&new),
        old,
        new,
        report,
    })
}

#[cfg(feature = "file-io")]
fn sha256(data: &[u8]) -> Option<[u8; 32]> {
    let mut h = sha2::Sha256::new();
    h.update(data);
    Some(h.finalize().into())
}

#[cfg(not(feature = "file-io"))]
fn sha256(_data: &[u8]) -> Option<[u8; 32]> {
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
