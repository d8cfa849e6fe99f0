// Command-line front end for seqdiff.
//
// Diffs two files by line or by byte and prints the removed/added ranges,
// either as text or as JSON. Exit status follows diff(1): 0 when the
// inputs are equal, 1 when they differ, 2 on error.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::delta::{Delta, Mark};
use crate::engine::{DEFAULT_MAX_CELLS, DiffOptions, DiffStats};
use crate::io::{self as file_io, FileDiff, Granularity};

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

const EXIT_SAME: i32 = 0;
const EXIT_DIFFERENT: i32 = 1;
const EXIT_TROUBLE: i32 = 2;

// ---------------------------------------------------------------------------
// Cell count parsing (supports K, M, G suffixes)
// ---------------------------------------------------------------------------

fn parse_cell_count(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty cell count".into());
    }
    let (num_part, multiplier) = match s.as_bytes().last() {
        Some(b'k' | b'K') => (&s[..s.len() - 1], 1024u64),
        Some(b'm' | b'M') => (&s[..s.len() - 1], 1024 * 1024),
        Some(b'g' | b'G') => (&s[..s.len() - 1], 1024 * 1024 * 1024),
        _ => (s, 1u64),
    };
    let num: u64 = num_part
        .trim()
        .parse()
        .map_err(|e| format!("invalid cell count '{s}': {e}"))?;
    num.checked_mul(multiplier)
        .ok_or_else(|| format!("cell count overflow: '{s}'"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// LCS-based diff of two files.
#[derive(Parser, Debug)]
#[command(
    name = "seqdiff",
    version,
    about = "LCS-based diff of two files, by line or by byte",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (only the exit status reports a difference).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Print the delta as JSON on stdout.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Diff two files line by line.
    Lines(DiffArgs),
    /// Diff two files byte by byte.
    Bytes(DiffArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct DiffArgs {
    /// Largest equality grid to build (supports K/M/G suffix).
    #[arg(long = "max-cells", value_parser = parse_cell_count, default_value_t = DEFAULT_MAX_CELLS)]
    max_cells: u64,

    /// Original file.
    #[arg(value_hint = ValueHint::FilePath)]
    old: PathBuf,

    /// Modified file.
    #[arg(value_hint = ValueHint::FilePath)]
    new: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Diff(Granularity),
    Config,
}

#[derive(Debug)]
struct Options {
    command: Command,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    max_cells: u64,
    old_file: Option<PathBuf>,
    new_file: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let quiet = cli.quiet;
    let verbose = cli.verbose.min(2);
    let json_output = cli.json_output;

    let (command, args) = match cli.command {
        Cmd::Lines(args) => (Command::Diff(Granularity::Lines), Some(args)),
        Cmd::Bytes(args) => (Command::Diff(Granularity::Bytes), Some(args)),
        Cmd::Config => (Command::Config, None),
    };

    match args {
        Some(args) => Options {
            command,
            quiet,
            verbose,
            json_output,
            max_cells: args.max_cells,
            old_file: Some(args.old),
            new_file: Some(args.new),
        },
        None => Options {
            command,
            quiet,
            verbose,
            json_output,
            max_cells: DEFAULT_MAX_CELLS,
            old_file: None,
            new_file: None,
        },
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("seqdiff".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("seqdiff version {version} (Rust)");

    let file_io = cfg!(feature = "file-io") as u8;
    let parallel = cfg!(feature = "parallel") as u8;
    let ptr_size = std::mem::size_of::<*const ()>();

    eprintln!("FILE_IO={file_io}");
    eprintln!("PARALLEL={parallel}");
    eprintln!("DEFAULT_MAX_CELLS={DEFAULT_MAX_CELLS}");
    eprintln!("sizeof(usize)={ptr_size}");

    EXIT_SAME
}

// ---------------------------------------------------------------------------
// Diff command
// ---------------------------------------------------------------------------

fn cmd_diff(opts: &Options, granularity: Granularity) -> i32 {
    let (Some(old), Some(new)) = (&opts.old_file, &opts.new_file) else {
        eprintln!("seqdiff: two input files are required");
        return EXIT_TROUBLE;
    };
    let diff_opts = DiffOptions {
        max_cells: opts.max_cells,
    };

    let fd = match file_io::diff_files(old, new, granularity, &diff_opts) {
        Ok(fd) => fd,
        Err(e) => {
            eprintln!("seqdiff: {}: {e}", describe_pair(old, new));
            return EXIT_TROUBLE;
        }
    };
    let delta = &fd.report.delta;

    if opts.verbose > 0 {
        print_stats(&fd, opts.json_output);
    }

    if !opts.quiet {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        let written = if opts.json_output {
            writeln!(out, "{}", delta_json(delta))
        } else {
            write_delta(&mut out, &fd)
        };
        if let Err(e) = written.and_then(|_| out.flush()) {
            eprintln!("seqdiff: write error: {e}");
            return EXIT_TROUBLE;
        }
    }

    if delta.is_empty() {
        EXIT_SAME
    } else {
        EXIT_DIFFERENT
    }
}

fn describe_pair(old: &std::path::Path, new: &std::path::Path) -> String {
    format!("{} vs {}", old.display(), new.display())
}

fn marks_json(marks: &[Mark]) -> serde_json::Value {
    marks
        .iter()
        .map(|m| serde_json::json!({ "from": m.from, "length": m.length }))
        .collect()
}

fn delta_json(delta: &Delta) -> serde_json::Value {
    serde_json::json!({
        "removed": marks_json(&delta.removed),
        "added": marks_json(&delta.added),
    })
}

fn hex(digest: &Option<[u8; 32]>) -> Option<String> {
    digest
        .as_ref()
        .map(|d| d.iter().map(|b| format!("{b:02x}")).collect())
}

fn print_stats(fd: &FileDiff, json: bool) {
    let DiffStats {
        len_x,
        len_y,
        cells,
        equal_cells,
        cache_entries,
        cache_hits,
        diagonals,
        regions,
        matches,
    } = fd.report.stats;

    if json {
        let stats = serde_json::json!({
            "old_units": len_x,
            "new_units": len_y,
            "cells": cells,
            "equal_cells": equal_cells,
            "cache_entries": cache_entries,
            "cache_hits": cache_hits,
            "diagonals": diagonals,
            "regions": regions,
            "matches": matches,
            "old_sha256": hex(&fd.old_sha256),
            "new_sha256": hex(&fd.new_sha256),
        });
        eprintln!("{stats}");
        return;
    }

    eprintln!("seqdiff: {len_x} old / {len_y} new units, {cells} cells ({equal_cells} equal)");
    eprintln!("seqdiff: {matches} matches over {regions} regions, {diagonals} diagonals");
    eprintln!("seqdiff: {cache_entries} cached runs, {cache_hits} cache hits");
    if let (Some(o), Some(n)) = (hex(&fd.old_sha256), hex(&fd.new_sha256)) {
        eprintln!("seqdiff: old sha256 {o}");
        eprintln!("seqdiff: new sha256 {n}");
    }
}

/// Removed ranges first, then added ranges. Line diffs echo the affected
/// lines; byte diffs only list the ranges.
fn write_delta<W: Write>(out: &mut W, fd: &FileDiff) -> io::Result<()> {
    let delta = &fd.report.delta;
    match fd.granularity {
        Granularity::Lines => {
            let old = file_io::split_lines(&fd.old);
            let new = file_io::split_lines(&fd.new);
            for m in &delta.removed {
                writeln!(out, "@@ -{},{} @@", m.from + 1, m.length)?;
                write_lines(out, '-', &old[m.range()])?;
            }
            for m in &delta.added {
                writeln!(out, "@@ +{},{} @@", m.from + 1, m.length)?;
                write_lines(out, '+', &new[m.range()])?;
            }
        }
        Granularity::Bytes => {
            for m in &delta.removed {
                writeln!(out, "- {}..{} ({} bytes)", m.from, m.end(), m.length)?;
            }
            for m in &delta.added {
                writeln!(out, "+ {}..{} ({} bytes)", m.from, m.end(), m.length)?;
            }
        }
    }
    Ok(())
}

fn write_lines<W: Write>(out: &mut W, prefix: char, lines: &[&[u8]]) -> io::Result<()> {
    for line in lines {
        write!(out, "{prefix}")?;
        out.write_all(line)?;
        if !line.ends_with(b"\n") {
            writeln!(out)?;
            writeln!(out, "\\ No newline at end of file")?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let opts = resolve_options(cli);
    log::debug!("resolved options: {opts:?}");

    let exit_code = match opts.command {
        Command::Diff(granularity) => cmd_diff(&opts, granularity),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
