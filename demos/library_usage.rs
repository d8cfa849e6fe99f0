// Library usage: diff two token lists and print what changed.
//
// Run with: cargo run --example library_usage

use seqdiff::{DiffOptions, diff_with_options, with_equal};

fn main() {
    let old: Vec<&str> = "the quick brown fox jumps over the lazy dog"
        .split(' ')
        .collect();
    let new: Vec<&str> = "the quick red fox leaps over the very lazy dog"
        .split(' ')
        .collect();

    // Case-insensitive comparison through a closure.
    let cmp = with_equal(old.len(), new.len(), |i, j| {
        old[i].eq_ignore_ascii_case(new[j])
    });

    let report = match diff_with_options(&cmp, &DiffOptions::default()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("diff failed: {e}");
            std::process::exit(1);
        }
    };

    for m in &report.delta.removed {
        println!("- {}", old[m.range()].join(" "));
    }
    for m in &report.delta.added {
        println!("+ {}", new[m.range()].join(" "));
    }
    println!(
        "{} cells compared, {} matches, {} cache hits",
        report.stats.cells, report.stats.matches, report.stats.cache_hits
    );
}
