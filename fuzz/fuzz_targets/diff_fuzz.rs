#![no_main]
use libfuzzer_sys::fuzz_target;
use seqdiff::{Mark, diff_slices};

fn unmarked(seq: &[u8], marks: &[Mark]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut pos = 0;
    for m in marks {
        assert!(m.length > 0 && pos <= m.from && m.end() <= seq.len());
        out.extend_from_slice(&seq[pos..m.from]);
        pos = m.end();
    }
    out.extend_from_slice(&seq[pos..]);
    out
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > 512 {
        return;
    }

    // First byte picks the split point between the two sequences.
    let payload = &data[1..];
    let split = data[0] as usize % (payload.len() + 1);
    let (old, new) = payload.split_at(split);

    let delta = diff_slices(old, new);
    assert_eq!(unmarked(old, &delta.removed), unmarked(new, &delta.added));

    if old == new {
        assert!(delta.is_empty());
    }
});
