use std::cell::Cell;

use proptest::prelude::*;
use seqdiff::{Delta, Mark, diff, diff_slices, with_equal};

/// Elements outside every mark, in order.
fn unmarked<T: Clone>(seq: &[T], marks: &[Mark]) -> Vec<T> {
    let mut out = Vec::new();
    let mut pos = 0;
    for m in marks {
        out.extend_from_slice(&seq[pos..m.from]);
        pos = m.end();
    }
    out.extend_from_slice(&seq[pos..]);
    out
}

fn assert_well_formed(marks: &[Mark], len: usize) -> Result<(), TestCaseError> {
    for m in marks {
        prop_assert!(m.length > 0, "empty mark {:?}", m);
        prop_assert!(m.end() <= len, "mark {:?} past end {}", m, len);
    }
    for pair in marks.windows(2) {
        prop_assert!(
            pair[0].end() < pair[1].from,
            "marks {:?} and {:?} overlap, touch or are out of order",
            pair[0],
            pair[1]
        );
    }
    Ok(())
}

fn small_seq() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..4, 0..40)
}

proptest! {
    #[test]
    fn prop_self_diff_is_empty(seq in small_seq()) {
        prop_assert_eq!(diff_slices(&seq, &seq), Delta::default());
    }

    #[test]
    fn prop_marks_sorted_in_bounds(old in small_seq(), new in small_seq()) {
        let delta = diff_slices(&old, &new);
        assert_well_formed(&delta.removed, old.len())?;
        assert_well_formed(&delta.added, new.len())?;
    }

    #[test]
    fn prop_unmarked_parts_are_a_common_subsequence(old in small_seq(), new in small_seq()) {
        let delta = diff_slices(&old, &new);
        let kept_old = unmarked(&old, &delta.removed);
        let kept_new = unmarked(&new, &delta.added);
        prop_assert_eq!(
            old.len() - delta.removed_len(),
            new.len() - delta.added_len()
        );
        prop_assert_eq!(kept_old, kept_new);
    }

    #[test]
    fn prop_disjoint_alphabets_replace_everything(
        old in proptest::collection::vec(0u8..8, 0..30),
        new in proptest::collection::vec(8u8..16, 0..30)
    ) {
        let delta = diff_slices(&old, &new);
        let expect = |len: usize| if len == 0 { vec![] } else { vec![Mark::new(0, len)] };
        prop_assert_eq!(delta.removed, expect(old.len()));
        prop_assert_eq!(delta.added, expect(new.len()));
    }

    #[test]
    fn prop_diff_is_deterministic(old in small_seq(), new in small_seq()) {
        let cmp = with_equal(old.len(), new.len(), |i, j| old[i] == new[j]);
        prop_assert_eq!(diff(&cmp), diff(&cmp));
    }

    #[test]
    fn prop_predicate_called_once_per_cell_in_range(old in small_seq(), new in small_seq()) {
        let calls = Cell::new(0usize);
        let cmp = with_equal(old.len(), new.len(), |i, j| {
            assert!(i < old.len() && j < new.len(), "({i}, {j}) out of range");
            calls.set(calls.get() + 1);
            old[i] == new[j]
        });
        let _ = diff(&cmp);
        prop_assert_eq!(calls.get(), old.len() * new.len());
    }
}
