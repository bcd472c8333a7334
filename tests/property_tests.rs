//! Property-based tests using proptest
//!
//! Sequence operations are checked against a `Vec` model that follows
//! Python's slice rules; heap operations are checked against sorted
//! reference data, with the overlay audited after every step.

use linked_heaps::{Heap, HeapOrder, LinkedSequence, SeqError, Slice};
use proptest::prelude::*;

/// Positions visited by `start:stop:step` on a list of `len` elements
///
/// Bounds come from [`model_bounds`], then the range is expanded by
/// stepping until the bound is crossed.
fn model_positions(start: Option<isize>, stop: Option<isize>, step: isize, len: usize) -> Vec<usize> {
    let (start, stop) = model_bounds(start, stop, step, len);

    let mut out = Vec::new();
    let mut i = start;
    while (step > 0 && i < stop) || (step < 0 && i > stop) {
        out.push(i as usize);
        i += step;
    }
    out
}

/// Clamped `(start, stop)` for `start:stop:step` on a list of `len` elements
///
/// Resolved the way CPython's `PySlice_AdjustIndices` does.
fn model_bounds(start: Option<isize>, stop: Option<isize>, step: isize, len: usize) -> (isize, isize) {
    let len = len as isize;
    let adjust = |bound: isize| {
        if bound < 0 {
            let shifted = bound + len;
            if shifted < 0 {
                if step < 0 {
                    -1
                } else {
                    0
                }
            } else {
                shifted
            }
        } else if bound >= len {
            if step < 0 {
                len - 1
            } else {
                len
            }
        } else {
            bound
        }
    };
    let start = start.map(adjust).unwrap_or(if step < 0 { len - 1 } else { 0 });
    let stop = stop.map(adjust).unwrap_or(if step < 0 { -1 } else { len });
    (start, stop)
}

fn bound() -> impl Strategy<Value = Option<isize>> {
    prop::option::of(-15isize..15)
}

fn step() -> impl Strategy<Value = isize> {
    prop_oneof![Just(1isize), Just(-1isize), -4isize..-1, 2isize..5]
}

fn build(values: &[i32]) -> LinkedSequence<i32> {
    values.iter().copied().collect()
}

/// Pop everything and check the sequence of roots is monotone for `order`
fn drain_in_order(mut heap: Heap<i32>, order: HeapOrder) -> Result<Vec<i32>, TestCaseError> {
    let mut out = Vec::new();
    while let Ok(value) = heap.extract_root() {
        if let Some(&last) = out.last() {
            prop_assert!(
                !order.prefers(&value, &last),
                "popped {} after {} under {:?}",
                value,
                last,
                order
            );
        }
        out.push(value);
    }
    Ok(out)
}

fn order() -> impl Strategy<Value = HeapOrder> {
    prop_oneof![Just(HeapOrder::Min), Just(HeapOrder::Max)]
}

proptest! {
    #[test]
    fn test_get_slice_matches_model(
        values in prop::collection::vec(-100i32..100, 0..12),
        start in bound(),
        stop in bound(),
        step in step(),
    ) {
        let seq = build(&values);
        let expected: Vec<i32> = model_positions(start, stop, step, values.len())
            .into_iter()
            .map(|i| values[i])
            .collect();
        prop_assert_eq!(seq.get_slice(Slice::new(start, stop, Some(step)))?, expected);
    }

    #[test]
    fn test_contiguous_set_slice_matches_model(
        values in prop::collection::vec(-100i32..100, 0..12),
        start in bound(),
        stop in bound(),
        insert in prop::collection::vec(-100i32..100, 0..6),
    ) {
        let mut seq = build(&values);
        seq.set_slice(Slice::new(start, stop, None), insert.clone())?;

        let (lo, hi) = model_bounds(start, stop, 1, values.len());
        let (lo, hi) = (lo as usize, hi.max(lo) as usize);
        let mut model = values.clone();
        let _replaced: Vec<i32> = model.splice(lo..hi, insert).collect();

        prop_assert_eq!(&seq, &model);
        prop_assert!(seq.check_invariants().is_ok());
    }

    #[test]
    fn test_extended_set_slice_matches_model(
        values in prop::collection::vec(-100i32..100, 0..12),
        start in bound(),
        stop in bound(),
        step in step().prop_filter("extended", |s| *s != 1),
        extra in 0usize..2,
    ) {
        let positions = model_positions(start, stop, step, values.len());
        let replacement: Vec<i32> = (0..positions.len() + extra).map(|i| 1000 + i as i32).collect();

        let mut seq = build(&values);
        let result = seq.set_slice(Slice::new(start, stop, Some(step)), replacement.clone());

        if extra == 0 {
            prop_assert!(result.is_ok());
            let mut model = values.clone();
            for (pos, value) in positions.iter().zip(replacement) {
                model[*pos] = value;
            }
            prop_assert_eq!(&seq, &model);
        } else {
            prop_assert_eq!(
                result,
                Err(SeqError::LengthMismatch { expected: positions.len(), actual: positions.len() + 1 })
            );
            prop_assert_eq!(&seq, &values);
        }
    }

    #[test]
    fn test_delete_slice_matches_model(
        values in prop::collection::vec(-100i32..100, 0..12),
        start in bound(),
        stop in bound(),
        step in step(),
    ) {
        let mut seq = build(&values);
        seq.delete_slice(Slice::new(start, stop, Some(step)))?;

        let mut positions = model_positions(start, stop, step, values.len());
        positions.sort_unstable();
        let mut model = values.clone();
        for pos in positions.into_iter().rev() {
            model.remove(pos);
        }

        prop_assert_eq!(&seq, &model);
        prop_assert!(seq.check_invariants().is_ok());
    }

    #[test]
    fn test_index_matches_model(
        values in prop::collection::vec(-100i32..100, 0..12),
        index in -15isize..15,
    ) {
        let seq = build(&values);
        let len = values.len() as isize;
        let resolved = if index < 0 { index + len } else { index };
        if (0..len).contains(&resolved) {
            prop_assert_eq!(seq.get(index), Ok(&values[resolved as usize]));
        } else {
            prop_assert_eq!(seq.get(index), Err(SeqError::IndexOutOfRange { index, len: values.len() }));
        }
    }

    #[test]
    fn test_slice_self_assignment_is_identity(
        values in prop::collection::vec(-100i32..100, 0..12),
        start in bound(),
        stop in bound(),
    ) {
        let mut seq = build(&values);
        let run = seq.get_slice(Slice::new(start, stop, None))?;
        seq.set_slice(Slice::new(start, stop, None), run)?;
        prop_assert_eq!(&seq, &values);
    }

    #[test]
    fn test_clone_is_independent(
        values in prop::collection::vec(-100i32..100, 1..12),
        replacement in -100i32..100,
    ) {
        let seq = build(&values);
        let mut copy = seq.clone();
        prop_assert_eq!(&copy, &seq);

        copy.set(0, replacement)?;
        copy.push_back(replacement);
        prop_assert_eq!(&seq, &values);
    }

    #[test]
    fn test_pop_front_push_front_round_trip(values in prop::collection::vec(-100i32..100, 1..12)) {
        let mut seq = build(&values);
        let first = seq.pop_front()?;
        seq.push_front(first);
        prop_assert_eq!(&seq, &values);
    }

    #[test]
    fn test_merge_is_associative_on_content(
        a in prop::collection::vec(-100i32..100, 0..10),
        b in prop::collection::vec(-100i32..100, 0..10),
        c in prop::collection::vec(-100i32..100, 0..10),
    ) {
        let mut left = build(&a);
        left.merge(build(&b));
        left.merge(build(&c));

        let mut tail = build(&b);
        tail.merge(build(&c));
        let mut right = build(&a);
        right.merge(tail);

        prop_assert_eq!(&left, &right);
        prop_assert!(left.check_invariants().is_ok());
        prop_assert!(right.check_invariants().is_ok());
    }

    #[test]
    fn test_heap_insert_extract_invariant(
        ops in prop::collection::vec((prop::bool::ANY, -100i32..100), 0..100),
        order in order(),
    ) {
        let mut heap = Heap::new(order);
        let mut model: Vec<i32> = Vec::new();

        for (should_pop, value) in ops {
            if should_pop && !heap.is_empty() {
                let popped = heap.extract_root()?;
                let best = match order {
                    HeapOrder::Min => model.iter().min(),
                    HeapOrder::Max => model.iter().max(),
                };
                prop_assert_eq!(Some(&popped), best);
                let pos = model.iter().position(|v| *v == popped).unwrap();
                model.swap_remove(pos);
            } else {
                heap.insert(value);
                model.push(value);
            }
            prop_assert_eq!(heap.len(), model.len());
            prop_assert!(heap.check_invariants().is_ok());
        }
    }

    #[test]
    fn test_heap_drains_sorted(values in prop::collection::vec(-100i32..100, 0..100), order in order()) {
        let heap = Heap::from_values(values.clone(), order);
        prop_assert!(heap.check_invariants().is_ok());

        let drained = drain_in_order(heap, order)?;
        let mut expected = values;
        expected.sort_unstable();
        if order == HeapOrder::Max {
            expected.reverse();
        }
        prop_assert_eq!(drained, expected);
    }

    #[test]
    fn test_heap_merge_invariant(
        first in prop::collection::vec(-100i32..100, 0..50),
        second in prop::collection::vec(-100i32..100, 0..50),
        order in order(),
        donor_order in order(),
    ) {
        let mut heap = Heap::from_values(first.clone(), order);
        heap.merge(Heap::from_values(second.clone(), donor_order))?;

        prop_assert_eq!(heap.order(), order);
        prop_assert_eq!(heap.len(), first.len() + second.len());
        prop_assert!(heap.check_invariants().is_ok());

        let mut all = first;
        all.extend(second);
        prop_assert_eq!(heap, Heap::from_values(all, order));
    }
}
