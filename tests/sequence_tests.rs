#![cfg(feature = "sequence")]
//! Unit tests for sequence generators and combinators.
//!
//! Tests cover:
//! - Generator sources (lazy, range, repeat, replicate, iterate)
//! - Combinator semantics and edge cases
//! - Materialization, nth and elem
//! - Construction errors

use lazy_sequence::sequence::{
    RangeError, Sequence, iterate, lazy, range, range_from, range_step, repeat,
    replicate, strict,
};
use rstest::rstest;
use std::cell::Cell;

// =============================================================================
// Generators
// =============================================================================

#[rstest]
fn lazy_round_trips_collection() {
    let words = vec!["alpha", "beta", "gamma"];
    assert_eq!(strict(&lazy(words.clone())), words);
}

#[rstest]
fn lazy_gives_fresh_handle_per_invocation() {
    let numbers = lazy([1, 2, 3]);
    let mut first = numbers.iter();
    let mut second = numbers.iter();
    assert_eq!(first.next(), Some(1));
    assert_eq!(first.next(), Some(2));
    assert_eq!(second.next(), Some(1));
}

#[rstest]
#[case(1, 10, 2, vec![1, 3, 5, 7, 9])]
#[case(10, 1, -3, vec![10, 7, 4, 1])]
#[case(0, 0, 5, vec![0])]
fn range_step_progressions(
    #[case] start: i64,
    #[case] to: i64,
    #[case] step: i64,
    #[case] expected: Vec<i64>,
) {
    assert_eq!(range_step(start, to, step).unwrap().strict(), expected);
}

#[rstest]
fn range_descends_by_default_when_start_exceeds_bound() {
    assert_eq!(range(3, -1).unwrap().strict(), vec![3, 2, 1, 0, -1]);
}

#[rstest]
fn range_to_infinity_is_unbounded() {
    let values = range(1.0, f64::INFINITY).unwrap().take(3).strict();
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
}

#[rstest]
fn range_rejects_invalid_arguments_before_producing() {
    assert_eq!(range_step(1, 5, 0).unwrap_err(), RangeError::ZeroStep);
    assert_eq!(range(f64::NAN, 1.0).unwrap_err(), RangeError::NotANumber);
    assert_eq!(
        range_step(1, 5, -1).unwrap_err(),
        RangeError::StepAwayFromBound
    );
}

#[rstest]
fn range_error_propagates_as_boxed_error() {
    fn build() -> Result<Vec<i32>, Box<dyn std::error::Error>> {
        Ok(range_step(0, 3, 0)?.strict())
    }
    let error = build().unwrap_err();
    assert_eq!(error.to_string(), "range: step must not be zero");
}

#[rstest]
fn repeat_is_infinite_and_constant() {
    assert_eq!(repeat("x").take(4).strict(), vec!["x"; 4]);
}

#[rstest]
#[case(3, 3)]
#[case(0, 0)]
fn replicate_yields_exact_count(#[case] count: usize, #[case] expected_len: usize) {
    assert_eq!(replicate(count, 'z').strict().len(), expected_len);
}

#[rstest]
fn iterate_applies_function_repeatedly() {
    let collatz = iterate(|n: &u32| if n % 2 == 0 { n / 2 } else { 3 * n + 1 }, 6);
    assert_eq!(collatz.take(9).strict(), vec![6, 3, 10, 5, 16, 8, 4, 2, 1]);
}

// =============================================================================
// Combinators
// =============================================================================

#[rstest]
fn map_applies_function_in_order() {
    assert_eq!(
        lazy([1, 2, 3]).map(|n| n.to_string()).strict(),
        vec!["1", "2", "3"]
    );
}

#[rstest]
fn filter_keeps_matching_elements() {
    assert_eq!(lazy([1, 2, 3, 4, 5]).filter(|n| n % 2 == 0).strict(), vec![2, 4]);
}

#[rstest]
fn take_of_filter_over_infinite_range() {
    let not_multiple_of_three = range_from(1)
        .unwrap()
        .filter(|n: &i32| n % 3 != 0)
        .take(6);
    assert_eq!(not_multiple_of_three.strict(), vec![1, 2, 4, 5, 7, 8]);
}

#[rstest]
fn take_more_than_available() {
    assert_eq!(lazy([1, 2]).take(10).strict(), vec![1, 2]);
}

#[rstest]
fn drop_past_end_is_empty() {
    assert!(lazy([1, 2, 3]).drop(3).strict().is_empty());
    assert!(lazy([1, 2, 3]).drop(9).strict().is_empty());
}

#[rstest]
fn zip_truncates_to_shorter_side() {
    let pairs = lazy([1, 2, 3]).zip(&lazy(['a', 'b']));
    assert_eq!(pairs.strict(), vec![(1, 'a'), (2, 'b')]);
}

#[rstest]
fn concat_drains_first_then_second() {
    let joined = range(1, 3).unwrap().concat(&repeat(0)).take(5);
    assert_eq!(joined.strict(), vec![1, 2, 3, 0, 0]);
}

#[rstest]
fn cycle_repeats_full_traversal() {
    assert_eq!(
        lazy([1, 2, 3]).cycle().take(7).strict(),
        vec![1, 2, 3, 1, 2, 3, 1]
    );
}

#[rstest]
fn cycle_reinvokes_input_every_lap() {
    let laps = Cell::new(0);
    let source = Sequence::new(|| {
        laps.set(laps.get() + 1);
        vec![1, 2]
    });
    assert_eq!(source.cycle().take(5).strict(), vec![1, 2, 1, 2, 1]);
    assert_eq!(laps.get(), 3);
}

#[rstest]
fn flat_map_concatenates_per_element() {
    let ranges = lazy([1, 3]).flat_map(|n| range(n, n + 1).unwrap());
    assert_eq!(ranges.strict(), vec![1, 2, 3, 4]);
}

#[rstest]
fn flat_map_over_infinite_outer() {
    let pairs = range_from(0)
        .unwrap()
        .flat_map(|n: i32| lazy([n, -n]))
        .take(5);
    assert_eq!(pairs.strict(), vec![0, 0, 1, -1, 2]);
}

#[rstest]
#[case(vec![1, 2, 3], vec![1, 0, 2, 0, 3])]
#[case(vec![1], vec![1])]
#[case(vec![], vec![])]
fn intersperse_places_separator_between_elements(
    #[case] input: Vec<i32>,
    #[case] expected: Vec<i32>,
) {
    assert_eq!(lazy(input).intersperse(0).strict(), expected);
}

#[rstest]
fn intersperse_over_infinite_sequence() {
    assert_eq!(
        repeat('a').intersperse(',').take(5).strict(),
        vec!['a', ',', 'a', ',', 'a']
    );
}

#[rstest]
fn sort_orders_ascending() {
    assert_eq!(lazy([5, 3, 4, 1, 2]).sort().strict(), vec![1, 2, 3, 4, 5]);
}

#[rstest]
fn sort_is_idempotent() {
    let once = lazy([9, 2, 7, 2]).sort();
    let twice = once.sort();
    assert_eq!(once.strict(), twice.strict());
}

#[rstest]
fn sort_by_float_comparator() {
    let sorted = lazy([2.5, -1.0, 0.5]).sort_by(|left: &f64, right| left.total_cmp(right));
    assert_eq!(sorted.strict(), vec![-1.0, 0.5, 2.5]);
}

#[rstest]
fn take_of_sort_yields_smallest() {
    assert_eq!(lazy([5, 6, 4, 2, 3]).sort().take(2).strict(), vec![2, 3]);
}

#[rstest]
fn reverse_yields_back_to_front() {
    assert_eq!(range(1, 5).unwrap().reverse().strict(), vec![5, 4, 3, 2, 1]);
}

// =============================================================================
// nth / elem
// =============================================================================

#[rstest]
#[case(0, Some(1))]
#[case(1, Some(2))]
#[case(2, Some(3))]
#[case(3, None)]
#[case(10, None)]
fn nth_finds_or_signals_not_found(#[case] index: usize, #[case] expected: Option<i32>) {
    assert_eq!(lazy([1, 2, 3]).nth(index), expected);
}

#[rstest]
fn nth_on_infinite_sequence() {
    assert_eq!(range_from(0_i64).unwrap().map(|n| n * n).nth(12), Some(144));
}

#[rstest]
fn elem_reports_membership() {
    let letters = lazy(["a", "b"]);
    assert!(letters.elem(&"b"));
    assert!(!letters.elem(&"c"));
}

// =============================================================================
// Sequence as IntoIterator
// =============================================================================

#[rstest]
fn sequence_reference_iterates_in_for_loop() {
    let mut total = 0;
    for value in &range(1, 4).unwrap() {
        total += value;
    }
    assert_eq!(total, 10);
}
