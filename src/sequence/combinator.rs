//! Combinators over sequences.
//!
//! Every combinator invokes its input sequence(s) once, when the combinator is
//! called, and keeps the resulting pull handle for the lifetime of the output.
//! The output is then exposed in one of two ways:
//!
//! - **Memoized** (`map`, `filter`, `flat_map`, `take`, `concat`,
//!   `intersperse`): the captured handle feeds a [`Memo`], so the output can
//!   be traversed any number of times and each upstream element is computed
//!   once.
//! - **Shared** (`drop`, `zip`): the captured handle is shared by every
//!   invocation of the output, so a second traversal continues where the
//!   previous one stopped. Call [`cache`](Sequence::cache) on the output when
//!   it must be traversed more than once.
//!
//! [`cycle`](Sequence::cycle) is the exception: it captures nothing and
//! re-invokes its input once per lap.

use super::handle::{PullHandle, Sequence};
use super::memo::Memo;

impl<'a, T: 'a> Sequence<'a, T> {
    /// Applies `function` to every element, preserving order and count.
    ///
    /// The output is memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// let doubled = lazy([1, 2, 3]).map(|n| n * 2);
    /// assert_eq!(doubled.strict(), vec![2, 4, 6]);
    /// ```
    pub fn map<U, F>(&self, mut function: F) -> Sequence<'a, U>
    where
        U: Clone + 'a,
        F: FnMut(T) -> U + 'a,
    {
        let mut upstream = self.iter();
        Memo::new(PullHandle::from_fn(move || upstream.next().map(&mut function))).sequence()
    }

    /// Keeps the elements for which `predicate` holds, in their original
    /// order.
    ///
    /// The output is memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// let even = lazy([1, 2, 3, 4, 5]).filter(|n| n % 2 == 0);
    /// assert_eq!(even.strict(), vec![2, 4]);
    /// ```
    pub fn filter<P>(&self, mut predicate: P) -> Sequence<'a, T>
    where
        T: Clone,
        P: FnMut(&T) -> bool + 'a,
    {
        let mut upstream = self.iter();
        Memo::new(PullHandle::from_fn(move || {
            upstream.by_ref().find(|element| predicate(element))
        }))
        .sequence()
    }

    /// Maps every element to a sequence and concatenates the results.
    ///
    /// The sub-sequence for one element is drained completely before the next
    /// upstream element is pulled. The output is memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::{lazy, replicate};
    ///
    /// let expanded = lazy([1, 2, 3]).flat_map(|n| replicate(n, n));
    /// assert_eq!(expanded.strict(), vec![1, 2, 2, 3, 3, 3]);
    /// ```
    pub fn flat_map<U, F>(&self, mut function: F) -> Sequence<'a, U>
    where
        U: Clone + 'a,
        F: FnMut(T) -> Sequence<'a, U> + 'a,
    {
        let mut upstream = self.iter();
        let mut inner: Option<PullHandle<'a, U>> = None;
        Memo::new(PullHandle::from_fn(move || {
            loop {
                if let Some(element) = inner.as_mut().and_then(|handle| handle.next()) {
                    return Some(element);
                }
                inner = Some(function(upstream.next()?).iter());
            }
        }))
        .sequence()
    }

    /// Yields at most `count` elements.
    ///
    /// Upstream is never pulled past the `count`-th element, so this is the
    /// usual way to bound an infinite sequence. The output is memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::repeat;
    ///
    /// assert_eq!(repeat(7).take(3).strict(), vec![7, 7, 7]);
    /// assert!(repeat(7).take(0).strict().is_empty());
    /// ```
    pub fn take(&self, count: usize) -> Self
    where
        T: Clone,
    {
        let mut upstream = self.iter();
        let mut remaining = count;
        Memo::new(PullHandle::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            upstream.next()
        }))
        .sequence()
    }

    /// Discards the first `count` elements and passes the rest through.
    ///
    /// The output shares one captured handle; the elements are discarded once,
    /// on the first pull of the first traversal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// assert_eq!(lazy([1, 2, 3, 4]).drop(2).strict(), vec![3, 4]);
    /// assert!(lazy([1, 2]).drop(5).strict().is_empty());
    /// ```
    pub fn drop(&self, count: usize) -> Self {
        Self::from_shared(PullHandle::new(self.iter().skip(count)))
    }

    /// Pairs elements of `self` and `other` positionally.
    ///
    /// Both sides are pulled once per step, and the output ends as soon as
    /// either side ends. The output shares one captured pair of handles.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// let pairs = lazy([1, 2, 3]).zip(&lazy(['a', 'b']));
    /// assert_eq!(pairs.strict(), vec![(1, 'a'), (2, 'b')]);
    /// ```
    pub fn zip<U: 'a>(&self, other: &Sequence<'a, U>) -> Sequence<'a, (T, U)> {
        let mut left = self.iter();
        let mut right = other.iter();
        Sequence::from_shared(PullHandle::from_fn(move || {
            let left_element = left.next();
            let right_element = right.next();
            Some((left_element?, right_element?))
        }))
    }

    /// Yields every element of `self`, then every element of `other`.
    ///
    /// The output is memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// let joined = lazy([1, 2]).concat(&lazy([3]));
    /// assert_eq!(joined.strict(), vec![1, 2, 3]);
    /// ```
    pub fn concat(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        let mut first = self.iter();
        let mut second = other.iter();
        Memo::new(PullHandle::from_fn(move || {
            first.next().or_else(|| second.next())
        }))
        .sequence()
    }

    /// Repeats the full traversal of `self` indefinitely.
    ///
    /// Each lap invokes `self` again. A lap that yields nothing ends the
    /// output, so cycling an empty sequence is empty and cycling a sequence
    /// that only supports one traversal stops after the first lap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// let laps = lazy([1, 2, 3]).cycle().take(7);
    /// assert_eq!(laps.strict(), vec![1, 2, 3, 1, 2, 3, 1]);
    /// ```
    pub fn cycle(&self) -> Self {
        let source = self.clone();
        Self::from_handles(move || {
            let source = source.clone();
            let mut lap = source.iter();
            let mut lap_is_empty = true;
            PullHandle::from_fn(move || {
                loop {
                    if let Some(element) = lap.next() {
                        lap_is_empty = false;
                        return Some(element);
                    }
                    if lap_is_empty {
                        return None;
                    }
                    lap = source.iter();
                    lap_is_empty = true;
                }
            })
        })
    }

    /// Inserts `separator` between every pair of consecutive elements.
    ///
    /// No separator is emitted before the first or after the last element.
    /// The output is memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// assert_eq!(lazy([1, 2, 3]).intersperse(0).strict(), vec![1, 0, 2, 0, 3]);
    /// assert_eq!(lazy([1]).intersperse(0).strict(), vec![1]);
    /// ```
    pub fn intersperse(&self, separator: T) -> Self
    where
        T: Clone,
    {
        let mut upstream = self.iter();
        let mut held: Option<T> = None;
        let mut started = false;
        Memo::new(PullHandle::from_fn(move || {
            if let Some(element) = held.take() {
                return Some(element);
            }
            let element = upstream.next()?;
            if started {
                held = Some(element);
                Some(separator.clone())
            } else {
                started = true;
                Some(element)
            }
        }))
        .sequence()
    }

    /// Returns the element at zero-based `index`, or `None` if the sequence
    /// ends first.
    ///
    /// Invokes `self` and consumes the new handle up to and including
    /// `index`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// assert_eq!(lazy([1, 2, 3]).nth(1), Some(2));
    /// assert_eq!(lazy([1, 2, 3]).nth(10), None);
    /// ```
    pub fn nth(&self, index: usize) -> Option<T> {
        self.iter().nth(index)
    }

    /// Returns `true` if `value` occurs in the sequence.
    ///
    /// Stops at the first match. On an infinite sequence that never yields
    /// `value` this does not return.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::range_from;
    ///
    /// assert!(range_from(1).unwrap().elem(&40));
    /// ```
    pub fn elem(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|element| element == *value)
    }

    /// Returns a memoized view of this sequence.
    ///
    /// Equivalent to [`cache(self)`](super::cache).
    pub fn cache(&self) -> Self
    where
        T: Clone,
    {
        super::memo::cache(self)
    }
}

/// Shares a captured handle as a [`Sequence`] without memoizing it.
///
/// Used by the whole-sequence operations that hand out a single pass.
pub(crate) fn single_pass<'a, T: 'a>(elements: Vec<T>) -> Sequence<'a, T> {
    let mut remaining = elements.into_iter();
    Sequence::from_shared(PullHandle::from_fn(move || remaining.next()))
}

#[cfg(test)]
mod tests {
    use super::super::factory::{lazy, range_from, repeat};
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counted<'a>(elements: Vec<i32>, pulls: &'a Cell<usize>) -> Sequence<'a, i32> {
        let elements: Rc<[i32]> = elements.into();
        Sequence::new(move || {
            let elements = Rc::clone(&elements);
            (0..elements.len()).map(move |index| {
                pulls.set(pulls.get() + 1);
                elements[index]
            })
        })
    }

    #[rstest]
    fn test_map_is_memoized() {
        let calls = Cell::new(0);
        let mapped = lazy([1, 2, 3]).map(|n| {
            calls.set(calls.get() + 1);
            n * 10
        });
        assert_eq!(mapped.strict(), vec![10, 20, 30]);
        assert_eq!(mapped.strict(), vec![10, 20, 30]);
        assert_eq!(calls.get(), 3);
    }

    #[rstest]
    fn test_combinator_captures_handle_at_construction() {
        let pulls = Cell::new(0);
        let source = counted(vec![1, 2, 3], &pulls);
        let mapped = source.map(|n| n + 1);
        assert_eq!(pulls.get(), 0);
        assert_eq!(mapped.nth(0), Some(2));
        assert_eq!(pulls.get(), 1);
    }

    #[rstest]
    fn test_take_does_not_pull_past_count() {
        let pulls = Cell::new(0);
        let taken = counted(vec![1, 2, 3, 4], &pulls).take(2);
        assert_eq!(taken.strict(), vec![1, 2]);
        assert_eq!(pulls.get(), 2);
    }

    #[rstest]
    fn test_drop_shares_its_handle() {
        let dropped = lazy([1, 2, 3, 4]).drop(1);
        let mut first = dropped.iter();
        assert_eq!(first.next(), Some(2));
        assert_eq!(dropped.strict(), vec![3, 4]);
        assert!(dropped.strict().is_empty());
    }

    #[rstest]
    fn test_drop_of_cached_output_is_reusable() {
        let dropped = lazy([1, 2, 3]).drop(1).cache();
        assert_eq!(dropped.strict(), vec![2, 3]);
        assert_eq!(dropped.strict(), vec![2, 3]);
    }

    #[rstest]
    fn test_zip_polls_both_sides_each_step() {
        let left_pulls = Cell::new(0);
        let right_pulls = Cell::new(0);
        let pairs = counted(vec![1, 2, 3, 4], &left_pulls).zip(&counted(vec![9], &right_pulls));
        assert_eq!(pairs.strict(), vec![(1, 9)]);
        assert_eq!(left_pulls.get(), 2);
        assert_eq!(right_pulls.get(), 1);
    }

    #[rstest]
    fn test_zip_with_infinite_side() {
        let numbered = range_from(0).unwrap().zip(&lazy(["a", "b"]));
        assert_eq!(numbered.strict(), vec![(0, "a"), (1, "b")]);
    }

    #[rstest]
    fn test_flat_map_drains_inner_before_next_outer() {
        let order = lazy([1, 2]).flat_map(|n| lazy([n * 10, n * 10 + 1]));
        assert_eq!(order.strict(), vec![10, 11, 20, 21]);
    }

    #[rstest]
    fn test_flat_map_skips_empty_inner_sequences() {
        let sparse = lazy([0, 2, 0, 1]).flat_map(|n| repeat(n).take(n as usize));
        assert_eq!(sparse.strict(), vec![2, 2, 1]);
    }

    #[rstest]
    fn test_concat_with_empty_sides() {
        let empty: Sequence<'_, i32> = Sequence::empty();
        assert_eq!(empty.concat(&lazy([1])).strict(), vec![1]);
        assert_eq!(lazy([1]).concat(&empty).strict(), vec![1]);
    }

    #[rstest]
    fn test_cycle_of_empty_sequence_is_empty() {
        let empty: Sequence<'_, i32> = Sequence::empty();
        assert!(empty.cycle().strict().is_empty());
    }

    #[rstest]
    fn test_cycle_of_single_pass_sequence_stops_after_first_lap() {
        let once = lazy([1, 2]).drop(0);
        assert_eq!(once.cycle().take(5).strict(), vec![1, 2]);
    }

    #[rstest]
    fn test_cycle_invocations_are_independent() {
        let cycled = lazy([1, 2]).cycle();
        let mut first = cycled.iter();
        assert_eq!(first.next(), Some(1));
        assert_eq!(cycled.iter().take(3).collect::<Vec<_>>(), vec![1, 2, 1]);
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![1], vec![1])]
    #[case(vec![1, 2], vec![1, 0, 2])]
    fn test_intersperse_edges(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
        assert_eq!(lazy(input).intersperse(0).strict(), expected);
    }

    #[rstest]
    fn test_elem_stops_at_first_match() {
        let pulls = Cell::new(0);
        assert!(counted(vec![5, 6, 7], &pulls).elem(&6));
        assert_eq!(pulls.get(), 2);
        assert!(!lazy([5, 6, 7]).elem(&8));
    }

    #[rstest]
    fn test_single_pass_yields_once() {
        let sequence = single_pass(vec![1, 2]);
        assert_eq!(sequence.strict(), vec![1, 2]);
        assert!(sequence.strict().is_empty());
    }
}
