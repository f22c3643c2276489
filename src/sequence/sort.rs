//! Whole-sequence operations: sorting and reversal.
//!
//! Both materialize their input when they are called. Sorting then hands
//! out the result lazily, removing the current minimum on every pull, so
//! `sort().take(k)` only performs `k` selection passes.

use std::cmp::Ordering;

use super::combinator::single_pass;
use super::handle::{PullHandle, Sequence};
use super::memo::Memo;

impl<'a, T: 'a> Sequence<'a, T> {
    /// Sorts the sequence in ascending natural order.
    ///
    /// Equal elements keep their relative order. The output is memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// assert_eq!(lazy([5, 3, 4, 1, 2]).sort().strict(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&self) -> Self
    where
        T: Clone + Ord,
    {
        self.sort_by(T::cmp)
    }

    /// Sorts the sequence with a comparator.
    ///
    /// `compare` must be a total order for the result to be sorted. Equal
    /// elements keep their relative order. The output is memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// let descending = lazy([1, 3, 2]).sort_by(|left, right| right.cmp(left));
    /// assert_eq!(descending.strict(), vec![3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&self, mut compare: F) -> Self
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering + 'a,
    {
        let mut pending = self.strict();
        Memo::new(PullHandle::from_fn(move || {
            let position = position_of_minimum(&pending, &mut compare)?;
            Some(pending.remove(position))
        }))
        .sequence()
    }

    /// Sorts the sequence by a key extracted from each element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// let by_length = lazy(["ccc", "a", "bb"]).sort_by_key(|word| word.len());
    /// assert_eq!(by_length.strict(), vec!["a", "bb", "ccc"]);
    /// ```
    pub fn sort_by_key<K, F>(&self, mut key: F) -> Self
    where
        T: Clone,
        K: Ord,
        F: FnMut(&T) -> K + 'a,
    {
        self.sort_by(move |left, right| key(left).cmp(&key(right)))
    }

    /// Yields the elements back to front.
    ///
    /// The input is materialized when `reverse` is called and the output
    /// supports a single traversal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::lazy;
    ///
    /// assert_eq!(lazy([1, 2, 3]).reverse().strict(), vec![3, 2, 1]);
    /// ```
    pub fn reverse(&self) -> Self {
        let mut elements = self.strict();
        elements.reverse();
        single_pass(elements)
    }
}

/// Index of the first minimal element, so ties resolve to the earliest one.
fn position_of_minimum<T, F>(elements: &[T], compare: &mut F) -> Option<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut best = 0;
    for (index, element) in elements.iter().enumerate().skip(1) {
        if compare(element, &elements[best]) == Ordering::Less {
            best = index;
        }
    }
    (!elements.is_empty()).then_some(best)
}
