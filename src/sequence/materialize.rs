//! Materialization of sequences into vectors.

use super::handle::Sequence;

impl<'a, T: 'a> Sequence<'a, T> {
    /// Drains a fresh handle of this sequence into a `Vec`, in yield order.
    ///
    /// This is the only operation that forces complete evaluation. Calling
    /// it on an infinite sequence does not return.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::range;
    ///
    /// assert_eq!(range(1, 3).unwrap().strict(), vec![1, 2, 3]);
    /// ```
    pub fn strict(&self) -> Vec<T> {
        self.iter().collect()
    }
}

/// Drains a fresh handle of `sequence` into a `Vec`.
///
/// Free-function form of [`Sequence::strict`].
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::{lazy, strict};
///
/// assert_eq!(strict(&lazy(vec![1, 2])), vec![1, 2]);
/// ```
pub fn strict<'a, T: 'a>(sequence: &Sequence<'a, T>) -> Vec<T> {
    sequence.strict()
}
