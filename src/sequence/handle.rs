//! Pull handles and re-invokable sequences.
//!
//! This module provides the two abstractions everything else is built on:
//!
//! - [`PullHandle`]: a single-use cursor. Each call to `next()` yields the
//!   next element or signals the end. Advancing is destructive and there is
//!   no rewind.
//! - [`Sequence`]: a re-invokable capability. Each call to [`Sequence::iter`]
//!   produces a pull handle.
//!
//! Keeping these as two distinct types means a combinator that needs a fresh
//! traversal per lap (such as [`Sequence::cycle`]) can only be given a
//! `Sequence`, never a half-consumed handle:
//!
//! ```compile_fail,E0277
//! use lazy_sequence::sequence::lazy;
//!
//! // A handle cannot be cycled: it is not `Clone` and cannot be re-invoked.
//! let handle = lazy([1, 2, 3]).iter();
//! let _laps = handle.cycle();
//! ```
//!
//! The same call on the sequence itself compiles:
//!
//! ```rust
//! use lazy_sequence::sequence::lazy;
//!
//! let sequence = lazy([1, 2, 3]);
//! let laps = sequence.cycle();
//! assert_eq!(laps.take(4).strict(), vec![1, 2, 3, 1]);
//! ```
//!
//! # Examples
//!
//! ```rust
//! use lazy_sequence::sequence::lazy;
//!
//! let numbers = lazy(vec![1, 2, 3]);
//!
//! let mut first = numbers.iter();
//! assert_eq!(first.next(), Some(1));
//!
//! // A second invocation of a `lazy` sequence starts from the beginning.
//! let second: Vec<i32> = numbers.iter().collect();
//! assert_eq!(second, vec![1, 2, 3]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;

// =============================================================================
// PullHandle
// =============================================================================

/// A single-use cursor over a sequence of values.
///
/// `next()` returns `Some(value)` for every produced element and `None` once
/// the sequence has ended. The end is sticky: after the first `None` the
/// upstream iterator is dropped and every later call returns `None`, even if
/// the upstream would have produced more.
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::PullHandle;
///
/// let mut handle = PullHandle::new(vec![1, 2]);
/// assert_eq!(handle.next(), Some(1));
/// assert_eq!(handle.next(), Some(2));
/// assert_eq!(handle.next(), None);
/// assert!(handle.is_finished());
/// ```
pub struct PullHandle<'a, T> {
    upstream: Option<Box<dyn Iterator<Item = T> + 'a>>,
}

impl<'a, T> PullHandle<'a, T> {
    /// Creates a handle that pulls from the given iterator.
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self {
            upstream: Some(Box::new(source.into_iter())),
        }
    }

    /// Creates a handle driven by a closure, in the manner of
    /// [`std::iter::from_fn`].
    pub fn from_fn<F>(step: F) -> Self
    where
        F: FnMut() -> Option<T> + 'a,
    {
        Self::new(std::iter::from_fn(step))
    }

    /// Creates a handle that is already at its end.
    #[inline]
    #[must_use]
    pub fn finished() -> Self {
        Self { upstream: None }
    }

    /// Returns `true` once the handle has signalled the end.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.upstream.is_none()
    }
}

impl<T> Iterator for PullHandle<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let upstream = self.upstream.as_mut()?;
        let pulled = upstream.next();
        if pulled.is_none() {
            self.upstream = None;
        }
        pulled
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream
            .as_ref()
            .map_or((0, Some(0)), |upstream| upstream.size_hint())
    }
}

impl<T> FusedIterator for PullHandle<'_, T> {}

impl<T> fmt::Debug for PullHandle<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_finished() {
            "<finished>"
        } else {
            "<live>"
        };
        formatter.debug_tuple("PullHandle").field(&state).finish()
    }
}

// =============================================================================
// Sequence
// =============================================================================

type Factory<'a, T> = dyn Fn() -> PullHandle<'a, T> + 'a;

/// A re-invokable lazy sequence.
///
/// A `Sequence` does not hold elements. It holds the ability to produce a
/// [`PullHandle`] whenever [`iter`](Sequence::iter) is called. Whether two
/// handles obtained from the same `Sequence` are independent depends on how
/// the sequence was built:
///
/// - Sequences from the factories ([`lazy`](super::lazy),
///   [`range`](super::range), ...) and from [`cache`](super::cache) give
///   independent handles that each start from the first element.
/// - Sequences from [`drop`](Sequence::drop), [`zip`](Sequence::zip) and
///   [`reverse`](Sequence::reverse) share one captured upstream handle, so a
///   second traversal continues where the first one stopped.
///
/// Cloning a `Sequence` is cheap and shares the underlying factory.
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::Sequence;
///
/// let squares = Sequence::new(|| (1..=3).map(|n| n * n));
/// assert_eq!(squares.strict(), vec![1, 4, 9]);
/// assert_eq!(squares.strict(), vec![1, 4, 9]);
/// ```
pub struct Sequence<'a, T> {
    factory: Rc<Factory<'a, T>>,
}

impl<'a, T: 'a> Sequence<'a, T> {
    /// Creates a sequence from a closure that builds a fresh iterator on each
    /// invocation.
    pub fn new<I, F>(factory: F) -> Self
    where
        F: Fn() -> I + 'a,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self::from_handles(move || PullHandle::new(factory()))
    }

    /// Creates a sequence from a closure that returns pull handles directly.
    pub fn from_handles<F>(factory: F) -> Self
    where
        F: Fn() -> PullHandle<'a, T> + 'a,
    {
        Self {
            factory: Rc::new(factory),
        }
    }

    /// Creates a sequence with no elements.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_handles(PullHandle::finished)
    }

    /// Creates a sequence whose every invocation continues the same handle.
    ///
    /// The handle is captured once; a traversal that stops early leaves the
    /// remaining elements for the next invocation, and once the handle has
    /// ended every later invocation is empty.
    pub(crate) fn from_shared(handle: PullHandle<'a, T>) -> Self {
        let shared = Rc::new(RefCell::new(handle));
        Self::from_handles(move || {
            let shared = Rc::clone(&shared);
            PullHandle::from_fn(move || shared.borrow_mut().next())
        })
    }

    /// Invokes the sequence, producing a pull handle.
    #[inline]
    pub fn iter(&self) -> PullHandle<'a, T> {
        (self.factory)()
    }
}

impl<T> Clone for Sequence<'_, T> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<'a, T: 'a> Default for Sequence<'a, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, 'b, T: 'a> IntoIterator for &'b Sequence<'a, T> {
    type Item = T;
    type IntoIter = PullHandle<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> fmt::Debug for Sequence<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Sequence").field(&"<lazy>").finish()
    }
}
