//! Memoization of single-pass pull handles.
//!
//! A [`Memo`] owns exactly one upstream [`PullHandle`] and an append-only
//! buffer of every value pulled from it so far. Any number of cursors can
//! traverse the memo; each one replays the buffer by index and only the
//! cursor that reaches the frontier pulls a new value from upstream, appending
//! it before yielding it. Upstream work therefore runs at most once per
//! position, and the buffer only grows as far as the furthest cursor has read.
//!
//! # Examples
//!
//! ```rust
//! use lazy_sequence::sequence::{Memo, PullHandle};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let pulls = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&pulls);
//! let memo = Memo::new(PullHandle::new((1..=3).inspect(move |_| {
//!     counter.set(counter.get() + 1);
//! })));
//!
//! let sequence = memo.sequence();
//! assert_eq!(sequence.strict(), vec![1, 2, 3]);
//! assert_eq!(sequence.strict(), vec![1, 2, 3]);
//! assert_eq!(pulls.get(), 3);
//! assert!(memo.is_exhausted());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::handle::{PullHandle, Sequence};

/// The state of the single upstream handle owned by a [`Memo`].
enum Upstream<'a, T> {
    /// The handle is idle and may be advanced.
    Live(PullHandle<'a, T>),
    /// A cursor is advancing the handle right now.
    Pulling,
    /// The handle signalled the end and has been released.
    Exhausted,
    /// Upstream code panicked while a cursor was advancing the handle.
    Poisoned,
}

struct MemoState<'a, T> {
    buffer: Vec<T>,
    upstream: Upstream<'a, T>,
}

/// A shared buffer that turns one single-pass handle into a multi-pass
/// sequence.
///
/// Cloning a `Memo` shares its state.
///
/// # Re-entry
///
/// A value whose computation traverses the same memo up to its own position
/// cannot be produced. The cursor that detects this panics rather than
/// pulling the upstream handle twice.
///
/// # Poisoning
///
/// If upstream code panics while a cursor is pulling, the memo becomes
/// poisoned. Values already in the buffer remain replayable; a cursor that
/// reaches the frontier of a poisoned memo panics.
pub struct Memo<'a, T> {
    state: Rc<RefCell<MemoState<'a, T>>>,
}

/// The outcome of one attempt to read position `index` of a memo.
enum Slot<T> {
    Ready(T),
    End,
    NeedsPull,
}

impl<'a, T: Clone + 'a> Memo<'a, T> {
    /// Creates a memo that owns the given upstream handle.
    ///
    /// Nothing is pulled until a cursor reaches the first position.
    #[must_use]
    pub fn new(upstream: PullHandle<'a, T>) -> Self {
        Self {
            state: Rc::new(RefCell::new(MemoState {
                buffer: Vec::new(),
                upstream: Upstream::Live(upstream),
            })),
        }
    }

    /// Returns a cursor that replays the memo from its first position.
    pub fn cursor(&self) -> CacheCursor<'a, T> {
        CacheCursor {
            memo: self.clone(),
            index: 0,
        }
    }

    /// Returns the memo viewed as a re-invokable sequence.
    ///
    /// Every invocation of the returned sequence yields a fresh cursor.
    pub fn sequence(&self) -> Sequence<'a, T> {
        let memo = self.clone();
        Sequence::from_handles(move || PullHandle::new(memo.cursor()))
    }

    /// Returns the number of values pulled from upstream so far.
    pub fn buffered_len(&self) -> usize {
        self.state.borrow().buffer.len()
    }

    /// Returns `true` once upstream has ended and the buffer is frozen.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state.borrow().upstream, Upstream::Exhausted)
    }

    /// Returns `true` if upstream code panicked during a pull.
    pub fn is_poisoned(&self) -> bool {
        matches!(self.state.borrow().upstream, Upstream::Poisoned)
    }

    fn read(&self, index: usize) -> Option<T> {
        match self.lookup(index) {
            Slot::Ready(value) => Some(value),
            Slot::End => None,
            Slot::NeedsPull => self.pull(),
        }
    }

    fn lookup(&self, index: usize) -> Slot<T> {
        let state = self.state.borrow();
        if let Some(value) = state.buffer.get(index) {
            return Slot::Ready(value.clone());
        }
        match state.upstream {
            Upstream::Live(_) => Slot::NeedsPull,
            Upstream::Exhausted => Slot::End,
            Upstream::Pulling => {
                panic!("Memo: re-entrant traversal reached the position being computed")
            }
            Upstream::Poisoned => panic!("Memo instance has been poisoned"),
        }
    }

    /// Advances upstream by one position and appends the result.
    ///
    /// The handle is moved out of the shared state for the duration of the
    /// pull so that upstream code may replay the buffer of this same memo.
    /// It stays out (leaving `Pulling` behind) if upstream panics, which is
    /// how the memo becomes poisoned.
    fn pull(&self) -> Option<T> {
        let mut upstream = {
            let mut state = self.state.borrow_mut();
            match std::mem::replace(&mut state.upstream, Upstream::Pulling) {
                Upstream::Live(handle) => handle,
                _ => unreachable!("Memo: pull requested without a live upstream"),
            }
        };

        let guard = PoisonOnUnwind { memo: self };
        let pulled = upstream.next();
        std::mem::forget(guard);

        let mut state = self.state.borrow_mut();
        match pulled {
            Some(value) => {
                state.buffer.push(value.clone());
                state.upstream = Upstream::Live(upstream);
                Some(value)
            }
            None => {
                state.upstream = Upstream::Exhausted;
                tracing::trace!(
                    buffered = state.buffer.len(),
                    "memo upstream exhausted, buffer frozen"
                );
                None
            }
        }
    }
}

/// Marks the memo poisoned if dropped during unwinding out of an upstream
/// pull. Forgotten on the normal path.
struct PoisonOnUnwind<'m, 'a, T> {
    memo: &'m Memo<'a, T>,
}

impl<T> Drop for PoisonOnUnwind<'_, '_, T> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.memo.state.try_borrow_mut() {
            state.upstream = Upstream::Poisoned;
            tracing::warn!(
                buffered = state.buffer.len(),
                "memo poisoned by a panic in upstream code"
            );
        }
    }
}

impl<T> Clone for Memo<'_, T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        let upstream = match state.upstream {
            Upstream::Live(_) => "<live>",
            Upstream::Pulling => "<pulling>",
            Upstream::Exhausted => "<exhausted>",
            Upstream::Poisoned => "<poisoned>",
        };
        formatter
            .debug_struct("Memo")
            .field("buffer", &state.buffer)
            .field("upstream", &upstream)
            .finish()
    }
}

/// A cursor over a [`Memo`], holding its own replay position.
///
/// Dropping a cursor releases nothing but the cursor itself; the buffer and
/// the upstream handle belong to the memo.
pub struct CacheCursor<'a, T> {
    memo: Memo<'a, T>,
    index: usize,
}

impl<'a, T: Clone + 'a> Iterator for CacheCursor<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.memo.read(self.index)?;
        self.index += 1;
        Some(value)
    }
}

/// Memoizes a sequence.
///
/// Invokes `sequence` exactly once, now, and returns a sequence whose
/// traversals all replay the values pulled from that one handle.
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::{cache, range_from};
///
/// let naturals = cache(&range_from(0_i32).unwrap());
/// assert_eq!(naturals.take(3).strict(), vec![0, 1, 2]);
/// assert_eq!(naturals.take(5).strict(), vec![0, 1, 2, 3, 4]);
/// ```
pub fn cache<'a, T: Clone + 'a>(sequence: &Sequence<'a, T>) -> Sequence<'a, T> {
    Memo::new(sequence.iter()).sequence()
}
