//! Thread-safe memoization of a single-pass iterator.
//!
//! This module provides [`ConcurrentCache<T>`], the thread-safe counterpart
//! of [`Memo`](super::Memo). Any number of [`ConcurrentCursor`]s, possibly on
//! different threads, replay one shared buffer; the cursor that reaches the
//! frontier pulls the next value from the single upstream iterator and
//! appends it.
//!
//! The pull-and-append step runs while holding the cache's mutex, so when
//! several cursors reach the frontier at the same moment exactly one of them
//! advances upstream and the others observe the appended value.
//!
//! # Re-entry Warning
//!
//! Upstream code must not advance a cursor of the same cache. The mutex is
//! held during the pull and is not re-entrant, so doing so deadlocks.
//!
//! # Examples
//!
//! ```rust
//! use lazy_sequence::sequence::ConcurrentCache;
//! use std::thread;
//!
//! let cache = ConcurrentCache::new((1..=4).map(|n| n * n));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let cursor = cache.cursor();
//!         thread::spawn(move || cursor.collect::<Vec<_>>())
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap(), vec![1, 4, 9, 16]);
//! }
//! ```

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::sync::Arc;

use parking_lot::Mutex;

type Upstream<T> = Box<dyn Iterator<Item = T> + Send>;

/// The state of the upstream iterator owned by a [`ConcurrentCache`].
enum Source<T> {
    Live(Upstream<T>),
    Exhausted,
    Poisoned,
}

struct SharedState<T> {
    buffer: Vec<T>,
    source: Source<T>,
}

/// A thread-safe buffer that turns one iterator into any number of
/// independent cursors.
///
/// Cloning a `ConcurrentCache` shares its state.
///
/// # Thread Safety
///
/// `ConcurrentCache<T>` is `Send` and `Sync` when `T: Send`. The upstream
/// iterator must be `Send`.
///
/// # Poisoning
///
/// If the upstream iterator panics during a pull, the cache becomes poisoned.
/// Values already buffered remain readable; a cursor that reaches the
/// frontier of a poisoned cache panics.
pub struct ConcurrentCache<T> {
    shared: Arc<Mutex<SharedState<T>>>,
}

impl<T: Clone + Send + 'static> ConcurrentCache<T> {
    /// Creates a cache that owns the given upstream iterator.
    ///
    /// Nothing is pulled until a cursor reaches the first position.
    pub fn new<I>(upstream: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self {
            shared: Arc::new(Mutex::new(SharedState {
                buffer: Vec::new(),
                source: Source::Live(Box::new(upstream.into_iter())),
            })),
        }
    }

    /// Returns a cursor that replays the cache from its first position.
    pub fn cursor(&self) -> ConcurrentCursor<T> {
        ConcurrentCursor {
            cache: self.clone(),
            index: 0,
        }
    }

    /// Drains a fresh cursor into a `Vec`.
    ///
    /// Does not return if the upstream iterator is infinite.
    pub fn strict(&self) -> Vec<T> {
        self.cursor().collect()
    }

    /// Returns the number of values pulled from upstream so far.
    pub fn buffered_len(&self) -> usize {
        self.shared.lock().buffer.len()
    }

    /// Returns `true` once upstream has ended and the buffer is frozen.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.shared.lock().source, Source::Exhausted)
    }

    /// Returns `true` if the upstream iterator panicked during a pull.
    pub fn is_poisoned(&self) -> bool {
        matches!(self.shared.lock().source, Source::Poisoned)
    }

    fn read(&self, index: usize) -> Option<T> {
        let mut state = self.shared.lock();
        if let Some(value) = state.buffer.get(index) {
            return Some(value.clone());
        }

        let upstream = match &mut state.source {
            Source::Live(upstream) => upstream,
            Source::Exhausted => return None,
            Source::Poisoned => panic!("ConcurrentCache instance has been poisoned"),
        };

        match catch_unwind(AssertUnwindSafe(|| upstream.next())) {
            Ok(Some(value)) => {
                state.buffer.push(value.clone());
                Some(value)
            }
            Ok(None) => {
                state.source = Source::Exhausted;
                tracing::trace!(
                    buffered = state.buffer.len(),
                    "concurrent cache upstream exhausted, buffer frozen"
                );
                None
            }
            Err(payload) => {
                state.source = Source::Poisoned;
                tracing::warn!(
                    buffered = state.buffer.len(),
                    "concurrent cache poisoned by a panic in upstream code"
                );
                drop(state);
                resume_unwind(payload)
            }
        }
    }
}

impl<T> Clone for ConcurrentCache<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ConcurrentCache<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        let source = match state.source {
            Source::Live(_) => "<live>",
            Source::Exhausted => "<exhausted>",
            Source::Poisoned => "<poisoned>",
        };
        formatter
            .debug_struct("ConcurrentCache")
            .field("buffer", &state.buffer)
            .field("source", &source)
            .finish()
    }
}

/// A cursor over a [`ConcurrentCache`], holding its own replay position.
///
/// Cursors can be sent to other threads.
pub struct ConcurrentCursor<T> {
    cache: ConcurrentCache<T>,
    index: usize,
}

impl<T: Clone + Send + 'static> Iterator for ConcurrentCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.cache.read(self.index)?;
        self.index += 1;
        Some(value)
    }
}
