//! Lazy sequences built on a pull-based iteration protocol.
//!
//! This module provides:
//!
//! - [`PullHandle`]: a single-use cursor (`next()` yields an element or `None`)
//! - [`Sequence`]: a re-invokable producer of pull handles
//! - [`Memo`] and [`cache`]: memoization that makes a single-pass handle safe
//!   to traverse any number of times
//! - Generator sources: [`lazy`], [`range`], [`range_step`], [`range_from`],
//!   [`repeat`], [`replicate`], [`iterate`]
//! - Combinators as methods on [`Sequence`]: `map`, `filter`, `flat_map`,
//!   `take`, `drop`, `zip`, `concat`, `cycle`, `intersperse`, `nth`, `elem`,
//!   `sort`, `sort_by`, `sort_by_key`, `reverse`
//! - [`strict`]: materialization into a `Vec`
//! - [`ConcurrentCache`]: thread-safe memoization (feature `concurrent`)
//!
//! # Laziness and Re-traversal
//!
//! Nothing is computed until a handle is pulled. A combinator invokes its
//! input once, when it is called, and keeps that one handle. Combinators
//! whose output is likely to be traversed more than once memoize it, so
//! caller-supplied functions run at most once per element:
//!
//! ```rust
//! use lazy_sequence::sequence::range_from;
//! use std::cell::Cell;
//!
//! let calls = Cell::new(0);
//! let squares = range_from(1).unwrap().map(|n: i64| {
//!     calls.set(calls.get() + 1);
//!     n * n
//! });
//!
//! assert_eq!(squares.take(3).strict(), vec![1, 4, 9]);
//! assert_eq!(squares.take(4).strict(), vec![1, 4, 9, 16]);
//! assert_eq!(calls.get(), 4);
//! ```
//!
//! `drop`, `zip` and `reverse` are not memoized: their output continues one
//! shared handle across invocations. Wrap them with
//! [`cache`](Sequence::cache) when they need to be traversed again.
//!
//! # Infinite Sequences
//!
//! Sequences may be unbounded. Bound them with `take` before calling
//! `strict`, `reverse` or `sort`; materializing an unbounded sequence does not
//! return.

mod combinator;
mod error;
mod factory;
mod handle;
mod materialize;
mod memo;
mod sort;

#[cfg(feature = "concurrent")]
mod concurrent_cache;

pub use error::RangeError;
pub use factory::{RangeValue, iterate, lazy, range, range_from, range_step, repeat, replicate};
pub use handle::{PullHandle, Sequence};
pub use materialize::strict;
pub use memo::{CacheCursor, Memo, cache};

#[cfg(feature = "concurrent")]
pub use concurrent_cache::{ConcurrentCache, ConcurrentCursor};

static_assertions::assert_not_impl_any!(Sequence<'static, i32>: Send, Sync);
static_assertions::assert_not_impl_any!(PullHandle<'static, i32>: Send, Sync, Clone);

#[cfg(feature = "concurrent")]
static_assertions::assert_impl_all!(ConcurrentCache<i32>: Send, Sync, Clone);
#[cfg(feature = "concurrent")]
static_assertions::assert_impl_all!(ConcurrentCursor<i32>: Send);
