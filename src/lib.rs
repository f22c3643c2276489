//! # lazy-sequence
//!
//! Composable lazy sequences over a pull-based iteration protocol, with an
//! explicit memoization layer for safe re-traversal.
//!
//! ## Overview
//!
//! - **Pull handles**: single-use cursors that yield an element or signal the end
//! - **Sequences**: re-invokable producers of pull handles, possibly infinite
//! - **Memoization**: `cache` turns one pull handle into a sequence that can be
//!   traversed any number of times, computing each element once
//! - **Combinators**: map, filter, flat_map, take, drop, zip, concat, cycle,
//!   intersperse, nth, sort, reverse
//! - **Generators**: lazy, range, repeat, replicate, iterate
//!
//! ## Feature Flags
//!
//! - `sequence`: the single-threaded core (default)
//! - `concurrent`: `ConcurrentCache`, a thread-safe memoizer (default)
//! - `full`: Enable all features
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events when a memo's
//! upstream is exhausted or poisoned and when range arguments are rejected.
//! Install a subscriber in the host program to see them.
//!
//! ## Example
//!
//! ```rust
//! use lazy_sequence::prelude::*;
//!
//! let evens = range_from(0).unwrap().filter(|n: &i32| n % 2 == 0);
//! assert_eq!(evens.take(4).strict(), vec![0, 2, 4, 6]);
//!
//! let laps = lazy([1, 2, 3]).cycle().take(7);
//! assert_eq!(laps.strict(), vec![1, 2, 3, 1, 2, 3, 1]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and functions.
///
/// # Usage
///
/// ```rust
/// use lazy_sequence::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "sequence")]
    pub use crate::sequence::*;
}

#[cfg(feature = "sequence")]
pub mod sequence;
