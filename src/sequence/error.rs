//! Error types for sequence construction.
//!
//! Exhaustion is never an error: it is the end-of-sequence signal (`None`).
//! The types here cover invalid arguments, which are rejected when a
//! sequence is constructed and before any element is produced.

use std::fmt;

/// Represents an invalid argument to [`range`](super::range),
/// [`range_step`](super::range_step) or [`range_from`](super::range_from).
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::{RangeError, range_step};
///
/// let error = range_step(1, 10, 0).unwrap_err();
/// assert_eq!(error, RangeError::ZeroStep);
/// assert_eq!(format!("{error}"), "range: step must not be zero");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// The step is zero, which would repeat `start` forever.
    ZeroStep,
    /// One of `start`, `to` or the step is NaN.
    NotANumber,
    /// The step moves away from `to`, so the bound would never be reached.
    StepAwayFromBound,
}

impl fmt::Display for RangeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroStep => write!(formatter, "range: step must not be zero"),
            Self::NotANumber => write!(formatter, "range: bounds and step must not be NaN"),
            Self::StepAwayFromBound => {
                write!(formatter, "range: step moves away from the upper bound")
            }
        }
    }
}

impl std::error::Error for RangeError {}
