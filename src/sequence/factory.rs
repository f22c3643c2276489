//! Generator sources.
//!
//! Every sequence built here is re-invokable: each call to
//! [`Sequence::iter`] starts a fresh traversal from the first element.
//!
//! - [`lazy`]: the elements of a finite collection
//! - [`range`], [`range_step`], [`range_from`]: arithmetic progressions
//! - [`repeat`]: one value forever
//! - [`replicate`]: one value a fixed number of times
//! - [`iterate`]: `start, f(start), f(f(start)), ...`

use std::rc::Rc;

use super::error::RangeError;
use super::handle::{PullHandle, Sequence};
use super::memo::Memo;

// =============================================================================
// lazy
// =============================================================================

/// Creates a sequence over the elements of a finite collection.
///
/// The collection is captured once; every invocation iterates it from the
/// start.
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::lazy;
///
/// let letters = lazy(["a", "b"]);
/// assert_eq!(letters.strict(), vec!["a", "b"]);
/// assert_eq!(letters.strict(), vec!["a", "b"]);
/// ```
pub fn lazy<'a, T, C>(collection: C) -> Sequence<'a, T>
where
    T: Clone + 'a,
    C: IntoIterator<Item = T>,
{
    let elements: Rc<[T]> = collection.into_iter().collect();
    Sequence::from_handles(move || {
        let elements = Rc::clone(&elements);
        let mut index = 0;
        PullHandle::from_fn(move || {
            let element = elements.get(index)?.clone();
            index += 1;
            Some(element)
        })
    })
}

// =============================================================================
// range
// =============================================================================

/// A numeric type that can drive a [`range`].
///
/// Implemented for the signed integer types and the floating point types.
/// Integer progressions end instead of overflowing. Float progressions end
/// once the step is too small to change the value.
pub trait RangeValue: Copy + PartialOrd + 'static {
    /// The additive identity.
    const ZERO: Self;
    /// The default ascending step.
    const ONE: Self;
    /// The default descending step.
    const MINUS_ONE: Self;

    /// Adds `step`, returning `None` if the result is not representable or
    /// equals `self`.
    fn checked_step(self, step: Self) -> Option<Self>;

    /// Returns `true` for floating point NaN.
    fn is_nan(self) -> bool;
}

macro_rules! impl_range_value_for_integer {
    ($($integer:ty),* $(,)?) => {
        $(
            impl RangeValue for $integer {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MINUS_ONE: Self = -1;

                #[inline]
                fn checked_step(self, step: Self) -> Option<Self> {
                    self.checked_add(step)
                }

                #[inline]
                fn is_nan(self) -> bool {
                    false
                }
            }
        )*
    };
}

macro_rules! impl_range_value_for_float {
    ($($float:ty),* $(,)?) => {
        $(
            impl RangeValue for $float {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;
                const MINUS_ONE: Self = -1.0;

                #[inline]
                fn checked_step(self, step: Self) -> Option<Self> {
                    let next = self + step;
                    // A step below the spacing of floats at `self` rounds away.
                    (next != self).then_some(next)
                }

                #[inline]
                fn is_nan(self) -> bool {
                    <$float>::is_nan(self)
                }
            }
        )*
    };
}

impl_range_value_for_integer!(i8, i16, i32, i64, i128, isize);
impl_range_value_for_float!(f32, f64);

/// Creates the progression from `start` to `to`, inclusive, with a step of
/// `1` when `start <= to` and `-1` otherwise.
///
/// For floating point types, `to` may be `INFINITY` for an unbounded
/// ascending sequence.
///
/// # Errors
///
/// Returns [`RangeError::NotANumber`] if `start` or `to` is NaN.
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::range;
///
/// assert_eq!(range(1, 4).unwrap().strict(), vec![1, 2, 3, 4]);
/// assert_eq!(range(3, 1).unwrap().strict(), vec![3, 2, 1]);
/// ```
pub fn range<'a, N: RangeValue>(start: N, to: N) -> Result<Sequence<'a, N>, RangeError> {
    let step = if start <= to { N::ONE } else { N::MINUS_ONE };
    range_step(start, to, step)
}

/// Creates the progression from `start` to `to`, inclusive, advancing by
/// `step`.
///
/// Ascends while the value is `<= to` when `start <= to`, and descends while
/// the value is `>= to` otherwise.
///
/// # Errors
///
/// - [`RangeError::ZeroStep`] if `step` is zero
/// - [`RangeError::NotANumber`] if any argument is NaN
/// - [`RangeError::StepAwayFromBound`] if `step` points away from `to`
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::range_step;
///
/// assert_eq!(range_step(1, 9, 3).unwrap().strict(), vec![1, 4, 7]);
/// assert_eq!(range_step(10, 0, -5).unwrap().strict(), vec![10, 5, 0]);
/// assert!(range_step(1, 9, -1).is_err());
/// ```
pub fn range_step<'a, N: RangeValue>(
    start: N,
    to: N,
    step: N,
) -> Result<Sequence<'a, N>, RangeError> {
    validate_range(start, to, step).inspect_err(|error| {
        tracing::debug!(%error, "rejected range arguments");
    })?;

    let ascending = step > N::ZERO;
    Ok(Sequence::from_handles(move || {
        let mut current = Some(start);
        PullHandle::from_fn(move || {
            let value = current?;
            let within = if ascending { value <= to } else { value >= to };
            if !within {
                current = None;
                return None;
            }
            current = value.checked_step(step);
            Some(value)
        })
    }))
}

/// Creates the unbounded ascending progression `start, start + 1, ...`.
///
/// Integer progressions end at the type's maximum value.
///
/// # Errors
///
/// Returns [`RangeError::NotANumber`] if `start` is NaN.
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::range_from;
///
/// assert_eq!(range_from(5).unwrap().take(3).strict(), vec![5, 6, 7]);
/// ```
pub fn range_from<'a, N: RangeValue>(start: N) -> Result<Sequence<'a, N>, RangeError> {
    if start.is_nan() {
        tracing::debug!(error = %RangeError::NotANumber, "rejected range arguments");
        return Err(RangeError::NotANumber);
    }
    Ok(Sequence::from_handles(move || {
        let mut current = Some(start);
        PullHandle::from_fn(move || {
            let value = current?;
            current = value.checked_step(N::ONE);
            Some(value)
        })
    }))
}

fn validate_range<N: RangeValue>(start: N, to: N, step: N) -> Result<(), RangeError> {
    if start.is_nan() || to.is_nan() || step.is_nan() {
        return Err(RangeError::NotANumber);
    }
    if step == N::ZERO {
        return Err(RangeError::ZeroStep);
    }
    let ascending = start <= to;
    if ascending != (step > N::ZERO) && start != to {
        return Err(RangeError::StepAwayFromBound);
    }
    Ok(())
}

// =============================================================================
// repeat / replicate / iterate
// =============================================================================

/// Creates an infinite sequence of `value`.
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::repeat;
///
/// assert_eq!(repeat('x').take(3).strict(), vec!['x', 'x', 'x']);
/// ```
pub fn repeat<'a, T: Clone + 'a>(value: T) -> Sequence<'a, T> {
    Sequence::new(move || std::iter::repeat(value.clone()))
}

/// Creates a sequence of exactly `count` copies of `value`.
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::replicate;
///
/// assert_eq!(replicate(2, "hi").strict(), vec!["hi", "hi"]);
/// assert!(replicate(0, "hi").strict().is_empty());
/// ```
pub fn replicate<'a, T: Clone + 'a>(count: usize, value: T) -> Sequence<'a, T> {
    Sequence::new(move || std::iter::repeat_n(value.clone(), count))
}

/// Creates the infinite sequence `start, f(start), f(f(start)), ...`.
///
/// The sequence is memoized: `function` runs at most once per position no
/// matter how many times the result is traversed.
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::iterate;
///
/// let powers = iterate(|n: &u64| n * 2, 1);
/// assert_eq!(powers.take(5).strict(), vec![1, 2, 4, 8, 16]);
/// ```
pub fn iterate<'a, T, F>(mut function: F, start: T) -> Sequence<'a, T>
where
    T: Clone + 'a,
    F: FnMut(&T) -> T + 'a,
{
    let mut seed = Some(start);
    let mut previous: Option<T> = None;
    Memo::new(PullHandle::from_fn(move || {
        let value = match seed.take() {
            Some(start) => start,
            None => function(previous.as_ref()?),
        };
        previous = Some(value.clone());
        Some(value)
    }))
    .sequence()
}
