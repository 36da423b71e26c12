//! Type-level numeric constraints for process parameters.
//!
//! Quantities such as a cooling coil's bypass factor or an evaporative
//! cooler's effectiveness are only meaningful on the closed unit interval,
//! and a humidity ratio is only meaningful when non-negative. Checking that
//! once, at construction, lets the rest of the crate carry the invariant in
//! the type instead of re-validating at every use.
//!
//! [`Constrained<T, C>`] wraps a value together with a zero-sized marker `C`
//! implementing [`Constraint<T>`]. Two markers cover this crate's needs:
//!
//! - [`NonNegative`]: zero or greater
//! - [`UnitInterval`]: `0 ≤ x ≤ 1`
//!
//! Custom invariants can be added by implementing [`Constraint<T>`] for a
//! new marker type.

use std::marker::PhantomData;

use num_traits::{One, Zero};
use thiserror::Error;

/// A trait for enforcing a numeric invariant at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the
    /// constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not exceed one")]
    AboveOne,
    #[error("value is not a number")]
    NotANumber,
}

/// A value statically known to satisfy the constraint `C`.
///
/// Construction runs the check; afterwards the wrapper hands out the inner
/// value without revalidation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Wraps `value` if it satisfies `C`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] reported by the constraint check.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper, returning the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Marker type enforcing `x ≥ 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a `Constrained<T, NonNegative>`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::Negative`] for values below zero and
    /// [`ConstraintError::NotANumber`] when the comparison is undefined.
    pub fn new<T: Zero + PartialOrd>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: Zero + PartialOrd> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            None => Err(ConstraintError::NotANumber),
            Some(std::cmp::Ordering::Less) => Err(ConstraintError::Negative),
            _ => Ok(()),
        }
    }
}

/// Marker type enforcing the closed unit interval `0 ≤ x ≤ 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs a `Constrained<T, UnitInterval>`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::Negative`] below zero,
    /// [`ConstraintError::AboveOne`] above one, and
    /// [`ConstraintError::NotANumber`] when the comparison is undefined.
    pub fn new<T: Zero + One + PartialOrd>(
        value: T,
    ) -> Result<Constrained<T, UnitInterval>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: Zero + One + PartialOrd> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(std::cmp::Ordering::Less), _) => Err(ConstraintError::Negative),
            (_, Some(std::cmp::Ordering::Greater)) => Err(ConstraintError::AboveOne),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_accepts_zero_and_positive() {
        assert!(NonNegative::new(0.0).is_ok());
        assert!(NonNegative::new(0.0141).is_ok());
        assert!(matches!(
            NonNegative::new(-1e-9),
            Err(ConstraintError::Negative)
        ));
    }

    #[test]
    fn unit_interval_covers_both_endpoints() {
        assert!(UnitInterval::new(0.0).is_ok());
        assert!(UnitInterval::new(1.0).is_ok());
        assert!(matches!(
            UnitInterval::new(1.0 + 1e-12),
            Err(ConstraintError::AboveOne)
        ));
        assert!(matches!(
            UnitInterval::new(-0.1),
            Err(ConstraintError::Negative)
        ));
    }

    #[test]
    fn nan_is_rejected_by_both() {
        assert!(matches!(
            NonNegative::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        ));
        assert!(matches!(
            UnitInterval::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        ));
    }

    #[test]
    fn constrained_value_is_recoverable() {
        let bypass = UnitInterval::new(0.1).unwrap();
        assert_eq!(bypass.into_inner(), 0.1);
        let ratio = NonNegative::new(0.008).unwrap();
        assert_eq!(*ratio.as_ref(), 0.008);
    }
}
