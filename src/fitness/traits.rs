//! Objective traits
//!
//! This module defines the objective function abstraction. Objectives are
//! maximized; wrap them in [`Minimize`] to search for a minimum instead.

use std::convert::Infallible;
use std::error::Error as StdError;
use std::marker::PhantomData;

/// Objective function evaluated on decoded phenotypes
///
/// Any `Fn(&[f64]) -> f64` is an infallible objective. Fallible closures can
/// be wrapped in [`TryFnObjective`].
pub trait Objective {
    /// Error raised when evaluation fails
    type Error: StdError + Send + Sync + 'static;

    /// Evaluate a phenotype (higher = better)
    fn evaluate(&self, phenotype: &[f64]) -> Result<f64, Self::Error>;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    type Error = Infallible;

    fn evaluate(&self, phenotype: &[f64]) -> Result<f64, Self::Error> {
        Ok(self(phenotype))
    }
}

/// A wrapper turning a fallible closure into an objective
pub struct TryFnObjective<F, E> {
    f: F,
    _marker: PhantomData<fn() -> E>,
}

impl<F, E> TryFnObjective<F, E>
where
    F: Fn(&[f64]) -> Result<f64, E>,
{
    /// Create a new fallible objective
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<F, E> Objective for TryFnObjective<F, E>
where
    F: Fn(&[f64]) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    type Error = E;

    fn evaluate(&self, phenotype: &[f64]) -> Result<f64, E> {
        (self.f)(phenotype)
    }
}

/// A wrapper to negate an objective (for minimization problems)
pub struct Minimize<O> {
    inner: O,
}

impl<O> Minimize<O> {
    /// Create a minimization wrapper around an objective
    pub fn new(objective: O) -> Self {
        Self { inner: objective }
    }

    /// Unwrap the inner objective
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: Objective> Objective for Minimize<O> {
    type Error = O::Error;

    fn evaluate(&self, phenotype: &[f64]) -> Result<f64, Self::Error> {
        self.inner.evaluate(phenotype).map(|value| -value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("negative input")]
    struct NegativeInput;

    fn sum(x: &[f64]) -> f64 {
        x.iter().sum()
    }

    #[test]
    fn test_fn_item_objective() {
        assert_eq!(sum.evaluate(&[1.0, 2.0, 3.0]).unwrap(), 6.0);
    }

    #[test]
    fn test_closure_objective() {
        let objective = |x: &[f64]| -x.iter().map(|v| v * v).sum::<f64>();
        assert_eq!(objective.evaluate(&[1.0, 2.0, 3.0]).unwrap(), -14.0);
    }

    #[test]
    fn test_try_fn_objective() {
        let objective = TryFnObjective::new(|x: &[f64]| {
            if x.iter().any(|v| *v < 0.0) {
                Err(NegativeInput)
            } else {
                Ok(x.iter().product())
            }
        });

        assert_eq!(objective.evaluate(&[2.0, 3.0]).unwrap(), 6.0);
        assert!(objective.evaluate(&[2.0, -3.0]).is_err());
    }

    #[test]
    fn test_minimize() {
        let minimize = Minimize::new(|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>());
        assert_eq!(minimize.evaluate(&[1.0, 2.0, 3.0]).unwrap(), -14.0);
    }
}
