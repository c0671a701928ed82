//! Benchmark objectives
//!
//! Standard test functions, all phrased for maximization.

use std::convert::Infallible;

use crate::fitness::traits::Objective;

/// Sum of all variables: f(x) = Σxᵢ
///
/// Unbounded for real encoding; over a discrete range the optimum puts every
/// variable at the range maximum.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl Objective for Sum {
    type Error = Infallible;

    fn evaluate(&self, phenotype: &[f64]) -> Result<f64, Infallible> {
        Ok(phenotype.iter().sum())
    }
}

/// Sphere function: f(x) = -Σxᵢ²
///
/// Unimodal, convex, separable. Optimum 0 at the origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sphere;

impl Objective for Sphere {
    type Error = Infallible;

    fn evaluate(&self, phenotype: &[f64]) -> Result<f64, Infallible> {
        Ok(-phenotype.iter().map(|x| x * x).sum::<f64>())
    }
}

/// OneMax function for binary phenotypes
///
/// Counts the variables that are at least 0.5. Optimum when all are set.
#[derive(Clone, Copy, Debug)]
pub struct OneMax {
    length: usize,
}

impl OneMax {
    /// Create a new OneMax function over `length` variables
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Best reachable fitness, every variable set
    pub fn optimal_fitness(&self) -> f64 {
        self.length as f64
    }
}

impl Objective for OneMax {
    type Error = Infallible;

    fn evaluate(&self, phenotype: &[f64]) -> Result<f64, Infallible> {
        Ok(phenotype.iter().filter(|&&x| x >= 0.5).count() as f64)
    }
}
