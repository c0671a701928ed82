//! Objective functions and population evaluation
//!
//! This module provides the objective abstraction, the evaluator and
//! benchmark functions.

pub mod benchmarks;
pub mod evaluator;
pub mod traits;

pub mod prelude {
    pub use super::benchmarks::*;
    pub use super::evaluator::*;
    pub use super::traits::*;
}
