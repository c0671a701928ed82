//! Optimization algorithms
//!
//! This module provides the generational genetic optimizer.

pub mod genetic_optimizer;

pub mod prelude {
    pub use super::genetic_optimizer::*;
}
