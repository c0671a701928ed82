//! Population management
//!
//! This module provides the Population type, its random initialization and
//! elitist reinsertion.

#[allow(clippy::module_inception)]
pub mod population;

pub mod prelude {
    pub use super::population::*;
}
