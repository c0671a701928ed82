//! # genopt
//!
//! A generational genetic optimizer for Rust.
//!
//! The optimizer maximizes a user objective over a fixed number of variables,
//! using probabilistic tournament selection, one-point crossover, per-gene
//! mutation and elitist reinsertion of the best chromosome.
//!
//! ## Core Concepts
//!
//! - **Encodings**: variables are stored either as real genes or as groups of
//!   bits scaled into a range, see [`genome::encoding::Encoding`]
//! - **Codec**: decodes chromosomes into the variable vectors an objective sees
//! - **Explicit randomness**: every stochastic step takes a caller-owned
//!   [`rand::Rng`], so seeded runs are reproducible
//!
//! ## Quick Start
//!
//! ```rust
//! use genopt::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let mut optimizer = GeneticOptimizerBuilder::new(10, 100)
//!     .discrete(VarRange::new(-1.0, 1.0)?, 8)
//!     .tournament_size(2)
//!     .build(|x: &[f64]| -x.iter().map(|v| v * v).sum::<f64>(), &mut rng)?;
//!
//! let champion = optimizer.optimize(50, &mut rng)?;
//! let variables = optimizer.decode(&champion);
//! assert_eq!(variables.len(), 10);
//! # Ok::<(), genopt::error::EvolutionError>(())
//! ```

pub mod algorithms;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod population;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
}
