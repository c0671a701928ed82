//! Error types for genopt
//!
//! This module defines all error types used throughout the library.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error raised by a user objective function
pub type BoxedObjectiveError = Box<dyn StdError + Send + Sync + 'static>;

/// Error type for invalid optimizer configuration
///
/// Every variant is detected eagerly when an optimizer is built. Invalid values
/// are rejected, never clamped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Encoding name is neither `real` nor `discrete`
    #[error("Unknown encoding '{0}': expected 'real' or 'discrete'")]
    UnknownEncoding(String),

    /// Variable range is inverted, degenerate or not finite
    #[error("Invalid variable range: min ({min}) must be smaller than max ({max})")]
    InvalidRange { min: f64, max: f64 },

    /// Bits per discrete variable must be positive
    #[error("Invalid variable size {0}: must be between 1 and 63")]
    InvalidVarSize(usize),

    /// Crossover pairs rows, so the population size must be even
    #[error("Population size must be even, got {0}")]
    OddPopulationSize(usize),

    /// Population size of zero
    #[error("Population size must be positive")]
    EmptyPopulation,

    /// Number of variables of zero
    #[error("Number of variables must be positive")]
    NoVariables,

    /// Tournament win probability outside (0, 1]
    #[error("Tournament probability must be in (0, 1], got {0}")]
    InvalidTournamentProbability(f64),

    /// Tournament group larger than the population or empty
    #[error("Tournament size must be in [1, {popsize}], got {size}")]
    InvalidTournamentSize { size: usize, popsize: usize },

    /// Mutation probability outside [0, 1]
    #[error("Mutation probability must be in [0, 1], got {0}")]
    InvalidMutationProbability(f64),

    /// Real mutation variance must be positive
    #[error("Mutation variance must be positive, got {0}")]
    InvalidMutationVariance(f64),

    /// More elite copies than population slots
    #[error("Elitism ({elitism}) cannot exceed population size ({popsize})")]
    ElitismTooLarge { elitism: usize, popsize: usize },

    /// Configuration document could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Top-level error type for optimization runs
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// The objective function failed; the original error is kept as the source
    #[error("Objective function failed: {0}")]
    Objective(#[source] BoxedObjectiveError),
}

impl EvolutionError {
    /// Wrap an objective failure
    pub fn objective<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Objective(Box::new(err))
    }

    /// Borrow the objective error, if this is one
    pub fn as_objective_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Self::Objective(err) => Some(err.as_ref()),
            Self::Configuration(_) => None,
        }
    }
}

/// Result type alias for optimization operations
pub type EvoResult<T> = Result<T, EvolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error, PartialEq)]
    #[error("singular matrix")]
    struct SingularMatrix;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnknownEncoding("binary".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown encoding 'binary': expected 'real' or 'discrete'"
        );

        let err = ConfigError::InvalidRange { min: 1.0, max: 0.0 };
        assert_eq!(
            err.to_string(),
            "Invalid variable range: min (1) must be smaller than max (0)"
        );

        assert_eq!(
            ConfigError::OddPopulationSize(7).to_string(),
            "Population size must be even, got 7"
        );
    }

    #[test]
    fn test_evolution_error_from_config_error() {
        let evo_err: EvolutionError = ConfigError::InvalidVarSize(0).into();
        assert!(matches!(
            evo_err,
            EvolutionError::Configuration(ConfigError::InvalidVarSize(0))
        ));
        assert!(evo_err.as_objective_error().is_none());
    }

    #[test]
    fn test_objective_error_is_preserved() {
        let err = EvolutionError::objective(SingularMatrix);
        assert_eq!(
            err.to_string(),
            "Objective function failed: singular matrix"
        );

        let source = err.as_objective_error().unwrap();
        assert_eq!(
            source.downcast_ref::<SingularMatrix>(),
            Some(&SingularMatrix)
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
