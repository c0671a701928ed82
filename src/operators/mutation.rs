//! Mutation operators
//!
//! This module provides bit-flip and Gaussian mutation, plus the
//! encoding-resolved [`EncodingMutation`] used by the optimizer.
//!
//! Every gene is an independent Bernoulli trial, so one chromosome can have
//! zero, one or many genes mutated in the same pass.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::ConfigError;
use crate::genome::chromosome::Chromosome;
use crate::genome::encoding::Encoding;
use crate::operators::traits::MutationOperator;

fn check_probability(probability: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(ConfigError::InvalidMutationProbability(probability))
    }
}

/// Bit-flip mutation for binary chromosomes
///
/// Flips each selected gene with `(gene + 1) mod 2`.
#[derive(Clone, Debug, PartialEq)]
pub struct BitFlipMutation {
    mutation_probability: f64,
}

impl BitFlipMutation {
    /// Create a new bit-flip mutation with a per-gene probability in [0, 1]
    pub fn new(mutation_probability: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            mutation_probability: check_probability(mutation_probability)?,
        })
    }
}

impl MutationOperator for BitFlipMutation {
    fn mutate<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) {
        for gene in chromosome.genes_mut() {
            if rng.gen::<f64>() < self.mutation_probability {
                *gene = (*gene + 1.0) % 2.0;
            }
        }
    }

    fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }
}

/// Gaussian mutation for real chromosomes
///
/// Adds noise drawn from `N(0, variance)` to each selected gene.
#[derive(Clone, Debug)]
pub struct GaussianMutation {
    mutation_probability: f64,
    variance: f64,
    normal: Normal<f64>,
}

impl GaussianMutation {
    /// Create a new Gaussian mutation
    ///
    /// `variance` must be positive and finite.
    pub fn new(mutation_probability: f64, variance: f64) -> Result<Self, ConfigError> {
        let mutation_probability = check_probability(mutation_probability)?;
        if !(variance > 0.0 && variance.is_finite()) {
            return Err(ConfigError::InvalidMutationVariance(variance));
        }
        let normal = Normal::new(0.0, variance.sqrt())
            .map_err(|_| ConfigError::InvalidMutationVariance(variance))?;

        Ok(Self {
            mutation_probability,
            variance,
            normal,
        })
    }

    /// Variance of the added noise
    pub fn variance(&self) -> f64 {
        self.variance
    }
}

impl MutationOperator for GaussianMutation {
    fn mutate<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) {
        for gene in chromosome.genes_mut() {
            if rng.gen::<f64>() < self.mutation_probability {
                *gene += self.normal.sample(rng);
            }
        }
    }

    fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }
}

/// Mutation strategy resolved from an [`Encoding`]
#[derive(Clone, Debug)]
pub enum EncodingMutation {
    /// Discrete encoding
    BitFlip(BitFlipMutation),
    /// Real encoding
    Gaussian(GaussianMutation),
}

impl EncodingMutation {
    /// Pick the perturbation that matches `encoding`
    ///
    /// `variance` is only used, and only validated, for real encoding.
    pub fn for_encoding(
        encoding: &Encoding,
        mutation_probability: f64,
        variance: f64,
    ) -> Result<Self, ConfigError> {
        match encoding {
            Encoding::Real => Ok(Self::Gaussian(GaussianMutation::new(
                mutation_probability,
                variance,
            )?)),
            Encoding::Discrete { .. } => {
                Ok(Self::BitFlip(BitFlipMutation::new(mutation_probability)?))
            }
        }
    }
}

impl MutationOperator for EncodingMutation {
    fn mutate<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) {
        match self {
            Self::BitFlip(op) => op.mutate(chromosome, rng),
            Self::Gaussian(op) => op.mutate(chromosome, rng),
        }
    }

    fn mutation_probability(&self) -> f64 {
        match self {
            Self::BitFlip(op) => op.mutation_probability(),
            Self::Gaussian(op) => op.mutation_probability(),
        }
    }
}
