//! Genotype encodings
//!
//! An [`Encoding`] fixes the chromosome shape and the gene alphabet. It is
//! resolved once when an optimizer is configured; the codec, mutation and
//! population initialization all dispatch on it.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::genome::bounds::VarRange;
use crate::genome::chromosome::Chromosome;

/// Largest supported number of bits per discrete variable
pub const MAX_VAR_SIZE: usize = 63;

/// Name of an encoding, as accepted in configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingKind {
    /// One unbounded real gene per variable
    #[default]
    Real,
    /// `var_size` binary genes per variable, scaled into a range
    Discrete,
}

impl EncodingKind {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Discrete => "discrete",
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "real" => Ok(Self::Real),
            "discrete" => Ok(Self::Discrete),
            _ => Err(ConfigError::UnknownEncoding(s.to_string())),
        }
    }
}

/// Genotype encoding
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Encoding {
    /// Genes are the variables themselves
    #[default]
    Real,
    /// Each variable is a group of `var_size` bits, least significant first,
    /// scaled linearly into `var_range`
    Discrete { var_range: VarRange, var_size: usize },
}

impl Encoding {
    /// Real encoding
    pub fn real() -> Self {
        Self::Real
    }

    /// Discrete encoding with a validated range and bit width
    pub fn discrete(var_range: VarRange, var_size: usize) -> Result<Self, ConfigError> {
        let encoding = Self::Discrete {
            var_range,
            var_size,
        };
        encoding.validate()?;
        Ok(encoding)
    }

    /// Check range ordering and bit width
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Real => Ok(()),
            Self::Discrete {
                var_range,
                var_size,
            } => {
                var_range.validate()?;
                if *var_size == 0 || *var_size > MAX_VAR_SIZE {
                    return Err(ConfigError::InvalidVarSize(*var_size));
                }
                Ok(())
            }
        }
    }

    /// Name of this encoding
    pub fn kind(&self) -> EncodingKind {
        match self {
            Self::Real => EncodingKind::Real,
            Self::Discrete { .. } => EncodingKind::Discrete,
        }
    }

    /// Genes per variable (always 1 for real encoding)
    pub fn var_size(&self) -> usize {
        match self {
            Self::Real => 1,
            Self::Discrete { var_size, .. } => *var_size,
        }
    }

    /// Range of decoded variables, if bounded
    pub fn var_range(&self) -> Option<VarRange> {
        match self {
            Self::Real => None,
            Self::Discrete { var_range, .. } => Some(*var_range),
        }
    }

    /// Chromosome length for `n_vars` variables
    pub fn chromosome_len(&self, n_vars: usize) -> usize {
        n_vars * self.var_size()
    }

    /// Draw one random gene
    ///
    /// Real genes come from a standard normal distribution, discrete genes
    /// uniformly from `{0, 1}`.
    pub fn random_gene<R: Rng>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Real => StandardNormal.sample(rng),
            Self::Discrete { .. } => {
                if rng.gen::<bool>() {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Generate a random chromosome for `n_vars` variables
    pub fn generate<R: Rng>(&self, n_vars: usize, rng: &mut R) -> Chromosome {
        (0..self.chromosome_len(n_vars))
            .map(|_| self.random_gene(rng))
            .collect()
    }
}
