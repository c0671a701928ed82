//! Genotype to phenotype mapping
//!
//! The [`Codec`] turns chromosomes into the real-valued variable vectors that
//! objective functions consume.

use std::borrow::Cow;

use crate::error::ConfigError;
use crate::genome::bounds::VarRange;
use crate::genome::chromosome::Chromosome;
use crate::genome::encoding::Encoding;

/// Decoder for one encoding and variable count
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Codec {
    n_vars: usize,
    encoding: Encoding,
}

impl Codec {
    /// Create a codec for `n_vars` variables
    ///
    /// Fails if `encoding` has an invalid range or bit width, which can happen
    /// when it was built or deserialized without [`Encoding::discrete`].
    pub fn new(n_vars: usize, encoding: Encoding) -> Result<Self, ConfigError> {
        encoding.validate()?;
        Ok(Self { n_vars, encoding })
    }

    /// Number of decoded variables
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// The encoding being decoded
    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// Expected chromosome length
    pub fn chromosome_len(&self) -> usize {
        self.encoding.chromosome_len(self.n_vars)
    }

    /// Whether decoding returns the genes unchanged
    ///
    /// True for real encoding, and for discrete encoding with one bit per
    /// variable over the unit range.
    pub fn is_identity(&self) -> bool {
        match self.encoding {
            Encoding::Real => true,
            Encoding::Discrete {
                var_range,
                var_size,
            } => var_size == 1 && var_range.is_unit(),
        }
    }

    /// Decode one chromosome into its phenotype
    ///
    /// Identity decodes borrow the chromosome's genes instead of copying them.
    /// The chromosome length must be `n_vars * var_size`.
    pub fn decode<'a>(&self, chromosome: &'a Chromosome) -> Cow<'a, [f64]> {
        if self.is_identity() {
            return Cow::Borrowed(chromosome.genes());
        }

        match self.encoding {
            Encoding::Discrete {
                var_range,
                var_size,
            } => Cow::Owned(decode_bits(chromosome.genes(), var_range, var_size)),
            Encoding::Real => Cow::Borrowed(chromosome.genes()),
        }
    }

    /// Decode every chromosome of a population, in order
    pub fn decode_population<'a>(&self, population: &'a [Chromosome]) -> Vec<Cow<'a, [f64]>> {
        population.iter().map(|c| self.decode(c)).collect()
    }
}

/// Interpret each group of `var_size` genes as an unsigned integer, least
/// significant bit first, and scale it so all-zeros maps to `min` and all-ones
/// to `max`
fn decode_bits(genes: &[f64], var_range: VarRange, var_size: usize) -> Vec<f64> {
    let max_value = ((1u64 << var_size) - 1) as f64;

    genes
        .chunks_exact(var_size)
        .map(|group| {
            let value = group.iter().enumerate().fold(0u64, |acc, (bit, &gene)| {
                if gene != 0.0 {
                    acc | (1 << bit)
                } else {
                    acc
                }
            });
            var_range.denormalize(value as f64 / max_value)
        })
        .collect()
}
