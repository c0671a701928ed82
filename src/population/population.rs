//! Population type
//!
//! This module provides the Population container and the between-generation
//! management steps: random initialization and elitist reinsertion.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::chromosome::Chromosome;
use crate::genome::encoding::Encoding;

/// An ordered set of chromosomes of identical length
///
/// Row order matters within a generation: crossover pairs rows `2k` and
/// `2k + 1`, and elitism overwrites the leading rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
}

impl Population {
    /// Create a population from chromosomes
    pub fn new(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }

    /// Create a random population of `size` chromosomes for `n_vars` variables
    ///
    /// Real genes are standard normal, discrete genes uniform over `{0, 1}`.
    pub fn random<R: Rng>(size: usize, n_vars: usize, encoding: &Encoding, rng: &mut R) -> Self {
        let chromosomes = (0..size).map(|_| encoding.generate(n_vars, rng)).collect();
        Self { chromosomes }
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Length shared by every chromosome, if any
    pub fn chromosome_len(&self) -> Option<usize> {
        self.chromosomes.first().map(Chromosome::len)
    }

    /// Get a chromosome by index
    pub fn get(&self, index: usize) -> Option<&Chromosome> {
        self.chromosomes.get(index)
    }

    /// Get an iterator over the chromosomes
    pub fn iter(&self) -> impl Iterator<Item = &Chromosome> {
        self.chromosomes.iter()
    }

    /// Get the chromosomes as a slice
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Take the chromosomes out of this population
    pub fn into_chromosomes(self) -> Vec<Chromosome> {
        self.chromosomes
    }

    /// Build the next generation's input
    ///
    /// Shuffles the row order uniformly, then overwrites the first `elitism`
    /// rows with copies of `champion`. The champion therefore survives no
    /// matter what selection, crossover and mutation produced.
    pub fn reinsert_elite<R: Rng>(
        &self,
        champion: &Chromosome,
        elitism: usize,
        rng: &mut R,
    ) -> Population {
        debug_assert!(elitism <= self.len(), "Elitism exceeds population size");

        let mut chromosomes = self.chromosomes.clone();
        chromosomes.shuffle(rng);
        for slot in chromosomes.iter_mut().take(elitism) {
            slot.clone_from(champion);
        }
        Self { chromosomes }
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Chromosome;

    fn index(&self, index: usize) -> &Self::Output {
        &self.chromosomes[index]
    }
}

impl From<Vec<Chromosome>> for Population {
    fn from(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }
}

impl FromIterator<Chromosome> for Population {
    fn from_iter<I: IntoIterator<Item = Chromosome>>(iter: I) -> Self {
        Self {
            chromosomes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Chromosome;
    type IntoIter = std::slice::Iter<'a, Chromosome>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.iter()
    }
}
