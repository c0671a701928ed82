//! Crossover operators
//!
//! This module provides one-point crossover.

use rand::Rng;

use crate::genome::chromosome::Chromosome;
use crate::operators::traits::CrossoverOperator;

/// One-point crossover
///
/// Draws a cut point in `[1, len - 1)` and swaps the gene prefix before it
/// between the two parents; the suffix stays with its original row. The cut
/// is never 0 and never the last index, so at least one gene is exchanged and
/// at least one is kept. Chromosomes of length 2 always cut at 1; shorter
/// chromosomes pass through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnePointCrossover;

impl OnePointCrossover {
    /// Create a new one-point crossover
    pub fn new() -> Self {
        Self
    }

    /// Draw a cut point for chromosomes of `length` genes
    ///
    /// Returns `None` when the chromosome is too short to cut.
    pub fn crossover_point<R: Rng>(&self, length: usize, rng: &mut R) -> Option<usize> {
        match length {
            0 | 1 => None,
            2 => Some(1),
            n => Some(rng.gen_range(1..n - 1)),
        }
    }
}

impl CrossoverOperator for OnePointCrossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        debug_assert_eq!(parent1.len(), parent2.len(), "Parent lengths do not match");

        let Some(point) = self.crossover_point(parent1.len(), rng) else {
            return (parent1.clone(), parent2.clone());
        };

        let (head1, tail1) = parent1.genes().split_at(point);
        let (head2, tail2) = parent2.genes().split_at(point);

        let child1: Chromosome = head2.iter().chain(tail1).copied().collect();
        let child2: Chromosome = head1.iter().chain(tail2).copied().collect();

        (child1, child2)
    }
}
