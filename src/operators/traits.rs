//! Operator traits
//!
//! This module defines the core operator traits. Each trait has a per-item
//! method and a population-level method that reads its input without mutating
//! it and returns a freshly owned population of the same shape.

use rand::Rng;

use crate::genome::chromosome::Chromosome;

/// Selection operator trait
///
/// Chooses chromosomes from a scored population for reproduction.
pub trait SelectionOperator: Send + Sync {
    /// Select a single chromosome
    ///
    /// Returns the index of the selected chromosome. `fitness` must not be empty.
    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize;

    /// Fill a new population of the same size with selected chromosomes
    ///
    /// `population` and `fitness` must have the same length.
    fn select_population<R: Rng>(
        &self,
        population: &[Chromosome],
        fitness: &[f64],
        rng: &mut R,
    ) -> Vec<Chromosome> {
        (0..population.len())
            .map(|_| population[self.select(fitness, rng)].clone())
            .collect()
    }
}

/// Crossover operator trait
///
/// Combines genetic material from two parents to create two offspring.
pub trait CrossoverOperator: Send + Sync {
    /// Apply crossover to two parents of equal length
    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> (Chromosome, Chromosome);

    /// Recombine rows `2k` and `2k + 1` for every `k`
    ///
    /// A trailing unpaired row is copied through unchanged.
    fn crossover_population<R: Rng>(
        &self,
        population: &[Chromosome],
        rng: &mut R,
    ) -> Vec<Chromosome> {
        let mut offspring = Vec::with_capacity(population.len());
        for pair in population.chunks(2) {
            match pair {
                [parent1, parent2] => {
                    let (child1, child2) = self.crossover(parent1, parent2, rng);
                    offspring.push(child1);
                    offspring.push(child2);
                }
                [single] => offspring.push(single.clone()),
                _ => unreachable!("chunks(2) yields one or two rows"),
            }
        }
        offspring
    }
}

/// Mutation operator trait
///
/// Applies random changes to a chromosome.
pub trait MutationOperator: Send + Sync {
    /// Apply mutation to a chromosome in place
    fn mutate<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R);

    /// Get the mutation probability per gene
    fn mutation_probability(&self) -> f64;

    /// Mutate copies of every chromosome, leaving the input untouched
    fn mutate_population<R: Rng>(&self, population: &[Chromosome], rng: &mut R) -> Vec<Chromosome> {
        population
            .iter()
            .map(|chromosome| {
                let mut mutated = chromosome.clone();
                self.mutate(&mut mutated, rng);
                mutated
            })
            .collect()
    }
}
