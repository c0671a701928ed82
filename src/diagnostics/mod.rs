//! Diagnostics and statistics
//!
//! This module records per-generation fitness statistics for optimization runs.

use std::cmp::Ordering;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Statistics for a single generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number, starting at 0
    pub generation: usize,
    /// Total objective evaluations so far
    pub evaluations: usize,
    /// Best fitness in this generation
    pub best_fitness: f64,
    /// Worst fitness in this generation
    pub worst_fitness: f64,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Fitness standard deviation
    pub fitness_std: f64,
    /// Index of the champion within the evaluated population
    pub champion_index: usize,
    /// Wall time of the whole generation in milliseconds
    pub elapsed_ms: f64,
}

impl GenerationStats {
    /// Compute statistics from a fitness vector
    ///
    /// NaN scores are ignored for best, worst, mean and spread.
    pub fn from_fitness(
        fitness: &[f64],
        champion_index: usize,
        generation: usize,
        evaluations: usize,
    ) -> Self {
        let scores: Vec<f64> = fitness.iter().copied().filter(|f| !f.is_nan()).collect();

        if scores.is_empty() {
            return Self {
                generation,
                evaluations,
                best_fitness: f64::NEG_INFINITY,
                worst_fitness: f64::INFINITY,
                mean_fitness: 0.0,
                fitness_std: 0.0,
                champion_index,
                elapsed_ms: 0.0,
            };
        }

        let n = scores.len() as f64;
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;

        Self {
            generation,
            evaluations,
            best_fitness: best,
            worst_fitness: worst,
            mean_fitness: mean,
            fitness_std: variance.sqrt(),
            champion_index,
            elapsed_ms: 0.0,
        }
    }

    /// Set the generation's wall time
    pub fn with_elapsed(mut self, duration: Duration) -> Self {
        self.elapsed_ms = duration.as_secs_f64() * 1000.0;
        self
    }
}

/// Statistics collector for an entire optimization run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Statistics per generation
    pub generations: Vec<GenerationStats>,
}

impl EvolutionStats {
    /// Create a new stats collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation's statistics
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Get the number of generations recorded
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Get the best fitness across all generations
    pub fn best_ever(&self) -> Option<f64> {
        self.generations
            .iter()
            .map(|g| g.best_fitness)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    /// Get the best fitness of the last recorded generation
    pub fn final_best_fitness(&self) -> Option<f64> {
        self.generations.last().map(|g| g.best_fitness)
    }

    /// Get the history of best fitness values
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.best_fitness).collect()
    }

    /// Get the history of mean fitness values
    pub fn mean_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.mean_fitness).collect()
    }

    /// Get a summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Optimization Summary:\n\
             - Generations: {}\n\
             - Best fitness: {:.6}\n\
             - Final best: {:.6}",
            self.num_generations(),
            self.best_ever().unwrap_or(f64::NEG_INFINITY),
            self.final_best_fitness().unwrap_or(f64::NEG_INFINITY),
        )
    }
}

pub mod prelude {
    pub use super::{EvolutionStats, GenerationStats};
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stats_with_best(generation: usize, best: f64) -> GenerationStats {
        GenerationStats::from_fitness(&[best, best - 1.0], 0, generation, (generation + 1) * 2)
    }

    #[test]
    fn test_generation_stats_from_fitness() {
        let stats = GenerationStats::from_fitness(&[10.0, 20.0, 30.0, 40.0, 50.0], 4, 10, 100);

        assert_eq!(stats.generation, 10);
        assert_eq!(stats.evaluations, 100);
        assert_eq!(stats.champion_index, 4);
        assert_eq!(stats.best_fitness, 50.0);
        assert_eq!(stats.worst_fitness, 10.0);
        assert_relative_eq!(stats.mean_fitness, 30.0);
        assert!(stats.fitness_std > 14.0 && stats.fitness_std < 15.0);
    }

    #[test]
    fn test_generation_stats_skips_nan() {
        let stats = GenerationStats::from_fitness(&[f64::NAN, 1.0, 3.0], 2, 0, 3);
        assert_eq!(stats.best_fitness, 3.0);
        assert_eq!(stats.worst_fitness, 1.0);
        assert_relative_eq!(stats.mean_fitness, 2.0);
    }

    #[test]
    fn test_generation_stats_empty() {
        let stats = GenerationStats::from_fitness(&[], 0, 0, 0);
        assert_eq!(stats.best_fitness, f64::NEG_INFINITY);
        assert_eq!(stats.worst_fitness, f64::INFINITY);
    }

    #[test]
    fn test_evolution_stats_history() {
        let mut stats = EvolutionStats::new();
        for (i, best) in [3.0, 5.0, 4.0].into_iter().enumerate() {
            stats.record(stats_with_best(i, best));
        }

        assert_eq!(stats.num_generations(), 3);
        assert_eq!(stats.best_fitness_history(), vec![3.0, 5.0, 4.0]);
        assert_eq!(stats.mean_fitness_history(), vec![2.5, 4.5, 3.5]);
        assert_eq!(stats.best_ever(), Some(5.0));
        assert_eq!(stats.final_best_fitness(), Some(4.0));
    }

    #[test]
    fn test_evolution_stats_summary() {
        let mut stats = EvolutionStats::new();
        stats.record(stats_with_best(0, 50.0));

        let summary = stats.summary();
        assert!(summary.contains("Generations: 1"));
        assert!(summary.contains("Best fitness: 50"));
    }

    #[test]
    fn test_elapsed() {
        let stats = stats_with_best(0, 1.0).with_elapsed(Duration::from_millis(250));
        assert_relative_eq!(stats.elapsed_ms, 250.0);
    }
}
