//! Genetic optimizer
//!
//! This module implements the generational genetic optimizer: evaluate,
//! select, recombine, mutate and reinsert the champion, once per generation.

use std::borrow::Cow;
use std::time::Instant;

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{EvolutionStats, GenerationStats};
use crate::error::{ConfigError, EvoResult, EvolutionError};
use crate::fitness::evaluator::{best_index, evaluate};
use crate::fitness::traits::Objective;
use crate::genome::bounds::VarRange;
use crate::genome::chromosome::Chromosome;
use crate::genome::codec::Codec;
use crate::genome::encoding::{Encoding, EncodingKind};
use crate::operators::crossover::OnePointCrossover;
use crate::operators::mutation::EncodingMutation;
use crate::operators::selection::TournamentSelection;
use crate::operators::traits::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::population::population::Population;

fn default_t_sel_p() -> f64 {
    0.7
}

fn default_one() -> usize {
    1
}

fn default_mut_var() -> f64 {
    1.0
}

/// Configuration for the genetic optimizer
///
/// Only `n_vars` and `popsize` are required when deserializing; every other
/// field falls back to its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneticOptimizerConfig {
    /// Number of decoded variables
    pub n_vars: usize,
    /// Population size, must be even
    pub popsize: usize,
    /// Probability that the best member of a tournament wins
    #[serde(default = "default_t_sel_p")]
    pub t_sel_p: f64,
    /// Members per tournament
    #[serde(default = "default_one")]
    pub t_sel_size: usize,
    /// Per-gene mutation probability, `1 / chromosome length` when unset
    #[serde(default)]
    pub mut_p: Option<f64>,
    /// Variance of real mutation noise
    #[serde(default = "default_mut_var")]
    pub mut_var: f64,
    /// Genotype encoding
    #[serde(default)]
    pub encoding: EncodingKind,
    /// Range of decoded discrete variables
    #[serde(default)]
    pub var_range: VarRange,
    /// Bits per discrete variable, ignored for real encoding
    #[serde(default = "default_one")]
    pub var_size: usize,
    /// Copies of the champion carried into the next generation
    #[serde(default = "default_one")]
    pub elitism: usize,
}

impl GeneticOptimizerConfig {
    /// Create a configuration with default operator settings
    pub fn new(n_vars: usize, popsize: usize) -> Self {
        Self {
            n_vars,
            popsize,
            t_sel_p: default_t_sel_p(),
            t_sel_size: 1,
            mut_p: None,
            mut_var: default_mut_var(),
            encoding: EncodingKind::Real,
            var_range: VarRange::unit(),
            var_size: 1,
            elitism: 1,
        }
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve the encoding kind, range and bit width into an [`Encoding`]
    ///
    /// Range and bit width are only checked for discrete encoding.
    pub fn encoding(&self) -> Result<Encoding, ConfigError> {
        match self.encoding {
            EncodingKind::Real => Ok(Encoding::real()),
            EncodingKind::Discrete => Encoding::discrete(self.var_range, self.var_size),
        }
    }

    /// Bits per variable after resolving the encoding
    pub fn effective_var_size(&self) -> usize {
        match self.encoding {
            EncodingKind::Real => 1,
            EncodingKind::Discrete => self.var_size,
        }
    }

    /// Per-gene mutation probability, defaulting to one expected flip per chromosome
    pub fn mutation_probability(&self) -> f64 {
        self.mut_p
            .unwrap_or_else(|| 1.0 / (self.n_vars * self.effective_var_size()) as f64)
    }

    /// Check every setting, returning the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_vars == 0 {
            return Err(ConfigError::NoVariables);
        }
        if self.popsize == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if !self.popsize.is_multiple_of(2) {
            return Err(ConfigError::OddPopulationSize(self.popsize));
        }

        self.encoding()?;

        if !(self.t_sel_p > 0.0 && self.t_sel_p <= 1.0) {
            return Err(ConfigError::InvalidTournamentProbability(self.t_sel_p));
        }
        if self.t_sel_size == 0 || self.t_sel_size > self.popsize {
            return Err(ConfigError::InvalidTournamentSize {
                size: self.t_sel_size,
                popsize: self.popsize,
            });
        }
        if let Some(p) = self.mut_p {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::InvalidMutationProbability(p));
            }
        }
        if self.encoding == EncodingKind::Real && !(self.mut_var > 0.0 && self.mut_var.is_finite())
        {
            return Err(ConfigError::InvalidMutationVariance(self.mut_var));
        }
        if self.elitism > self.popsize {
            return Err(ConfigError::ElitismTooLarge {
                elitism: self.elitism,
                popsize: self.popsize,
            });
        }

        Ok(())
    }
}

/// Builder for GeneticOptimizer
#[derive(Clone, Debug)]
pub struct GeneticOptimizerBuilder {
    config: GeneticOptimizerConfig,
}

impl GeneticOptimizerBuilder {
    /// Create a new builder with default operator settings
    pub fn new(n_vars: usize, popsize: usize) -> Self {
        Self {
            config: GeneticOptimizerConfig::new(n_vars, popsize),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: GeneticOptimizerConfig) -> Self {
        Self { config }
    }

    /// Set the tournament win probability
    pub fn tournament_probability(mut self, probability: f64) -> Self {
        self.config.t_sel_p = probability;
        self
    }

    /// Set the tournament size
    pub fn tournament_size(mut self, size: usize) -> Self {
        self.config.t_sel_size = size;
        self
    }

    /// Set the per-gene mutation probability
    pub fn mutation_probability(mut self, probability: f64) -> Self {
        self.config.mut_p = Some(probability);
        self
    }

    /// Set the variance of real mutation noise
    pub fn mutation_variance(mut self, variance: f64) -> Self {
        self.config.mut_var = variance;
        self
    }

    /// Use real encoding
    pub fn real(mut self) -> Self {
        self.config.encoding = EncodingKind::Real;
        self
    }

    /// Use discrete encoding with `var_size` bits per variable over `var_range`
    pub fn discrete(mut self, var_range: VarRange, var_size: usize) -> Self {
        self.config.encoding = EncodingKind::Discrete;
        self.config.var_range = var_range;
        self.config.var_size = var_size;
        self
    }

    /// Set the encoding kind
    pub fn encoding(mut self, encoding: EncodingKind) -> Self {
        self.config.encoding = encoding;
        self
    }

    /// Set the number of champion copies kept each generation
    pub fn elitism(mut self, elitism: usize) -> Self {
        self.config.elitism = elitism;
        self
    }

    /// Validate the configuration and initialize the population
    pub fn build<O, R>(self, objective: O, rng: &mut R) -> EvoResult<GeneticOptimizer<O>>
    where
        O: Objective,
        R: Rng,
    {
        GeneticOptimizer::new(self.config, objective, rng)
    }
}

/// Lifecycle of an optimizer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Population initialized, no generation run yet
    Idle,
    /// At least one generation has run
    Running,
}

/// Generational genetic optimizer
///
/// Maximizes an [`Objective`] over `n_vars` variables. Every generation
/// evaluates the population, remembers its best chromosome as the champion,
/// then builds the next population through tournament selection, one-point
/// crossover and mutation before reinserting `elitism` copies of the champion.
pub struct GeneticOptimizer<O> {
    config: GeneticOptimizerConfig,
    codec: Codec,
    selection: TournamentSelection,
    crossover: OnePointCrossover,
    mutation: EncodingMutation,
    objective: O,
    population: Population,
    fitness: Vec<f64>,
    champion: Option<Chromosome>,
    generation: usize,
    evaluations: usize,
    stats: EvolutionStats,
}

impl<O: Objective> GeneticOptimizer<O> {
    /// Validate `config` and initialize a random population
    pub fn new<R: Rng>(
        config: GeneticOptimizerConfig,
        objective: O,
        rng: &mut R,
    ) -> EvoResult<Self> {
        config.validate()?;

        let encoding = config.encoding()?;
        let codec = Codec::new(config.n_vars, encoding)?;
        let selection = TournamentSelection::new(config.t_sel_size, config.t_sel_p)?;
        let mutation = EncodingMutation::for_encoding(
            &encoding,
            config.mutation_probability(),
            config.mut_var,
        )?;
        let population = Population::random(config.popsize, config.n_vars, &encoding, rng);

        debug!(
            "Initialized {} encoding: {} chromosomes of {} genes, mutation probability {}",
            encoding.kind(),
            population.len(),
            codec.chromosome_len(),
            mutation.mutation_probability()
        );

        Ok(Self {
            fitness: vec![0.0; config.popsize],
            config,
            codec,
            selection,
            crossover: OnePointCrossover::new(),
            mutation,
            objective,
            population,
            champion: None,
            generation: 0,
            evaluations: 0,
            stats: EvolutionStats::new(),
        })
    }

    /// Run `n_gen` generations and return the champion genotype
    ///
    /// Repeated calls continue from the current population. With `n_gen == 0`
    /// on a fresh optimizer the initial population is evaluated once so that a
    /// champion exists; no generation is counted.
    ///
    /// An objective failure aborts the run and is returned unchanged as
    /// [`EvolutionError::Objective`].
    pub fn optimize<R: Rng>(&mut self, n_gen: usize, rng: &mut R) -> EvoResult<Chromosome> {
        for _ in 0..n_gen {
            self.step(rng)?;
        }

        if let Some(champion) = &self.champion {
            return Ok(champion.clone());
        }
        self.evaluate_population()?;
        Ok(self.select_champion().clone())
    }

    /// Run a single generation
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> EvoResult<()> {
        let gen_start = Instant::now();

        self.evaluate_population()?;
        let champion = self.select_champion().clone();

        let parents = self.population.chromosomes();
        let selected = self.selection.select_population(parents, &self.fitness, rng);
        let offspring = self.crossover.crossover_population(&selected, rng);
        let mutated = Population::new(self.mutation.mutate_population(&offspring, rng));
        self.population = mutated.reinsert_elite(&champion, self.config.elitism, rng);

        let stats = GenerationStats::from_fitness(
            &self.fitness,
            self.champion_index(),
            self.generation,
            self.evaluations,
        )
        .with_elapsed(gen_start.elapsed());
        info!(
            "Generation: {} - Max fitness: {}",
            self.generation, stats.best_fitness
        );
        self.stats.record(stats);
        self.generation += 1;

        Ok(())
    }

    fn evaluate_population(&mut self) -> EvoResult<()> {
        self.fitness = evaluate(&self.codec, self.population.chromosomes(), &self.objective)
            .map_err(EvolutionError::objective)?;
        self.evaluations += self.population.len();
        Ok(())
    }

    fn champion_index(&self) -> usize {
        best_index(&self.fitness).unwrap_or(0)
    }

    fn select_champion(&mut self) -> &Chromosome {
        let index = self.champion_index();
        debug!(
            "Champion index {} with fitness {}",
            index, self.fitness[index]
        );
        self.champion.insert(self.population[index].clone())
    }

    /// Decode one chromosome with this optimizer's codec
    pub fn decode<'a>(&self, chromosome: &'a Chromosome) -> Cow<'a, [f64]> {
        self.codec.decode(chromosome)
    }

    /// Decode a population with this optimizer's codec
    pub fn decode_population<'a>(&self, population: &'a [Chromosome]) -> Vec<Cow<'a, [f64]>> {
        self.codec.decode_population(population)
    }

    /// Current population
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Fitness of the most recently evaluated population
    ///
    /// All zeros before the first evaluation.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Best chromosome of the most recently evaluated population
    pub fn champion(&self) -> Option<&Chromosome> {
        self.champion.as_ref()
    }

    /// Number of completed generations
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Total objective evaluations so far
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        if self.generation == 0 {
            RunState::Idle
        } else {
            RunState::Running
        }
    }

    /// The validated configuration
    pub fn config(&self) -> &GeneticOptimizerConfig {
        &self.config
    }

    /// The codec for this optimizer's encoding
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// The objective being maximized
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Per-generation statistics
    pub fn stats(&self) -> &EvolutionStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::benchmarks::{OneMax, Sum};
    use crate::fitness::traits::TryFnObjective;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("objective exploded at {0}")]
    struct Exploded(usize);

    fn sum(x: &[f64]) -> f64 {
        x.iter().sum()
    }

    #[test]
    fn test_config_defaults() {
        let config = GeneticOptimizerConfig::new(10, 100);
        assert_eq!(config.t_sel_p, 0.7);
        assert_eq!(config.t_sel_size, 1);
        assert_eq!(config.mut_p, None);
        assert_eq!(config.mut_var, 1.0);
        assert_eq!(config.encoding, EncodingKind::Real);
        assert_eq!(config.var_range, VarRange::unit());
        assert_eq!(config.var_size, 1);
        assert_eq!(config.elitism, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_mutation_probability() {
        let mut config = GeneticOptimizerConfig::new(10, 4);
        assert_eq!(config.mutation_probability(), 0.1);

        // var_size is forced to 1 for real encoding
        config.var_size = 4;
        assert_eq!(config.mutation_probability(), 0.1);

        config.encoding = EncodingKind::Discrete;
        assert_eq!(config.mutation_probability(), 1.0 / 40.0);

        config.mut_p = Some(0.3);
        assert_eq!(config.mutation_probability(), 0.3);
    }

    #[test]
    fn test_config_from_json() {
        let config = GeneticOptimizerConfig::from_json(
            r#"{
                "n_vars": 3,
                "popsize": 20,
                "encoding": "discrete",
                "var_range": { "min": -2.0, "max": 2.0 },
                "var_size": 8,
                "t_sel_size": 2
            }"#,
        )
        .unwrap();

        assert_eq!(config.n_vars, 3);
        assert_eq!(config.encoding, EncodingKind::Discrete);
        assert_eq!(config.var_size, 8);
        assert_eq!(config.t_sel_p, 0.7);
        assert_eq!(config.elitism, 1);
        assert_eq!(
            config.encoding().unwrap(),
            Encoding::discrete(VarRange::new(-2.0, 2.0).unwrap(), 8).unwrap()
        );

        let json = config.to_json().unwrap();
        let round_trip = GeneticOptimizerConfig::from_json(&json).unwrap();
        assert_eq!(round_trip, config);
    }

    #[test]
    fn test_config_from_json_unknown_encoding() {
        let json = r#"{"n_vars": 3, "popsize": 20, "encoding": "binary"}"#;
        let err = GeneticOptimizerConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(msg) if msg.contains("binary")));
    }

    fn check(edit: impl FnOnce(&mut GeneticOptimizerConfig)) -> ConfigError {
        let mut config = GeneticOptimizerConfig::new(4, 10);
        edit(&mut config);
        config.validate().unwrap_err()
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(check(|c| c.n_vars = 0), ConfigError::NoVariables);
        assert_eq!(check(|c| c.popsize = 0), ConfigError::EmptyPopulation);
        assert_eq!(check(|c| c.popsize = 11), ConfigError::OddPopulationSize(11));
        assert_eq!(
            check(|c| c.t_sel_p = 0.0),
            ConfigError::InvalidTournamentProbability(0.0)
        );
        assert_eq!(
            check(|c| c.t_sel_size = 12),
            ConfigError::InvalidTournamentSize {
                size: 12,
                popsize: 10
            }
        );
        assert_eq!(
            check(|c| c.mut_p = Some(-0.1)),
            ConfigError::InvalidMutationProbability(-0.1)
        );
        assert_eq!(
            check(|c| c.mut_var = 0.0),
            ConfigError::InvalidMutationVariance(0.0)
        );
        assert_eq!(
            check(|c| c.elitism = 11),
            ConfigError::ElitismTooLarge {
                elitism: 11,
                popsize: 10
            }
        );
    }

    #[test]
    fn test_discrete_validation_errors() {
        let mut config = GeneticOptimizerConfig::new(4, 10);
        config.encoding = EncodingKind::Discrete;
        config.var_range = VarRange { min: 1.0, max: 1.0 };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRange { min: 1.0, max: 1.0 })
        );

        config.var_range = VarRange::unit();
        config.var_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidVarSize(0)));

        // Mutation variance only matters for real encoding
        config.var_size = 4;
        config.mut_var = -1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_real_encoding_ignores_range() {
        let mut config = GeneticOptimizerConfig::new(4, 10);
        config.var_range = VarRange {
            min: 3.0,
            max: -3.0,
        };
        config.var_size = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_construction_rejects_odd_popsize() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = GeneticOptimizerBuilder::new(3, 7).build(sum, &mut rng);
        assert!(matches!(
            result,
            Err(EvolutionError::Configuration(ConfigError::OddPopulationSize(7)))
        ));
    }

    #[test]
    fn test_initial_state() {
        let mut rng = StdRng::seed_from_u64(1);
        let optimizer = GeneticOptimizerBuilder::new(5, 10)
            .discrete(VarRange::new(-1.0, 1.0).unwrap(), 3)
            .build(sum, &mut rng)
            .unwrap();

        assert_eq!(optimizer.state(), RunState::Idle);
        assert_eq!(optimizer.generation(), 0);
        assert_eq!(optimizer.population().len(), 10);
        assert_eq!(optimizer.population().chromosome_len(), Some(15));
        assert_eq!(optimizer.codec().chromosome_len(), 15);
        assert!(optimizer.champion().is_none());
        assert_eq!(optimizer.fitness(), &[0.0; 10]);
    }

    #[test]
    fn test_optimize_runs_generations() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut optimizer = GeneticOptimizerBuilder::new(4, 20)
            .tournament_size(2)
            .build(Sum, &mut rng)
            .unwrap();

        let champion = optimizer.optimize(5, &mut rng).unwrap();
        assert_eq!(champion.len(), 4);
        assert_eq!(optimizer.state(), RunState::Running);
        assert_eq!(optimizer.generation(), 5);
        assert_eq!(optimizer.evaluations(), 100);
        assert_eq!(optimizer.stats().num_generations(), 5);
        assert_eq!(optimizer.champion(), Some(&champion));

        // Further calls continue from the current population
        optimizer.optimize(3, &mut rng).unwrap();
        assert_eq!(optimizer.generation(), 8);
        assert_eq!(optimizer.stats().generations[7].generation, 7);
    }

    #[test]
    fn test_champion_has_max_fitness_of_last_evaluation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut optimizer = GeneticOptimizerBuilder::new(6, 10)
            .build(sum, &mut rng)
            .unwrap();

        let champion = optimizer.optimize(1, &mut rng).unwrap();
        let max = optimizer
            .fitness()
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(sum(&optimizer.decode(&champion)), max);
        assert_eq!(optimizer.stats().best_fitness_history(), vec![max]);
    }

    #[test]
    fn test_elite_copy_in_next_population() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut optimizer = GeneticOptimizerBuilder::new(6, 10)
            .elitism(3)
            .build(sum, &mut rng)
            .unwrap();

        let champion = optimizer.optimize(1, &mut rng).unwrap();
        let copies = optimizer
            .population()
            .iter()
            .filter(|c| **c == champion)
            .count();
        assert!(copies >= 3);
    }

    #[test]
    fn test_zero_generations_on_fresh_optimizer() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut optimizer = GeneticOptimizerBuilder::new(4, 6)
            .build(sum, &mut rng)
            .unwrap();
        let initial = optimizer.population().clone();

        let champion = optimizer.optimize(0, &mut rng).unwrap();
        assert_eq!(optimizer.generation(), 0);
        assert_eq!(optimizer.state(), RunState::Idle);
        assert_eq!(optimizer.population(), &initial);
        assert!(initial.iter().any(|c| *c == champion));
    }

    #[test]
    fn test_objective_error_propagates() {
        let mut rng = StdRng::seed_from_u64(6);
        let objective = TryFnObjective::new(|x: &[f64]| {
            if x.len() == 3 {
                Err(Exploded(3))
            } else {
                Ok(0.0)
            }
        });
        let mut optimizer = GeneticOptimizerBuilder::new(3, 4)
            .build(objective, &mut rng)
            .unwrap();

        let err = optimizer.optimize(2, &mut rng).unwrap_err();
        let source = err.as_objective_error().unwrap();
        assert_eq!(source.downcast_ref::<Exploded>(), Some(&Exploded(3)));
        assert_eq!(optimizer.generation(), 0);
    }

    #[test]
    fn test_discrete_onemax_improves() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut optimizer = GeneticOptimizerBuilder::new(20, 40)
            .discrete(VarRange::unit(), 1)
            .tournament_size(2)
            .build(OneMax::new(20), &mut rng)
            .unwrap();

        optimizer.optimize(30, &mut rng).unwrap();
        let history = optimizer.stats().best_fitness_history();
        assert!(history[29] > history[0]);
        assert!(history.windows(2).all(|w| w[1] >= w[0]));
    }
}
