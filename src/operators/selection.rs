//! Selection operators
//!
//! This module provides probabilistic tournament selection.

use std::cmp::Ordering;

use rand::seq::index;
use rand::Rng;

use crate::error::ConfigError;
use crate::operators::traits::SelectionOperator;

/// Probabilistic tournament selection
///
/// Every selection draws `tournament_size` distinct chromosomes and ranks them
/// by fitness, best first (lower index first on ties). Rank `i` wins with
/// probability `p * (1 - p)^i`; the worst rank takes whatever probability is
/// left so the distribution sums to one.
///
/// Members are drawn without replacement within one tournament, while
/// separate tournaments draw independently, so a chromosome may be selected
/// many times.
#[derive(Clone, Debug, PartialEq)]
pub struct TournamentSelection {
    tournament_size: usize,
    win_probability: f64,
    thresholds: Vec<f64>,
}

impl TournamentSelection {
    /// Create a new tournament selection
    ///
    /// `win_probability` must lie in (0, 1] and `tournament_size` must be at
    /// least 1. Values of `win_probability` at or below 0.5 are accepted and
    /// give weak or inverted selection pressure.
    pub fn new(tournament_size: usize, win_probability: f64) -> Result<Self, ConfigError> {
        if !(win_probability > 0.0 && win_probability <= 1.0) {
            return Err(ConfigError::InvalidTournamentProbability(win_probability));
        }
        if tournament_size == 0 {
            return Err(ConfigError::InvalidTournamentSize {
                size: tournament_size,
                popsize: 0,
            });
        }

        Ok(Self {
            tournament_size,
            win_probability,
            thresholds: win_thresholds(win_probability, tournament_size),
        })
    }

    /// Create binary tournament selection (size = 2)
    pub fn binary(win_probability: f64) -> Result<Self, ConfigError> {
        Self::new(2, win_probability)
    }

    /// Number of competitors per tournament
    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Probability that the best competitor wins
    pub fn win_probability(&self) -> f64 {
        self.win_probability
    }

    /// Cumulative win probabilities by rank; the last entry is exactly 1
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Draw the winning rank for a tournament of `size` members
    fn winning_rank<R: Rng>(&self, size: usize, rng: &mut R) -> usize {
        let u = rng.gen::<f64>();
        if size == self.tournament_size {
            rank_for(&self.thresholds, u)
        } else {
            rank_for(&win_thresholds(self.win_probability, size), u)
        }
    }
}

/// Cumulative thresholds `p, p + p(1-p), ...` for the first `size - 1` ranks,
/// closed by 1 for the worst rank
fn win_thresholds(win_probability: f64, size: usize) -> Vec<f64> {
    let mut thresholds = Vec::with_capacity(size);
    let mut cumulative = 0.0;
    let mut rank_probability = win_probability;
    for _ in 1..size {
        cumulative += rank_probability;
        thresholds.push(cumulative);
        rank_probability *= 1.0 - win_probability;
    }
    thresholds.push(1.0);
    thresholds
}

/// First rank whose cumulative threshold lies above `u`
fn rank_for(thresholds: &[f64], u: f64) -> usize {
    thresholds
        .iter()
        .position(|&t| u < t)
        .unwrap_or(thresholds.len() - 1)
}

/// NaN ranks below every number
fn rank_key(value: f64) -> f64 {
    if value.is_nan() {
        f64::NEG_INFINITY
    } else {
        value
    }
}

impl SelectionOperator for TournamentSelection {
    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize {
        assert!(!fitness.is_empty(), "Population cannot be empty");

        let size = self.tournament_size.min(fitness.len());
        let mut tournament = index::sample(rng, fitness.len(), size).into_vec();
        if size == 1 {
            return tournament[0];
        }

        // Best first, lower index first on ties
        tournament.sort_by(|&a, &b| {
            rank_key(fitness[b])
                .partial_cmp(&rank_key(fitness[a]))
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });

        tournament[self.winning_rank(size, rng)]
    }
}
