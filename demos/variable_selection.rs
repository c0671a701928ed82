//! Linear Regression Variable Selection
//!
//! Each variable is a single bit that switches one feature column on or off.
//! The objective fits ordinary least squares on the selected columns and
//! returns the negated BIC, so the optimizer prefers small models that still
//! explain the target well.
//!
//! Run with `RUST_LOG=info` to see the per-generation progress.

use std::f64::consts::PI;

use genopt::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use thiserror::Error;

const N_SAMPLES: usize = 200;
const N_FEATURES: usize = 12;

/// Columns that actually drive the target, with their coefficients
const TRUE_COEFFICIENTS: [(usize, f64); 3] = [(0, 3.0), (3, -2.0), (7, 1.5)];

/// Fitness given to the empty model
const EMPTY_MODEL_FITNESS: f64 = -1e9;

#[derive(Debug, Error)]
#[error("normal equations are singular")]
struct SingularDesign;

struct Dataset {
    /// Row-major feature matrix
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
}

fn synthetic_dataset<R: Rng>(rng: &mut R) -> Dataset {
    let x: Vec<Vec<f64>> = (0..N_SAMPLES)
        .map(|_| {
            (0..N_FEATURES)
                .map(|_| rng.sample::<f64, _>(StandardNormal))
                .collect()
        })
        .collect();

    let y = x
        .iter()
        .map(|row| {
            let signal: f64 = TRUE_COEFFICIENTS.iter().map(|&(j, b)| b * row[j]).sum();
            signal + 0.5 * rng.sample::<f64, _>(StandardNormal)
        })
        .collect();

    Dataset { x, y }
}

fn selected_columns(mask: &[f64]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter(|&(_, &bit)| bit == 1.0)
        .map(|(j, _)| j)
        .collect()
}

/// Solve an augmented `k x (k + 1)` system by Gaussian elimination with
/// partial pivoting
fn solve(mut system: Vec<Vec<f64>>) -> Result<Vec<f64>, SingularDesign> {
    let k = system.len();
    for pivot in 0..k {
        let best = (pivot..k)
            .max_by(|&a, &b| system[a][pivot].abs().total_cmp(&system[b][pivot].abs()))
            .ok_or(SingularDesign)?;
        if system[best][pivot].abs() < 1e-12 {
            return Err(SingularDesign);
        }
        system.swap(pivot, best);

        for row in pivot + 1..k {
            let factor = system[row][pivot] / system[pivot][pivot];
            for col in pivot..=k {
                let delta = factor * system[pivot][col];
                system[row][col] -= delta;
            }
        }
    }

    let mut solution = vec![0.0; k];
    for i in (0..k).rev() {
        let tail: f64 = (i + 1..k).map(|j| system[i][j] * solution[j]).sum();
        solution[i] = (system[i][k] - tail) / system[i][i];
    }
    Ok(solution)
}

/// Residual sum of squares of the least squares fit on `columns`
fn residual_sum_of_squares(data: &Dataset, columns: &[usize]) -> Result<f64, SingularDesign> {
    let k = columns.len();

    // X'X with X'y appended as the last column
    let mut system = vec![vec![0.0; k + 1]; k];
    for (row, &target) in data.x.iter().zip(&data.y) {
        for (i, &ci) in columns.iter().enumerate() {
            for (j, &cj) in columns.iter().enumerate() {
                system[i][j] += row[ci] * row[cj];
            }
            system[i][k] += row[ci] * target;
        }
    }
    let coefficients = solve(system)?;

    let rss = data
        .x
        .iter()
        .zip(&data.y)
        .map(|(row, &target)| {
            let fitted: f64 = columns
                .iter()
                .zip(&coefficients)
                .map(|(&c, b)| b * row[c])
                .sum();
            (target - fitted).powi(2)
        })
        .sum();
    Ok(rss)
}

/// Negated Bayesian information criterion of the model using the masked columns
fn negative_bic(data: &Dataset, mask: &[f64]) -> Result<f64, SingularDesign> {
    let columns = selected_columns(mask);
    if columns.is_empty() {
        return Ok(EMPTY_MODEL_FITNESS);
    }

    let n = data.y.len() as f64;
    let rss = residual_sum_of_squares(data, &columns)?;
    let log_likelihood = -n / 2.0 * ((2.0 * PI).ln() + (rss / n).ln() + 1.0);
    Ok(2.0 * log_likelihood - columns.len() as f64 * n.ln())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Linear Regression Variable Selection ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let data = synthetic_dataset(&mut rng);

    let objective = TryFnObjective::new(|mask: &[f64]| negative_bic(&data, mask));
    let mut optimizer = GeneticOptimizerBuilder::new(N_FEATURES, 100)
        .discrete(VarRange::unit(), 1)
        .tournament_size(2)
        .build(objective, &mut rng)?;

    let champion = optimizer.optimize(10, &mut rng)?;
    let selected = selected_columns(&optimizer.decode(&champion));
    let expected: Vec<usize> = TRUE_COEFFICIENTS.iter().map(|&(j, _)| j).collect();

    println!("Optimization complete!");
    println!("  Selected features: {:?}", selected);
    println!("  True features:     {:?}", expected);
    if let Some(best) = optimizer.stats().best_ever() {
        println!("  Best -BIC:         {:.3}", best);
    }
    println!("\n{}", optimizer.stats().summary());

    Ok(())
}
