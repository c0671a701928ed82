//! Population evaluation
//!
//! Decodes a population and scores every chromosome with an objective.

use crate::fitness::traits::Objective;
use crate::genome::chromosome::Chromosome;
use crate::genome::codec::Codec;

/// Evaluate every chromosome of `population`, in order
///
/// The objective is called exactly once per chromosome. The first objective
/// failure is returned as is and no further chromosomes are evaluated.
pub fn evaluate<O>(
    codec: &Codec,
    population: &[Chromosome],
    objective: &O,
) -> Result<Vec<f64>, O::Error>
where
    O: Objective + ?Sized,
{
    population
        .iter()
        .map(|chromosome| objective.evaluate(&codec.decode(chromosome)))
        .collect()
}

/// Index of the highest fitness, lowest index on ties
///
/// NaN scores never win against a number. Returns `None` for an empty slice.
pub fn best_index(fitness: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in fitness.iter().enumerate() {
        best = match best {
            None => Some((i, value)),
            Some((_, current)) if value > current || (current.is_nan() && !value.is_nan()) => {
                Some((i, value))
            }
            keep => keep,
        };
    }
    best.map(|(i, _)| i)
}
