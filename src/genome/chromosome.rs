//! Chromosome type
//!
//! A chromosome is a fixed-length sequence of genes. Real encoded chromosomes
//! hold one unbounded gene per variable; discrete encoded chromosomes hold
//! `var_size` genes per variable, each exactly `0.0` or `1.0`.

use serde::{Deserialize, Serialize};

/// Fixed-length genotype of a candidate solution
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chromosome {
    genes: Vec<f64>,
}

impl Chromosome {
    /// Create a new chromosome with the given genes
    pub fn new(genes: Vec<f64>) -> Self {
        Self { genes }
    }

    /// Create a zero-filled chromosome of the given length
    pub fn zeros(length: usize) -> Self {
        Self {
            genes: vec![0.0; length],
        }
    }

    /// Create a chromosome filled with a constant value
    pub fn filled(length: usize, value: f64) -> Self {
        Self {
            genes: vec![value; length],
        }
    }

    /// Create a binary chromosome from bits (`true` becomes `1.0`)
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        Self {
            genes: bits
                .into_iter()
                .map(|b| if b { 1.0 } else { 0.0 })
                .collect(),
        }
    }

    /// Number of genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Check if the chromosome has no genes
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Get the genes as a slice
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Get the genes as a mutable slice
    pub fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    /// Iterate over the genes
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.genes.iter()
    }

    /// Get the underlying vector
    pub fn into_inner(self) -> Vec<f64> {
        self.genes
    }

    /// Number of positions at which two chromosomes differ
    pub fn differing_genes(&self, other: &Self) -> usize {
        self.genes
            .iter()
            .zip(other.genes.iter())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl std::ops::Index<usize> for Chromosome {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.genes[index]
    }
}

impl std::ops::IndexMut<usize> for Chromosome {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.genes[index]
    }
}

impl From<Vec<f64>> for Chromosome {
    fn from(genes: Vec<f64>) -> Self {
        Self { genes }
    }
}

impl From<Chromosome> for Vec<f64> {
    fn from(chromosome: Chromosome) -> Self {
        chromosome.genes
    }
}

impl<const N: usize> From<[f64; N]> for Chromosome {
    fn from(arr: [f64; N]) -> Self {
        Self {
            genes: arr.to_vec(),
        }
    }
}

impl FromIterator<f64> for Chromosome {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            genes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Chromosome {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Chromosome {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_chromosome_new() {
        let c = Chromosome::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(c.len(), 3);
        assert_eq!(c.genes(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_chromosome_zeros_and_filled() {
        assert!(Chromosome::zeros(5).genes().iter().all(|&x| x == 0.0));
        assert_eq!(Chromosome::filled(3, 42.0).genes(), &[42.0, 42.0, 42.0]);
        assert!(Chromosome::zeros(0).is_empty());
    }

    #[test]
    fn test_chromosome_from_bits() {
        let c = Chromosome::from_bits([true, false, true, true]);
        assert_eq!(c.genes(), &[1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_chromosome_indexing() {
        let mut c: Chromosome = [1.0, 2.0, 3.0].into();
        assert_eq!(c[1], 2.0);
        c[1] = 42.0;
        assert_eq!(c[1], 42.0);
    }

    #[test]
    fn test_differing_genes() {
        let a = Chromosome::from_bits([true, true, false, false]);
        let b = Chromosome::from_bits([true, false, true, false]);
        assert_eq!(a.differing_genes(&b), 2);
        assert_eq!(a.differing_genes(&a), 0);
    }

    #[test]
    fn test_chromosome_iteration() {
        let c: Chromosome = (1..=3).map(f64::from).collect();
        let sum: f64 = c.into_iter().sum();
        assert_relative_eq!(sum, 6.0);
    }

    #[test]
    fn test_chromosome_serialization() {
        let c = Chromosome::new(vec![1.0, 0.5, -3.0]);
        let serialized = serde_json::to_string(&c).unwrap();
        assert_eq!(serialized, "[1.0,0.5,-3.0]");
        let deserialized: Chromosome = serde_json::from_str(&serialized).unwrap();
        assert_eq!(c, deserialized);
    }
}
