//! Numeric dataset consumed by the tree models

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Dense feature matrix with targets, produced by the preprocessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Feature matrix (n_samples x n_features)
    pub features: Vec<Vec<f64>>,
    /// Target values
    pub labels: Vec<f64>,
    /// Feature names, one per output column
    pub feature_names: Vec<String>,
}

impl Dataset {
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<f64>, feature_names: Vec<String>) -> Self {
        Self {
            features,
            labels,
            feature_names,
        }
    }

    /// Number of samples
    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    /// Number of features
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Create a subset of the dataset by indices
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Bootstrap sample (random sample with replacement)
    pub fn bootstrap_sample(&self, seed: u64) -> Dataset {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.n_samples();

        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

        self.subset(&indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> Dataset {
        Dataset::new(
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![10.0, 20.0, 30.0],
            vec!["f1".to_string(), "f2".to_string()],
        )
    }

    #[test]
    fn test_dataset_dimensions() {
        let dataset = sample_dataset();

        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 2);
    }

    #[test]
    fn test_subset_preserves_rows() {
        let dataset = sample_dataset();
        let subset = dataset.subset(&[2, 0]);

        assert_eq!(subset.features, vec![vec![5.0, 6.0], vec![1.0, 2.0]]);
        assert_eq!(subset.labels, vec![30.0, 10.0]);
    }

    #[test]
    fn test_bootstrap_sample_is_deterministic() {
        let dataset = sample_dataset();

        let a = dataset.bootstrap_sample(7);
        let b = dataset.bootstrap_sample(7);

        assert_eq!(a.n_samples(), dataset.n_samples());
        assert_eq!(a.labels, b.labels);
    }
}
