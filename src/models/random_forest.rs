//! Random forest regressor: bagged decision trees

use super::decision_tree::{DecisionTree, TreeConfig};
use crate::data::Dataset;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Random forest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in a leaf
    pub min_samples_leaf: usize,
    /// Max features per split (None = all features)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 16,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Random forest regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    feature_names: Vec<String>,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    /// Create a new random forest
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            feature_names: Vec::new(),
            feature_importances: Vec::new(),
        }
    }

    /// Train the forest. Trees fit in parallel, each on its own
    /// bootstrap sample with a seed derived from the forest seed.
    pub fn fit(&mut self, dataset: &Dataset) {
        self.feature_names = dataset.feature_names.clone();
        let n_features = dataset.n_features();

        let trees: Vec<DecisionTree> = (0..self.config.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_config = TreeConfig {
                    max_depth: self.config.max_depth,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                    max_features: self.config.max_features,
                    seed: self.config.seed.wrapping_add(i as u64),
                };

                let mut tree = DecisionTree::new(tree_config);

                if self.config.bootstrap {
                    let sample = dataset.bootstrap_sample(self.config.seed + i as u64);
                    tree.fit(&sample);
                } else {
                    tree.fit(dataset);
                }

                tree
            })
            .collect();

        self.trees = trees;

        // Aggregate and normalize feature importances
        self.feature_importances = vec![0.0; n_features];
        for tree in &self.trees {
            for (i, &imp) in tree.feature_importances().iter().enumerate() {
                self.feature_importances[i] += imp;
            }
        }

        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut self.feature_importances {
                *imp /= sum;
            }
        }
    }

    /// Predict for a single feature row (mean over trees)
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }

        let total: f64 = self.trees.iter().map(|t| t.predict_one(features)).sum();
        total / self.trees.len() as f64
    }

    /// Predict for a batch of feature rows
    pub fn predict_rows(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.par_iter().map(|f| self.predict_one(f)).collect()
    }

    /// Predict for every row of a dataset
    pub fn predict(&self, dataset: &Dataset) -> Vec<f64> {
        self.predict_rows(&dataset.features)
    }

    /// Normalized feature importances
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    /// Feature names with importances, sorted descending
    pub fn feature_importance_ranking(&self) -> Vec<(&str, f64)> {
        let mut ranking: Vec<(&str, f64)> = self
            .feature_names
            .iter()
            .zip(self.feature_importances.iter())
            .map(|(n, &i)| (n.as_str(), i))
            .collect();

        ranking.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        ranking
    }

    /// Number of trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
