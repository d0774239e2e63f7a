//! One-hot encoding for categorical feature columns

use serde::{Deserialize, Serialize};

/// One-hot encoder over the categories observed at fit time.
///
/// Categories are stored sorted per column. A value unseen during fit
/// encodes as an all-zero block for that column rather than erroring,
/// so inference tolerates inputs outside the training vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Sorted category list per column
    categories: Vec<Vec<String>>,
}

impl OneHotEncoder {
    /// Learn the sorted category vocabulary of each column.
    ///
    /// `columns` is column-major, already imputed (no blanks expected).
    pub fn fit(columns: &[Vec<String>]) -> Self {
        let categories = columns
            .iter()
            .map(|col| {
                let mut values: Vec<String> = col.to_vec();
                values.sort();
                values.dedup();
                values
            })
            .collect();

        Self { categories }
    }

    /// Encode one row of categorical values into a dense 0/1 block.
    pub fn transform_row(&self, values: &[String]) -> Vec<f64> {
        let mut encoded = Vec::with_capacity(self.output_width());

        for (value, cats) in values.iter().zip(self.categories.iter()) {
            let hit = cats.binary_search(value).ok();
            for idx in 0..cats.len() {
                encoded.push(if hit == Some(idx) { 1.0 } else { 0.0 });
            }
        }

        encoded
    }

    /// Output column names, `{column}_{category}` per encoded slot.
    pub fn feature_names(&self, column_names: &[&str]) -> Vec<String> {
        column_names
            .iter()
            .zip(self.categories.iter())
            .flat_map(|(col, cats)| cats.iter().map(move |c| format!("{}_{}", col, c)))
            .collect()
    }

    /// Total width of the encoded block.
    pub fn output_width(&self) -> usize {
        self.categories.iter().map(|c| c.len()).sum()
    }

    pub fn n_columns(&self) -> usize {
        self.categories.len()
    }
}
