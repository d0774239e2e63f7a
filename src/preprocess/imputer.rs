//! Fitted imputation for missing feature values

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mean imputation for numeric columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericImputer {
    /// Column means learned at fit time
    means: Vec<f64>,
}

impl NumericImputer {
    /// Learn column means, ignoring missing and non-finite cells.
    ///
    /// `columns` is column-major: one `Vec<Option<f64>>` per numeric column.
    pub fn fit(columns: &[Vec<Option<f64>>]) -> Self {
        let means = columns
            .iter()
            .map(|col| {
                let present: Vec<f64> = col
                    .iter()
                    .filter_map(|v| v.filter(|x| x.is_finite()))
                    .collect();

                if present.is_empty() {
                    0.0
                } else {
                    present.iter().sum::<f64>() / present.len() as f64
                }
            })
            .collect();

        Self { means }
    }

    /// Fill one row of numeric values, replacing missing cells by the mean.
    pub fn transform_row(&self, values: &[Option<f64>]) -> Vec<f64> {
        values
            .iter()
            .zip(self.means.iter())
            .map(|(v, &mean)| match v {
                Some(x) if x.is_finite() => *x,
                _ => mean,
            })
            .collect()
    }

    pub fn n_columns(&self) -> usize {
        self.means.len()
    }
}

/// Most-frequent imputation for categorical columns.
///
/// Blank (empty or whitespace-only) cells count as missing. Frequency
/// ties break to the lexicographically smallest value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeImputer {
    modes: Vec<String>,
}

fn is_missing(value: &str) -> bool {
    value.trim().is_empty()
}

impl ModeImputer {
    /// Learn the per-column mode. `columns` is column-major.
    pub fn fit(columns: &[Vec<String>]) -> Self {
        let modes = columns
            .iter()
            .map(|col| {
                let mut counts: HashMap<&str, usize> = HashMap::new();
                for value in col.iter().filter(|v| !is_missing(v)) {
                    *counts.entry(value.as_str()).or_insert(0) += 1;
                }

                counts
                    .into_iter()
                    .max_by(|(a_val, a_count), (b_val, b_count)| {
                        a_count.cmp(b_count).then(b_val.cmp(a_val))
                    })
                    .map(|(value, _)| value.to_string())
                    .unwrap_or_default()
            })
            .collect();

        Self { modes }
    }

    /// Fill one row of categorical values, replacing blanks by the mode.
    pub fn transform_row(&self, values: &[&str]) -> Vec<String> {
        values
            .iter()
            .zip(self.modes.iter())
            .map(|(v, mode)| {
                if is_missing(v) {
                    mode.clone()
                } else {
                    v.trim().to_string()
                }
            })
            .collect()
    }

    pub fn n_columns(&self) -> usize {
        self.modes.len()
    }
}
