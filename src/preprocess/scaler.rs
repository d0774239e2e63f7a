//! Z-score standardization for the numeric feature block

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Standard scaler fitted on the training split.
///
/// Columns with near-zero variance scale to 0.0 instead of dividing by
/// a degenerate standard deviation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Learn per-column mean and standard deviation.
    pub fn fit(x: &Array2<f64>) -> Self {
        let means = x
            .mean_axis(Axis(0))
            .map(|m| m.to_vec())
            .unwrap_or_else(|| vec![0.0; x.ncols()]);
        let stds = x.std_axis(Axis(0), 0.0).to_vec();

        Self { means, stds }
    }

    /// Standardize a matrix column-wise.
    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut result = Array2::zeros(x.raw_dim());

        for (j, mut col) in result.columns_mut().into_iter().enumerate() {
            let mean = self.means[j];
            let std = self.stds[j];

            for (i, val) in col.iter_mut().enumerate() {
                if std > 1e-10 {
                    *val = (x[[i, j]] - mean) / std;
                } else {
                    *val = 0.0;
                }
            }
        }

        result
    }

    /// Standardize a single row.
    pub fn transform_row(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(self.means.iter().zip(self.stds.iter()))
            .map(|(&v, (&mean, &std))| if std > 1e-10 { (v - mean) / std } else { 0.0 })
            .collect()
    }

    pub fn n_columns(&self) -> usize {
        self.means.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_transform_centers_and_scales() {
        let x = array![[1.0, 10.0], [2.0, 10.0], [3.0, 10.0]];
        let scaler = StandardScaler::fit(&x);

        let scaled = scaler.transform(&x);

        // First column: mean 2, population std sqrt(2/3)
        let std = (2.0f64 / 3.0).sqrt();
        assert!((scaled[[0, 0]] - (-1.0 / std)).abs() < 1e-12);
        assert!((scaled[[1, 0]]).abs() < 1e-12);
        assert!((scaled[[2, 0]] - (1.0 / std)).abs() < 1e-12);

        // Constant column collapses to zero
        for i in 0..3 {
            assert_eq!(scaled[[i, 1]], 0.0);
        }
    }

    #[test]
    fn test_transform_row_matches_matrix_transform() {
        let x = array![[5.0, 1.0], [15.0, 3.0]];
        let scaler = StandardScaler::fit(&x);

        let matrix = scaler.transform(&x);
        let row = scaler.transform_row(&[5.0, 1.0]);

        assert!((row[0] - matrix[[0, 0]]).abs() < 1e-12);
        assert!((row[1] - matrix[[0, 1]]).abs() < 1e-12);
    }
}
