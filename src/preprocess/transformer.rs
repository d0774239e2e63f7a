//! The fitted preprocessing front of the model pipeline
//!
//! Owns the column contract: which record fields feed the model and in
//! what order. Numeric columns are mean-imputed then standardized;
//! categorical columns are mode-imputed then one-hot encoded. Both the
//! training path and the single-row serving path go through the same
//! transform so the feature layout cannot drift between them.

use super::encoder::OneHotEncoder;
use super::imputer::{ModeImputer, NumericImputer};
use super::scaler::StandardScaler;
use crate::data::{SalaryRecord, SalaryTable};
use crate::error::{PredictorError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Input column order of the feature table, as fitted.
pub const FEATURE_COLUMNS: [&str; 5] = [
    "experience_level",
    "job_title",
    "company_location",
    "remote_ratio",
    "work_year",
];

/// Numeric model inputs, in output-block order.
pub const NUMERIC_COLUMNS: [&str; 2] = ["remote_ratio", "work_year"];

/// Categorical model inputs, in output-block order.
pub const CATEGORICAL_COLUMNS: [&str; 3] =
    ["experience_level", "job_title", "company_location"];

fn numeric_values(record: &SalaryRecord) -> [Option<f64>; 2] {
    [record.remote_ratio, record.work_year]
}

fn categorical_values(record: &SalaryRecord) -> [&str; 3] {
    [
        &record.experience_level,
        &record.job_title,
        &record.company_location,
    ]
}

/// Fitted preprocessor: imputation + scaling + one-hot encoding.
///
/// Constructed only by [`Preprocessor::fit`], so a value in hand is
/// always usable for transforms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessor {
    numeric_imputer: NumericImputer,
    scaler: StandardScaler,
    categorical_imputer: ModeImputer,
    encoder: OneHotEncoder,
}

impl Preprocessor {
    /// Fit all transforms on the training table.
    pub fn fit(table: &SalaryTable) -> Result<Self> {
        if table.is_empty() {
            return Err(PredictorError::EmptyDataset(
                "cannot fit preprocessor on an empty table".to_string(),
            ));
        }

        let n = table.len();

        // Numeric block: learn means, impute, then learn scaling on the
        // imputed matrix.
        let numeric_columns: Vec<Vec<Option<f64>>> = (0..NUMERIC_COLUMNS.len())
            .map(|j| {
                table
                    .records
                    .iter()
                    .map(|r| numeric_values(r)[j])
                    .collect()
            })
            .collect();
        let numeric_imputer = NumericImputer::fit(&numeric_columns);

        let imputed: Vec<Vec<f64>> = table
            .records
            .iter()
            .map(|r| numeric_imputer.transform_row(&numeric_values(r)))
            .collect();
        let x = Array2::from_shape_fn((n, NUMERIC_COLUMNS.len()), |(i, j)| imputed[i][j]);
        let scaler = StandardScaler::fit(&x);

        // Categorical block: learn modes, impute, then learn the one-hot
        // vocabulary on the imputed columns.
        let raw_columns: Vec<Vec<String>> = (0..CATEGORICAL_COLUMNS.len())
            .map(|j| {
                table
                    .records
                    .iter()
                    .map(|r| categorical_values(r)[j].to_string())
                    .collect()
            })
            .collect();
        let categorical_imputer = ModeImputer::fit(&raw_columns);

        let imputed_rows: Vec<Vec<String>> = table
            .records
            .iter()
            .map(|r| categorical_imputer.transform_row(&categorical_values(r)))
            .collect();
        let imputed_columns: Vec<Vec<String>> = (0..CATEGORICAL_COLUMNS.len())
            .map(|j| imputed_rows.iter().map(|row| row[j].clone()).collect())
            .collect();
        let encoder = OneHotEncoder::fit(&imputed_columns);

        Ok(Self {
            numeric_imputer,
            scaler,
            categorical_imputer,
            encoder,
        })
    }

    /// Transform a single record into one dense feature row.
    pub fn transform_one(&self, record: &SalaryRecord) -> Vec<f64> {
        let numeric = self
            .scaler
            .transform_row(&self.numeric_imputer.transform_row(&numeric_values(record)));

        let categorical = self.encoder.transform_row(
            &self
                .categorical_imputer
                .transform_row(&categorical_values(record)),
        );

        let mut row = numeric;
        row.extend(categorical);
        row
    }

    /// Transform a batch of records into a dense feature matrix.
    pub fn transform(&self, records: &[SalaryRecord]) -> Vec<Vec<f64>> {
        records.iter().map(|r| self.transform_one(r)).collect()
    }

    /// Names of the output feature columns, numeric block first.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = NUMERIC_COLUMNS.iter().map(|s| s.to_string()).collect();
        names.extend(self.encoder.feature_names(&CATEGORICAL_COLUMNS));
        names
    }

    /// Width of the output feature rows.
    pub fn output_width(&self) -> usize {
        NUMERIC_COLUMNS.len() + self.encoder.output_width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        level: &str,
        title: &str,
        location: &str,
        remote: Option<f64>,
        year: Option<f64>,
        salary: f64,
    ) -> SalaryRecord {
        SalaryRecord {
            experience_level: level.to_string(),
            job_title: title.to_string(),
            company_location: location.to_string(),
            remote_ratio: remote,
            work_year: year,
            salary_in_usd: Some(salary),
        }
    }

    fn sample_table() -> SalaryTable {
        let rows = vec![
            record("Senior", "Data Scientist", "US", Some(100.0), Some(2023.0), 150_000.0),
            record("Entry-level", "Data Analyst", "IN", Some(0.0), Some(2022.0), 40_000.0),
            record("Senior", "Data Scientist", "US", Some(50.0), Some(2024.0), 160_000.0),
            record("Mid-level", "Data Engineer", "GB", Some(100.0), Some(2023.0), 90_000.0),
        ];
        SalaryTable::from_records(rows).0
    }

    #[test]
    fn test_output_layout_matches_feature_names() {
        let table = sample_table();
        let preprocessor = Preprocessor::fit(&table).unwrap();

        let names = preprocessor.feature_names();
        assert_eq!(names.len(), preprocessor.output_width());
        assert_eq!(names[0], "remote_ratio");
        assert_eq!(names[1], "work_year");
        assert!(names[2..].iter().all(|n| {
            n.starts_with("experience_level_")
                || n.starts_with("job_title_")
                || n.starts_with("company_location_")
        }));

        for row in preprocessor.transform(&table.records) {
            assert_eq!(row.len(), preprocessor.output_width());
        }
    }

    #[test]
    fn test_missing_values_are_imputed() {
        let table = sample_table();
        let preprocessor = Preprocessor::fit(&table).unwrap();

        let incomplete = record("", "Data Scientist", "US", None, Some(2023.0), 0.0);
        let row = preprocessor.transform_one(&incomplete);

        // Every cell is a real number after imputation
        assert!(row.iter().all(|v| v.is_finite()));

        // Blank experience level imputes to the mode ("Senior"), so its
        // one-hot block is not all zero.
        let names = preprocessor.feature_names();
        let senior_idx = names
            .iter()
            .position(|n| n == "experience_level_Senior")
            .unwrap();
        assert_eq!(row[senior_idx], 1.0);
    }

    #[test]
    fn test_unknown_categories_encode_all_zero() {
        let table = sample_table();
        let preprocessor = Preprocessor::fit(&table).unwrap();

        let unseen = record("Executive", "Head of Data", "JP", Some(0.0), Some(2024.0), 0.0);
        let row = preprocessor.transform_one(&unseen);

        // All one-hot slots stay zero; only the numeric block is nonzero.
        assert!(row[NUMERIC_COLUMNS.len()..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_fit_on_empty_table_is_an_error() {
        let (table, _) = SalaryTable::from_records(vec![]);
        assert!(Preprocessor::fit(&table).is_err());
    }
}
