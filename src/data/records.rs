//! Salary CSV records and the raw feature table

use crate::error::{PredictorError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One row of the salary dataset.
///
/// Numeric cells deserialize to `None` when blank; categorical cells keep
/// the raw string (blank means missing and is handled by imputation). The
/// CSV may carry extra columns; only these are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_location: String,
    #[serde(default)]
    pub remote_ratio: Option<f64>,
    #[serde(default)]
    pub work_year: Option<f64>,
    #[serde(default)]
    pub salary_in_usd: Option<f64>,
}

impl SalaryRecord {
    /// Target value, if present and finite.
    pub fn target(&self) -> Option<f64> {
        self.salary_in_usd.filter(|v| v.is_finite())
    }
}

/// Read all records from a salary CSV file.
pub fn load_records(path: &Path) -> Result<Vec<SalaryRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: SalaryRecord = row?;
        records.push(record);
    }

    Ok(records)
}

/// Raw tabular training data: records plus extracted targets.
///
/// Rows without a usable target are dropped at construction, matching the
/// training contract (the serving path never builds a table).
#[derive(Debug, Clone)]
pub struct SalaryTable {
    pub records: Vec<SalaryRecord>,
    pub targets: Vec<f64>,
}

/// Train/test split result
pub struct Split {
    pub train: SalaryTable,
    pub test: SalaryTable,
}

impl SalaryTable {
    /// Build a table from records, dropping rows with a missing target.
    ///
    /// Returns the table and the number of dropped rows.
    pub fn from_records(records: Vec<SalaryRecord>) -> (Self, usize) {
        let total = records.len();

        let kept: Vec<(SalaryRecord, f64)> = records
            .into_iter()
            .filter_map(|r| r.target().map(|t| (r, t)))
            .collect();

        let dropped = total - kept.len();
        let (records, targets) = kept.into_iter().unzip();

        (Self { records, targets }, dropped)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Create a subset of the table by row indices.
    fn subset(&self, indices: &[usize]) -> SalaryTable {
        SalaryTable {
            records: indices.iter().map(|&i| self.records[i].clone()).collect(),
            targets: indices.iter().map(|&i| self.targets[i]).collect(),
        }
    }

    /// Seeded random split into train and test sets.
    pub fn random_split(&self, test_ratio: f64, seed: u64) -> Result<Split> {
        if self.is_empty() {
            return Err(PredictorError::EmptyDataset(
                "cannot split a table with no rows".to_string(),
            ));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.len();

        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);

        let test_size = (test_ratio * n as f64) as usize;
        let (test_indices, train_indices) = indices.split_at(test_size);

        Ok(Split {
            train: self.subset(train_indices),
            test: self.subset(test_indices),
        })
    }
}
