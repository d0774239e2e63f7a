//! The full prediction pipeline and its persisted artifact
//!
//! A [`SalaryPipeline`] bundles the fitted preprocessor and forest with
//! metadata and persists as one opaque bincode file. Training writes it,
//! serving reads it; the only shared contract is the recorded feature
//! column order.

use super::random_forest::{ForestConfig, RandomForest};
use crate::data::{Dataset, SalaryRecord, SalaryTable};
use crate::error::{PredictorError, Result};
use crate::metrics;
use crate::preprocess::{Preprocessor, FEATURE_COLUMNS};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Artifact layout version this build reads and writes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Held-out evaluation scores stored with the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalMetrics {
    pub r2: f64,
    pub mae: f64,
    pub rmse: f64,
}

/// Metadata persisted alongside the fitted pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineMeta {
    /// Artifact layout version
    pub format_version: u32,
    /// RFC 3339 training timestamp
    pub trained_at: String,
    /// Input column order the pipeline was fitted on
    pub feature_columns: Vec<String>,
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Held-out metrics, when evaluation ran before saving
    pub metrics: Option<EvalMetrics>,
}

/// Fitted preprocessing + random forest, one opaque predict operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryPipeline {
    meta: PipelineMeta,
    preprocessor: Preprocessor,
    forest: RandomForest,
}

impl SalaryPipeline {
    /// Fit the preprocessor and forest on a training table.
    pub fn fit(train: &SalaryTable, config: ForestConfig) -> Result<Self> {
        let preprocessor = Preprocessor::fit(train)?;

        let dataset = Dataset::new(
            preprocessor.transform(&train.records),
            train.targets.clone(),
            preprocessor.feature_names(),
        );

        let mut forest = RandomForest::new(config);
        forest.fit(&dataset);

        let meta = PipelineMeta {
            format_version: ARTIFACT_FORMAT_VERSION,
            trained_at: chrono::Utc::now().to_rfc3339(),
            feature_columns: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            n_trees: forest.n_trees(),
            metrics: None,
        };

        Ok(Self {
            meta,
            preprocessor,
            forest,
        })
    }

    /// Predict the USD salary for one feature row.
    pub fn predict_usd(&self, record: &SalaryRecord) -> f64 {
        let row = self.preprocessor.transform_one(record);
        self.forest.predict_one(&row)
    }

    /// Predict for a batch of records.
    pub fn predict_batch(&self, records: &[SalaryRecord]) -> Vec<f64> {
        self.forest.predict_rows(&self.preprocessor.transform(records))
    }

    /// Score the pipeline on a held-out table and record the result in
    /// the artifact metadata.
    pub fn evaluate(&mut self, test: &SalaryTable) -> EvalMetrics {
        let predictions = self.predict_batch(&test.records);

        let scores = EvalMetrics {
            r2: metrics::r2_score(&test.targets, &predictions),
            mae: metrics::mean_absolute_error(&test.targets, &predictions),
            rmse: metrics::root_mean_squared_error(&test.targets, &predictions),
        };

        self.meta.metrics = Some(scores);
        scores
    }

    pub fn meta(&self) -> &PipelineMeta {
        &self.meta
    }

    /// Top feature importances from the underlying forest.
    pub fn feature_importance_ranking(&self) -> Vec<(&str, f64)> {
        self.forest.feature_importance_ranking()
    }

    /// Persist the fitted pipeline as a single artifact file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)?;

        tracing::info!("saved model artifact to {}", path.display());
        Ok(())
    }

    /// Restore a pipeline from an artifact file.
    ///
    /// A missing file, undecodable bytes, or a layout version from a
    /// different build all fail here so the serving process can abort
    /// at startup.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PredictorError::ArtifactMissing(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let pipeline: SalaryPipeline = bincode::deserialize_from(reader)?;

        if pipeline.meta.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(PredictorError::ArtifactVersion {
                found: pipeline.meta.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        tracing::info!(
            "loaded model artifact from {} ({} trees, trained {})",
            path.display(),
            pipeline.meta.n_trees,
            pipeline.meta.trained_at
        );
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        level: &str,
        title: &str,
        location: &str,
        remote: f64,
        year: f64,
        salary: f64,
    ) -> SalaryRecord {
        SalaryRecord {
            experience_level: level.to_string(),
            job_title: title.to_string(),
            company_location: location.to_string(),
            remote_ratio: Some(remote),
            work_year: Some(year),
            salary_in_usd: Some(salary),
        }
    }

    fn synthetic_table() -> SalaryTable {
        // Salary tracks seniority with mild year drift, repeated so
        // bootstrap samples still see every pattern.
        let mut rows = Vec::new();
        for year in [2021.0, 2022.0, 2023.0, 2024.0] {
            for _ in 0..3 {
                rows.push(record("Entry-level", "Data Analyst", "IN", 0.0, year, 40_000.0));
                rows.push(record("Mid-level", "Data Engineer", "GB", 50.0, year, 80_000.0));
                rows.push(record("Senior", "Data Scientist", "US", 100.0, year, 150_000.0));
                rows.push(record("Executive", "Head of Data", "US", 0.0, year, 250_000.0));
            }
        }
        SalaryTable::from_records(rows).0
    }

    fn small_config() -> ForestConfig {
        ForestConfig {
            n_trees: 15,
            max_depth: 8,
            ..Default::default()
        }
    }

    #[test]
    fn test_roundtrip_training_row_prediction() {
        let table = synthetic_table();
        let pipeline = SalaryPipeline::fit(&table, small_config()).unwrap();

        // Predicting a row identical to a training row gives a finite,
        // non-negative salary in the plausible range of the data.
        let probe = record("Senior", "Data Scientist", "US", 100.0, 2023.0, 0.0);
        let salary = pipeline.predict_usd(&probe);

        assert!(salary.is_finite());
        assert!(salary >= 0.0);
        assert!(salary > 40_000.0 && salary < 250_000.0);
    }

    #[test]
    fn test_evaluate_records_metrics_in_meta() {
        let table = synthetic_table();
        let split = table.random_split(0.25, 42).unwrap();

        let mut pipeline = SalaryPipeline::fit(&split.train, small_config()).unwrap();
        assert!(pipeline.meta().metrics.is_none());

        let scores = pipeline.evaluate(&split.test);
        assert!(scores.mae.is_finite());
        assert!(scores.rmse >= scores.mae);
        assert_eq!(pipeline.meta().metrics, Some(scores));
    }

    #[test]
    fn test_artifact_save_load_roundtrip() {
        let table = synthetic_table();
        let pipeline = SalaryPipeline::fit(&table, small_config()).unwrap();

        let dir = std::env::temp_dir().join("salary_predictor_test_artifact");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("model.bin");

        pipeline.save(&path).unwrap();
        let restored = SalaryPipeline::load(&path).unwrap();

        let probe = record("Mid-level", "Data Engineer", "GB", 50.0, 2022.0, 0.0);
        assert_eq!(pipeline.predict_usd(&probe), restored.predict_usd(&probe));
        assert_eq!(restored.meta().feature_columns, FEATURE_COLUMNS);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_artifact_fails() {
        let result = SalaryPipeline::load(Path::new("/nonexistent/model.bin"));
        assert!(matches!(result, Err(PredictorError::ArtifactMissing(_))));
    }
}
