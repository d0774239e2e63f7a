//! Crate error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading data, fitting, or serving the model
#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model artifact encode/decode failed: {0}")]
    Artifact(#[from] bincode::Error),

    #[error("model artifact not found at {0}")]
    ArtifactMissing(PathBuf),

    #[error("unsupported artifact format version {found} (this build reads version {expected})")]
    ArtifactVersion { found: u32, expected: u32 },

    #[error("dataset is empty: {0}")]
    EmptyDataset(String),
}

/// Result type alias for predictor operations
pub type Result<T> = std::result::Result<T, PredictorError>;
