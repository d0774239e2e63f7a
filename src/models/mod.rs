//! Regression models and the persisted prediction pipeline

pub mod decision_tree;
pub mod pipeline;
pub mod random_forest;

pub use decision_tree::{DecisionTree, TreeConfig};
pub use pipeline::{EvalMetrics, PipelineMeta, SalaryPipeline, ARTIFACT_FORMAT_VERSION};
pub use random_forest::{ForestConfig, RandomForest};
