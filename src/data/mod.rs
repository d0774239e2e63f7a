//! Data loading and dataset structures

pub mod dataset;
pub mod records;

pub use dataset::Dataset;
pub use records::{load_records, SalaryRecord, SalaryTable, Split};
