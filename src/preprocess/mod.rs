//! Feature preprocessing: imputation, scaling, one-hot encoding

pub mod encoder;
pub mod imputer;
pub mod scaler;
pub mod transformer;

pub use encoder::OneHotEncoder;
pub use imputer::{ModeImputer, NumericImputer};
pub use scaler::StandardScaler;
pub use transformer::{Preprocessor, CATEGORICAL_COLUMNS, FEATURE_COLUMNS, NUMERIC_COLUMNS};
