//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use prever::prelude::*;
//! ```

pub use crate::classification::{CategoryModel, LogisticTrainer};
pub use crate::encoding::{
    Category, FeatureVector, LabeledRow, PrevCategory, RowEncoder, FEATURE_LEN,
};
pub use crate::error::{PreverError, Result};
pub use crate::stats::{align_by_key, linear_regression, pearson, FitDefect, RegressionFit};
