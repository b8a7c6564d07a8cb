//! Feature encoding for historical incident rows.
//!
//! The category-propensity model consumes a fixed-length numeric view of
//! each incident row: a bias term, the reporter's ordinal level scaled to
//! [0, 1], the reporter's prior report count scaled by the training-set
//! maximum, and a one-hot block over the previous report's category.
//!
//! [`RowEncoder`] follows the fitted-transformer shape: `fit` captures the
//! normalization constant from the training set, `encode` applies it. The
//! same fitted encoder must be used for training and for every later
//! prediction; recomputing the constant from a single new row would shift
//! the feature scale under the trained weights.
//!
//! # Examples
//!
//! ```
//! use prever::encoding::{Category, LabeledRow, PrevCategory, RowEncoder};
//!
//! let rows = vec![
//!     LabeledRow::for_target(
//!         Category::Equipment,
//!         PrevCategory::None,
//!         4,
//!         3,
//!         Category::Equipment,
//!     ),
//!     LabeledRow::for_target(
//!         Category::Services,
//!         PrevCategory::Equipment,
//!         1,
//!         2,
//!         Category::Equipment,
//!     ),
//! ];
//!
//! let encoder = RowEncoder::fit(&rows);
//! assert_eq!(encoder.max_prior_count(), 4);
//!
//! let features = encoder.encode_row(&rows[0]);
//! assert_eq!(features[0], 1.0); // bias
//! assert_eq!(features[2], 1.0); // 4 / max(4)
//! ```

use serde::{Deserialize, Serialize};

/// Number of entries in an encoded feature vector:
/// bias + ordinal + count + 5-way one-hot.
pub const FEATURE_LEN: usize = 8;

/// Upper bound of the ordinal level domain (levels run 1..=5).
pub const ORDINAL_LEVEL_MAX: u8 = 5;

/// Fixed-length numeric view of one incident row.
pub type FeatureVector = [f32; FEATURE_LEN];

/// Incident category as reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Equipment,
    Infrastructure,
    Services,
    Other,
}

impl Category {
    /// All reportable categories.
    pub const ALL: [Self; 4] = [
        Self::Equipment,
        Self::Infrastructure,
        Self::Services,
        Self::Other,
    ];
}

/// Category of a reporter's previous incident, with a sentinel for
/// first-time reporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrevCategory {
    Equipment,
    Infrastructure,
    Services,
    Other,
    /// No previous report on record.
    None,
}

impl PrevCategory {
    /// One-hot column order. This order is part of the model contract:
    /// weights trained against it are only meaningful against it.
    pub const ALL: [Self; 5] = [
        Self::Equipment,
        Self::Infrastructure,
        Self::Services,
        Self::Other,
        Self::None,
    ];

    /// Position of this value in the one-hot block.
    #[must_use]
    pub fn one_hot_index(self) -> usize {
        match self {
            Self::Equipment => 0,
            Self::Infrastructure => 1,
            Self::Services => 2,
            Self::Other => 3,
            Self::None => 4,
        }
    }
}

impl From<Option<Category>> for PrevCategory {
    /// Maps the absent previous report (a NULL in the history join) onto
    /// the `None` sentinel.
    fn from(category: Option<Category>) -> Self {
        match category {
            Some(Category::Equipment) => Self::Equipment,
            Some(Category::Infrastructure) => Self::Infrastructure,
            Some(Category::Services) => Self::Services,
            Some(Category::Other) => Self::Other,
            None => Self::None,
        }
    }
}

/// One historical incident row, labeled against a target category.
///
/// Rows are produced by a query-time join outside this crate and are
/// immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledRow {
    /// Category of this incident.
    pub category: Category,
    /// Category of the reporter's previous incident.
    pub previous_category: PrevCategory,
    /// Number of reports the reporter filed before this one.
    pub prior_count: u32,
    /// Reporter's ordinal level, 1..=5.
    pub ordinal_level: u8,
    /// True when `category` matches the training target.
    pub label: bool,
}

impl LabeledRow {
    /// Builds a row labeled against `target`: the label is true exactly
    /// when `category == target`. Every caller labels through here so the
    /// labeling rule lives in one place.
    #[must_use]
    pub fn for_target(
        category: Category,
        previous_category: PrevCategory,
        prior_count: u32,
        ordinal_level: u8,
        target: Category,
    ) -> Self {
        Self {
            category,
            previous_category,
            prior_count,
            ordinal_level,
            label: category == target,
        }
    }
}

/// Encodes incident rows into fixed-length feature vectors.
///
/// Holds the normalization constant fitted from a training set. The
/// constant is floored at 1, so count normalization never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowEncoder {
    max_prior_count: u32,
}

impl RowEncoder {
    /// Fits the encoder to a training set: the normalization constant is
    /// the largest `prior_count` observed, floored at 1.
    #[must_use]
    pub fn fit(rows: &[LabeledRow]) -> Self {
        let max = rows.iter().map(|r| r.prior_count).max().unwrap_or(0);
        Self {
            max_prior_count: max.max(1),
        }
    }

    /// Rebuilds an encoder from a stored normalization constant, flooring
    /// at 1.
    #[must_use]
    pub fn from_max_prior_count(max_prior_count: u32) -> Self {
        Self {
            max_prior_count: max_prior_count.max(1),
        }
    }

    /// Returns the fitted normalization constant (always ≥ 1).
    #[must_use]
    pub fn max_prior_count(&self) -> u32 {
        self.max_prior_count
    }

    /// Encodes one row's predictive attributes.
    ///
    /// Layout: `[bias, ordinal_level / 5, prior_count / max_prior_count,
    /// one-hot(previous_category)]`. Exactly one entry of the one-hot
    /// block is 1.
    ///
    /// `ordinal_level` is expected in 1..=5; out-of-domain values are not
    /// validated here and simply scale past [0, 1].
    #[must_use]
    pub fn encode(
        &self,
        ordinal_level: u8,
        prior_count: u32,
        previous_category: PrevCategory,
    ) -> FeatureVector {
        let mut features = [0.0; FEATURE_LEN];
        features[0] = 1.0;
        features[1] = f32::from(ordinal_level) / f32::from(ORDINAL_LEVEL_MAX);
        features[2] = prior_count as f32 / self.max_prior_count as f32;
        features[3 + previous_category.one_hot_index()] = 1.0;
        features
    }

    /// Encodes a labeled training row.
    #[must_use]
    pub fn encode_row(&self, row: &LabeledRow) -> FeatureVector {
        self.encode(row.ordinal_level, row.prior_count, row.previous_category)
    }
}
