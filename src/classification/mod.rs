//! Category-propensity modeling for incident reports.
//!
//! Trains a linear-logistic model that estimates the probability that a
//! reporter's next incident falls in a chosen target category, from the
//! reporter's ordinal level, prior report count, and previous report
//! category. Training is full-batch gradient descent with L2 shrinkage
//! over a fixed iteration count, so the same rows in the same order
//! always produce the same weights.
//!
//! # Example
//!
//! ```
//! use prever::prelude::*;
//!
//! let target = Category::Equipment;
//! let rows: Vec<LabeledRow> = (0..10)
//!     .map(|i| {
//!         let (category, prev) = if i % 2 == 0 {
//!             (Category::Equipment, PrevCategory::Equipment)
//!         } else {
//!             (Category::Services, PrevCategory::None)
//!         };
//!         LabeledRow::for_target(category, prev, 1, 3, target)
//!     })
//!     .collect();
//!
//! let model = LogisticTrainer::new().fit(&rows).expect("10 rows is enough");
//!
//! // A reporter matching the positive pattern scores above 0.5.
//! let p = model.predict_proba(3, 1, PrevCategory::Equipment);
//! assert!(p > 0.5);
//! ```

use crate::encoding::{FeatureVector, LabeledRow, PrevCategory, RowEncoder, FEATURE_LEN};
use crate::error::{PreverError, Result};
use serde::{Deserialize, Serialize};

/// Default gradient-descent step size.
pub const DEFAULT_LEARNING_RATE: f32 = 0.1;

/// Default number of full-batch iterations. Iteration count is fixed (no
/// early stopping), which makes training deterministic.
pub const DEFAULT_MAX_ITER: usize = 2000;

/// Default L2 shrinkage coefficient.
pub const DEFAULT_L2_PENALTY: f32 = 0.001;

/// Default minimum number of training rows. A usability guard, not a
/// statistical requirement; override with
/// [`LogisticTrainer::with_min_rows`].
pub const DEFAULT_MIN_ROWS: usize = 8;

/// Logits are clamped to this magnitude before exponentiation, so extreme
/// inputs saturate to probability 0 or 1 instead of overflowing into NaN.
pub const LOGIT_CLAMP: f32 = 35.0;

/// Sigmoid with a clamped logit.
fn sigmoid(z: f32) -> f32 {
    let z = z.clamp(-LOGIT_CLAMP, LOGIT_CLAMP);
    1.0 / (1.0 + (-z).exp())
}

fn dot(w: &FeatureVector, x: &FeatureVector) -> f32 {
    w.iter().zip(x.iter()).map(|(wi, xi)| wi * xi).sum()
}

/// Batch gradient-descent trainer for the category-propensity model.
///
/// Holds hyperparameters only; [`fit`](Self::fit) returns a fresh
/// [`CategoryModel`] owned by the caller. Retrain (and discard the old
/// model) whenever the underlying row set changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticTrainer {
    learning_rate: f32,
    max_iter: usize,
    l2_penalty: f32,
    min_rows: usize,
}

impl Default for LogisticTrainer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticTrainer {
    /// Creates a trainer with the default hyperparameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iter: DEFAULT_MAX_ITER,
            l2_penalty: DEFAULT_L2_PENALTY,
            min_rows: DEFAULT_MIN_ROWS,
        }
    }

    /// Sets the gradient-descent step size.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the number of full-batch iterations.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the L2 shrinkage coefficient.
    #[must_use]
    pub fn with_l2_penalty(mut self, l2_penalty: f32) -> Self {
        self.l2_penalty = l2_penalty;
        self
    }

    /// Sets the minimum-row guard.
    #[must_use]
    pub fn with_min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    /// Trains a model on labeled rows.
    ///
    /// Fits the row encoder on `rows`, then runs exactly `max_iter`
    /// full-batch gradient-descent iterations from zero-initialized
    /// weights. Per iteration, for every row the prediction error
    /// `sigmoid(w·x) − label` is accumulated into the gradient; each
    /// weight then updates by
    /// `w_j ← w_j − lr · (grad_j / n + l2_penalty · w_j)`.
    /// The L2 term applies to the raw weight after the data gradient is
    /// averaged over `n`; the update order is part of the
    /// reproducibility contract.
    ///
    /// # Errors
    ///
    /// Returns [`PreverError::InsufficientData`] when fewer than
    /// `min_rows` rows (or no rows at all) are provided. This is the only
    /// failure path.
    pub fn fit(&self, rows: &[LabeledRow]) -> Result<CategoryModel> {
        if rows.is_empty() || rows.len() < self.min_rows {
            return Err(PreverError::InsufficientData {
                needed: self.min_rows.max(1),
                actual: rows.len(),
            });
        }

        let encoder = RowEncoder::fit(rows);
        let x: Vec<FeatureVector> = rows.iter().map(|r| encoder.encode_row(r)).collect();
        let y: Vec<f32> = rows.iter().map(|r| f32::from(u8::from(r.label))).collect();
        let n = rows.len() as f32;

        let mut weights = [0.0_f32; FEATURE_LEN];
        for _ in 0..self.max_iter {
            let mut grad = [0.0_f32; FEATURE_LEN];
            for (features, &label) in x.iter().zip(y.iter()) {
                let err = sigmoid(dot(&weights, features)) - label;
                for (g, &f) in grad.iter_mut().zip(features.iter()) {
                    *g += err * f;
                }
            }
            for (w, &g) in weights.iter_mut().zip(grad.iter()) {
                *w -= self.learning_rate * (g / n + self.l2_penalty * *w);
            }
        }

        Ok(CategoryModel { weights, encoder })
    }
}

/// A trained category-propensity model.
///
/// Immutable after training and owned by the caller that requested it;
/// there is no shared or global instance. The encoder fitted at training
/// time travels with the weights, so predictions always normalize prior
/// counts by the training-set constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryModel {
    weights: [f32; FEATURE_LEN],
    encoder: RowEncoder,
}

impl CategoryModel {
    /// Probability that a report with these attributes falls in the
    /// training target category.
    ///
    /// Pure function; re-encodes the input with the stored encoder and
    /// applies the trained weights.
    #[must_use]
    pub fn predict_proba(
        &self,
        ordinal_level: u8,
        prior_count: u32,
        previous_category: PrevCategory,
    ) -> f32 {
        let features = self.encoder.encode(ordinal_level, prior_count, previous_category);
        sigmoid(dot(&self.weights, &features))
    }

    /// Thresholded prediction: true when the probability is at least 0.5.
    #[must_use]
    pub fn predict(
        &self,
        ordinal_level: u8,
        prior_count: u32,
        previous_category: PrevCategory,
    ) -> bool {
        self.predict_proba(ordinal_level, prior_count, previous_category) >= 0.5
    }

    /// Trained weights, in feature-vector order
    /// (bias, ordinal, count, one-hot block).
    #[must_use]
    pub fn weights(&self) -> &[f32; FEATURE_LEN] {
        &self.weights
    }

    /// Normalization constant fitted from the training set (always ≥ 1).
    #[must_use]
    pub fn max_prior_count(&self) -> u32 {
        self.encoder.max_prior_count()
    }
}


#[cfg(test)]
#[path = "tests_propensity_contract.rs"]
mod tests_contract;
