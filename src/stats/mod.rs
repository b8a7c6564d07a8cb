//! Correlation and simple linear regression over paired numeric series.
//!
//! These primitives drive the monthly-aggregate analytics views: incident
//! counts against active-student counts, incident counts against mean
//! satisfaction, and so on. Both operate on plain slices and use only the
//! first `n = min(x.len(), y.len())` elements of each input, so callers
//! may pass series of unequal length after a keyed join.
//!
//! # Mathematical Background
//!
//! ## Pearson Correlation
//!
//! Normalized measure of linear association, range [-1, 1]:
//!
//! ```text
//! ρ(X, Y) = Σ (x_i - x̄)(y_i - ȳ) / sqrt(Σ (x_i - x̄)² · Σ (y_i - ȳ)²)
//! ```
//!
//! ## Ordinary Least Squares
//!
//! Closed-form simple linear regression `y ≈ a + b·x`:
//!
//! ```text
//! b = Σ (x_i - x̄)(y_i - ȳ) / Σ (x_i - x̄)²
//! a = ȳ - b·x̄
//! ```
//!
//! # Examples
//!
//! ```
//! use prever::stats::{linear_regression, pearson};
//!
//! let students = [420.0, 380.0, 510.0, 460.0];
//! let reports = [12.0, 9.0, 17.0, 14.0];
//!
//! let r = pearson(&students, &reports);
//! assert!(r > 0.9);
//!
//! let fit = linear_regression(&students, &reports);
//! assert!(fit.valid);
//! assert!(fit.slope > 0.0);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why a regression fit was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitDefect {
    /// Fewer than two paired observations.
    TooFewPoints,
    /// All x values are equal, so no slope can be estimated.
    ZeroXVariance,
}

/// Result of a simple linear regression fit.
///
/// When `valid` is false the intercept/slope pair is a degenerate flat fit
/// and must not be plotted or used for prediction; `defect` says why the
/// fit was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionFit {
    /// Intercept (`a` in `y = a + b·x`).
    pub intercept: f32,
    /// Slope (`b` in `y = a + b·x`).
    pub slope: f32,
    /// True when the fit is usable.
    pub valid: bool,
    /// Rejection reason, present exactly when `valid` is false.
    pub defect: Option<FitDefect>,
}

impl RegressionFit {
    /// Evaluates the fitted line at `x`.
    ///
    /// Callers should check `valid` first; on a degenerate fit this
    /// returns the flat-fit value (mean of y, or 0 with no data).
    #[must_use]
    pub fn predict(&self, x: f32) -> f32 {
        self.intercept + self.slope * x
    }
}

/// Computes the Pearson correlation coefficient over two numeric series.
///
/// Only the first `n = min(x.len(), y.len())` elements of each slice are
/// compared. Returns `f32::NAN` when `n < 2` or when either compared
/// prefix has zero variance; NaN is the non-throwing "undefined" sentinel
/// and callers are expected to render a "need more data" state for it.
///
/// # Examples
///
/// ```
/// use prever::stats::pearson;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let y = [2.0, 4.0, 6.0, 8.0];
/// assert!((pearson(&x, &y) - 1.0).abs() < 1e-6);
///
/// // Zero variance is undefined, not an error.
/// assert!(pearson(&[5.0, 5.0, 5.0], &y).is_nan());
/// ```
#[must_use]
pub fn pearson(x: &[f32], y: &[f32]) -> f32 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f32::NAN;
    }
    let (x, y) = (&x[..n], &y[..n]);

    let x_mean = x.iter().sum::<f32>() / n as f32;
    let y_mean = y.iter().sum::<f32>() / n as f32;

    let mut num = 0.0;
    let mut x_ss = 0.0;
    let mut y_ss = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let vx = xi - x_mean;
        let vy = yi - y_mean;
        num += vx * vy;
        x_ss += vx * vx;
        y_ss += vy * vy;
    }

    let den = (x_ss * y_ss).sqrt();
    if den == 0.0 {
        f32::NAN
    } else {
        num / den
    }
}

/// Fits `y ≈ intercept + slope·x` by ordinary least squares.
///
/// Only the first `n = min(x.len(), y.len())` elements of each slice are
/// used. With fewer than two observations the fit is `{0, 0}` and invalid;
/// with zero variance in x the fit is the flat line through the mean of y,
/// also marked invalid. Both degenerate cases keep `valid == false` (the
/// shape analytics callers branch on) and set [`RegressionFit::defect`] to
/// the discriminating reason.
///
/// # Examples
///
/// ```
/// use prever::stats::linear_regression;
///
/// // y = 3 + 2x
/// let x = [0.0, 1.0, 2.0, 3.0];
/// let y = [3.0, 5.0, 7.0, 9.0];
///
/// let fit = linear_regression(&x, &y);
/// assert!(fit.valid);
/// assert!((fit.intercept - 3.0).abs() < 1e-4);
/// assert!((fit.slope - 2.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn linear_regression(x: &[f32], y: &[f32]) -> RegressionFit {
    let n = x.len().min(y.len());
    if n < 2 {
        return RegressionFit {
            intercept: 0.0,
            slope: 0.0,
            valid: false,
            defect: Some(FitDefect::TooFewPoints),
        };
    }
    let (x, y) = (&x[..n], &y[..n]);

    let x_mean = x.iter().sum::<f32>() / n as f32;
    let y_mean = y.iter().sum::<f32>() / n as f32;

    let mut num = 0.0;
    let mut den = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let vx = xi - x_mean;
        num += vx * (yi - y_mean);
        den += vx * vx;
    }

    if den == 0.0 {
        return RegressionFit {
            intercept: y_mean,
            slope: 0.0,
            valid: false,
            defect: Some(FitDefect::ZeroXVariance),
        };
    }

    let slope = num / den;
    RegressionFit {
        intercept: y_mean - slope * x_mean,
        slope,
        valid: true,
        defect: None,
    }
}

/// Pairs two keyed series on their shared keys, ascending by key.
///
/// The analytics layer aggregates incidents per calendar month and then
/// correlates against another monthly series (active students, mean
/// satisfaction). This helper performs that join: only keys present in
/// both series contribute a pair, and within one series a duplicate key
/// keeps its last value.
///
/// # Examples
///
/// ```
/// use prever::stats::{align_by_key, pearson};
///
/// let reports = [("2025-01", 12.0), ("2025-02", 9.0), ("2025-03", 17.0)];
/// let students = [("2025-02", 380.0), ("2025-03", 510.0), ("2025-04", 455.0)];
///
/// let (xs, ys) = align_by_key(&reports, &students);
/// assert_eq!(xs, vec![9.0, 17.0]);
/// assert_eq!(ys, vec![380.0, 510.0]);
///
/// let r = pearson(&xs, &ys);
/// assert!((r - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn align_by_key<K: Ord + Clone>(left: &[(K, f32)], right: &[(K, f32)]) -> (Vec<f32>, Vec<f32>) {
    let left_map: BTreeMap<K, f32> = left.iter().cloned().collect();
    let right_map: BTreeMap<K, f32> = right.iter().cloned().collect();

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (key, &lv) in &left_map {
        if let Some(&rv) = right_map.get(key) {
            xs.push(lv);
            ys.push(rv);
        }
    }
    (xs, ys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_perfect_positive() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&x, &y) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pearson_too_few_points() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[], &[]).is_nan());
    }

    #[test]
    fn test_pearson_zero_variance() {
        assert!(pearson(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(pearson(&[1.0, 2.0, 3.0], &[7.0, 7.0, 7.0]).is_nan());
    }

    #[test]
    fn test_pearson_truncates_to_common_prefix() {
        // Extra trailing y values must not affect the result.
        let x = [1.0, 2.0, 3.0];
        let y_short = [2.0, 4.0, 6.0];
        let y_long = [2.0, 4.0, 6.0, 100.0, -50.0];
        assert_eq!(pearson(&x, &y_short), pearson(&x, &y_long));
    }

    #[test]
    fn test_pearson_in_range_for_noisy_data() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = [2.1, 3.9, 6.2, 8.3, 9.4, 12.8];
        let r = pearson(&x, &y);
        assert!(r > 0.9 && r <= 1.0);
    }

    #[test]
    fn test_linear_regression_exact_line() {
        // y = 3 + 2x
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [5.0, 7.0, 9.0, 11.0];
        let fit = linear_regression(&x, &y);
        assert!(fit.valid);
        assert!(fit.defect.is_none());
        assert!((fit.intercept - 3.0).abs() < 1e-4);
        assert!((fit.slope - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_linear_regression_too_few_points() {
        let fit = linear_regression(&[1.0], &[2.0]);
        assert!(!fit.valid);
        assert_eq!(fit.defect, Some(FitDefect::TooFewPoints));
        assert_eq!(fit.intercept, 0.0);
        assert_eq!(fit.slope, 0.0);
    }

    #[test]
    fn test_linear_regression_zero_x_variance() {
        let fit = linear_regression(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]);
        assert!(!fit.valid);
        assert_eq!(fit.defect, Some(FitDefect::ZeroXVariance));
        // Flat fit through the mean of y.
        assert!((fit.intercept - 2.0).abs() < 1e-6);
        assert_eq!(fit.slope, 0.0);
    }

    #[test]
    fn test_linear_regression_truncates_to_common_prefix() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [5.0, 7.0, 9.0, 11.0, 999.0];
        let fit = linear_regression(&x, &y);
        assert!(fit.valid);
        assert!((fit.slope - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_regression_fit_predict() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 3.0, 5.0]; // y = 1 + 2x
        let fit = linear_regression(&x, &y);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-3);
    }

    #[test]
    fn test_linear_regression_negative_slope() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [10.0, 8.0, 6.0, 4.0]; // y = 10 - 2x
        let fit = linear_regression(&x, &y);
        assert!(fit.valid);
        assert!((fit.slope + 2.0).abs() < 1e-4);
        assert!((fit.intercept - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_align_by_key_shared_keys_only() {
        let left = [("2025-01", 1.0), ("2025-02", 2.0), ("2025-03", 3.0)];
        let right = [("2025-02", 20.0), ("2025-03", 30.0), ("2025-04", 40.0)];
        let (xs, ys) = align_by_key(&left, &right);
        assert_eq!(xs, vec![2.0, 3.0]);
        assert_eq!(ys, vec![20.0, 30.0]);
    }

    #[test]
    fn test_align_by_key_orders_by_key() {
        let left = [("b", 2.0), ("a", 1.0), ("c", 3.0)];
        let right = [("c", 30.0), ("a", 10.0), ("b", 20.0)];
        let (xs, ys) = align_by_key(&left, &right);
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
        assert_eq!(ys, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_align_by_key_duplicate_key_last_wins() {
        let left = [("a", 1.0), ("a", 9.0)];
        let right = [("a", 10.0)];
        let (xs, ys) = align_by_key(&left, &right);
        assert_eq!(xs, vec![9.0]);
        assert_eq!(ys, vec![10.0]);
    }

    #[test]
    fn test_align_by_key_no_overlap() {
        let left = [("a", 1.0)];
        let right = [("b", 2.0)];
        let (xs, ys) = align_by_key(&left, &right);
        assert!(xs.is_empty());
        assert!(ys.is_empty());
    }

    #[test]
    fn test_fit_defect_serde_names() {
        let json = serde_json::to_string(&FitDefect::ZeroXVariance).expect("serializable");
        assert_eq!(json, "\"zero_x_variance\"");
    }
}

#[cfg(test)]
#[path = "tests_stats_contract.rs"]
mod tests_contract;
