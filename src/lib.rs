//! Prever: statistical modeling core for incident-report analytics.
//!
//! Prever implements the numeric half of the SGIU analytics views: Pearson
//! correlation and simple linear regression over monthly aggregates, and a
//! logistic category-propensity model (feature encoding, deterministic
//! batch gradient-descent training, probability prediction) over
//! historical incident rows. It consumes plain numeric slices and domain
//! rows and returns plain numeric results; fetching data and rendering
//! charts live elsewhere.
//!
//! # Quick Start
//!
//! ```
//! use prever::prelude::*;
//!
//! // Monthly pairs: active students vs reports filed.
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
//!
//! # Modules
//!
//! - [`stats`]: Pearson correlation, OLS simple regression, keyed-series
//!   alignment
//! - [`encoding`]: Incident categories, labeled rows, and the fitted
//!   feature encoder
//! - [`classification`]: Logistic trainer and the trained
//!   category-propensity model
//! - [`error`]: Error types
//!
//! All computation is synchronous, pure, and deterministic: no I/O, no
//! shared state, no randomness. Independent callers may train models
//! concurrently without coordination because each `fit` call owns its row
//! snapshot, weights, and normalizer exclusively.

pub mod classification;
pub mod encoding;
pub mod error;
pub mod prelude;
pub mod stats;

pub use error::{PreverError, Result};
