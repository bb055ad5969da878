//! # seroprev
//!
//! Bayesian prevalence estimation from imperfect diagnostic test results.
//!
//! Given a field survey (`n` tested, `k` positive) and validation trials
//! characterizing the test itself (`n_u` known negatives with `k_u` false
//! positives, `n_v` known positives with `k_v` true positives), this crate
//! computes the posterior probability density of prevalence over a uniform
//! grid on [0, 1]. Sensitivity and specificity are not assumed known: their
//! posterior uncertainty is propagated by Monte Carlo sampling, with a
//! change-of-variables correction and compensated summation keeping the
//! tails of the density numerically honest.
//!
//! ## Quick Start
//!
//! ```
//! use seroprev::Request;
//!
//! // 100 subjects tested, 10 positive. The test produced 5 false positives
//! // on 500 known negatives and 480 true positives on 500 known positives.
//! let density = Request::new(100, 10, 500, 5, 500, 480)
//!     .samples(500)
//!     .grid(200)
//!     .seed(42)
//!     .posterior()
//!     .expect("valid request");
//!
//! let (lo, hi) = density.credible_interval(0.9);
//! assert!(lo < density.median() && density.median() < hi);
//! ```
//!
//! ## Failure modes
//!
//! The estimator never returns a partial density. Malformed counts fail
//! fast as [`EstimateError::InvalidInput`]; priors that make the ordering
//! constraint u < v unsatisfiable surface as
//! [`EstimateError::SamplingExhausted`]; inputs whose likelihood underflows
//! across the whole grid surface as [`EstimateError::IllPosedEstimate`].
//!
//! ## Parallelism
//!
//! Grid points are mutually independent, so the `parallel` cargo feature
//! fans the grid loop out across rayon workers. The inner compensated sums
//! stay sequential, and results are identical to the serial path.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod result;

// Functional modules
pub mod analysis;
pub mod statistics;

// Re-exports for public API
pub use analysis::posterior;
pub use config::Request;
pub use error::EstimateError;
pub use result::Density;
