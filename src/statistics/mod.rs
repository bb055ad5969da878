//! Statistical primitives for posterior estimation.
//!
//! This module provides the numerical infrastructure the estimator rests on:
//! - Neumaier compensated summation for long floating-point sums
//! - Bounded rejection sampling of validation-rate pairs
//! - Change-of-variables Jacobian precomputation

mod kahan;
mod sampling;

pub use kahan::CompensatedSum;
pub use sampling::{draw_validation_samples, sample_until, ValidationDraws};
