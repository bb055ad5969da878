//! Posterior estimation pipeline.
//!
//! Two stages run in strict sequence:
//!
//! 1. **Validation sampling** ([`crate::statistics`]): Monte Carlo draws of
//!    the test's false-positive/true-positive rate pair under u < v
//! 2. **Grid integration** ([`grid`]): compensated Monte Carlo average of
//!    the transformed survey likelihood at each prevalence grid point

mod grid;
mod posterior;

pub use grid::integrate;
pub use posterior::posterior;
