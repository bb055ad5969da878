//! Neumaier compensated summation.
//!
//! The grid integrator adds up to millions of beta-density terms of wildly
//! different magnitude. A plain accumulator loses the tail of the posterior
//! to rounding, which shifts credible-interval endpoints; the compensated
//! form tracks the rounding error of each addition and folds it back into
//! the total.

/// Running sum with Neumaier error compensation.
///
/// Unlike classic Kahan summation, the Neumaier variant also compensates
/// when the incoming term is larger in magnitude than the running sum, so
/// sequences like `1.0 + 1e100 - 1e100` still recover the small term.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    /// Create an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one term, folding its rounding error into the compensation register.
    #[inline]
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    /// The compensated total.
    #[inline]
    pub fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}
