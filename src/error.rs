//! Error types for posterior estimation.

use std::fmt;

/// Error returned when a posterior estimate cannot be produced.
///
/// Every failure surfaces before a density is returned; a partially
/// computed density never escapes the estimator. Retrying only makes
/// sense for [`SamplingExhausted`](EstimateError::SamplingExhausted),
/// where a fresh set of draws may succeed.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// An input field violates its documented constraint.
    ///
    /// Raised by [`Request::validate`](crate::Request::validate) before any
    /// sampling begins, so malformed counts fail fast instead of propagating
    /// NaN through the integral.
    InvalidInput {
        /// Name of the offending field(s).
        field: &'static str,
        /// The constraint that was violated.
        constraint: String,
    },

    /// The rejection loop failed to find `u < v` within the attempt bound.
    ///
    /// Occurs when the validation-trial posteriors place almost all mass on
    /// `u >= v`, i.e. the priors claim the test flags known negatives more
    /// often than known positives. The bound (default 10,000 attempts per
    /// draw) keeps pathological inputs from looping forever.
    SamplingExhausted {
        /// Zero-based index of the draw that could not be produced.
        sample: usize,
        /// Attempt bound that was exhausted.
        attempts: usize,
    },

    /// The normalization total was zero or non-finite.
    ///
    /// Happens when the likelihood underflows to zero across the entire
    /// grid (or every Jacobian factor degenerated), leaving no mass to
    /// normalize. The density is undefined in this regime.
    IllPosedEstimate {
        /// The offending un-normalized total.
        total: f64,
    },
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { field, constraint } => {
                write!(f, "invalid input `{field}`: {constraint}")
            }
            Self::SamplingExhausted { sample, attempts } => write!(
                f,
                "rejection sampling exhausted {attempts} attempts at draw {sample} \
                 without finding u < v"
            ),
            Self::IllPosedEstimate { total } => write!(
                f,
                "posterior is ill-posed: un-normalized total is {total}"
            ),
        }
    }
}

impl std::error::Error for EstimateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_field() {
        let err = EstimateError::InvalidInput {
            field: "k",
            constraint: "k must be <= n".to_string(),
        };
        assert!(err.to_string().contains("`k`"));
        assert!(err.to_string().contains("k must be <= n"));
    }

    #[test]
    fn display_reports_attempt_bound() {
        let err = EstimateError::SamplingExhausted {
            sample: 3,
            attempts: 10_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("10000"));
        assert!(msg.contains("draw 3"));
    }
}
