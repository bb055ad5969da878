//! Request configuration for posterior estimation.

use serde::{Deserialize, Serialize};

use crate::error::EstimateError;
use crate::result::Density;

/// Inputs for one prevalence estimation.
///
/// Counts come from two places: a field survey (`n` subjects tested, `k`
/// positive) and validation trials that characterize the test itself
/// (`n_u` known negatives of which `k_u` tested positive, `n_v` known
/// positives of which `k_v` tested positive). The remaining fields are
/// numerical-precision knobs and prior shapes, all with usable defaults.
///
/// Construct with [`Request::new`] and refine with the builder methods:
///
/// ```
/// use seroprev::Request;
///
/// let request = Request::new(100, 10, 500, 5, 500, 480)
///     .samples(2_000)
///     .grid(200)
///     .seed(42);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    // =========================================================================
    // Survey counts
    // =========================================================================
    /// Sampled population size.
    pub n: u64,
    /// Positive results observed in the sampled population. Must be <= `n`.
    pub k: u64,

    // =========================================================================
    // Validation-trial counts
    // =========================================================================
    /// Known-negative validation trial size.
    pub n_u: u64,
    /// False positives observed among the known negatives. Must be <= `n_u`.
    pub k_u: u64,
    /// Known-positive validation trial size.
    pub n_v: u64,
    /// True positives observed among the known positives. Must be <= `n_v`.
    pub k_v: u64,

    // =========================================================================
    // Numerical-precision knobs
    // =========================================================================
    /// Monte Carlo draws of (u, v) pairs. Default: 1,000.
    ///
    /// More draws reduce Monte Carlo noise in the density at O(N) cost per
    /// grid point.
    pub samples: usize,

    /// Grid resolution M. The output density has M + 1 points. Default: 1,000.
    ///
    /// M = 0 is permitted and produces a single-point grid at theta = 0.
    pub grid: usize,

    // =========================================================================
    // Prior shapes (Beta) for the validation rates
    // =========================================================================
    /// Prior shape alpha for the false-positive rate u. Default: 1 (uniform).
    pub a_u: f64,
    /// Prior shape beta for the false-positive rate u. Default: 1 (uniform).
    pub b_u: f64,
    /// Prior shape alpha for the true-positive rate v. Default: 1 (uniform).
    pub a_v: f64,
    /// Prior shape beta for the true-positive rate v. Default: 1 (uniform).
    pub b_v: f64,

    // =========================================================================
    // Presentation and reproducibility
    // =========================================================================
    /// Population weight for display scaling. Default: 1.
    ///
    /// Carried through for presentation layers that scale axes by population
    /// size; never affects the shape of the density.
    pub weight: f64,

    /// Deterministic seed for the Monte Carlo draws.
    ///
    /// When set, identical requests produce bit-identical densities.
    /// Default: None (entropy-seeded).
    pub seed: Option<u64>,

    /// Attempt bound for the u < v rejection loop, per draw. Default: 10,000.
    ///
    /// Priors that put almost all mass on u >= v would otherwise loop
    /// forever; hitting the bound fails the estimate with
    /// [`EstimateError::SamplingExhausted`].
    pub max_attempts: usize,
}

impl Request {
    /// Create a request from survey and validation counts, with default knobs.
    pub fn new(n: u64, k: u64, n_u: u64, k_u: u64, n_v: u64, k_v: u64) -> Self {
        Self {
            n,
            k,
            n_u,
            k_u,
            n_v,
            k_v,
            samples: 1_000,
            grid: 1_000,
            a_u: 1.0,
            b_u: 1.0,
            a_v: 1.0,
            b_v: 1.0,
            weight: 1.0,
            seed: None,
            max_attempts: 10_000,
        }
    }

    /// Coarsen to a quick preset (N = M = 200) for rapid iteration.
    pub fn quick(self) -> Self {
        Self {
            samples: 200,
            grid: 200,
            ..self
        }
    }

    /// Refine to a thorough preset (N = M = 4,000) for final results.
    pub fn thorough(self) -> Self {
        Self {
            samples: 4_000,
            grid: 4_000,
            ..self
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the Monte Carlo draw count.
    pub fn samples(mut self, samples: usize) -> Self {
        assert!(samples > 0, "samples must be positive");
        self.samples = samples;
        self
    }

    /// Set the grid resolution M (output has M + 1 points).
    pub fn grid(mut self, grid: usize) -> Self {
        self.grid = grid;
        self
    }

    /// Set the Beta prior shapes for the false-positive rate u.
    pub fn false_positive_prior(mut self, a: f64, b: f64) -> Self {
        assert!(
            a > 0.0 && a.is_finite() && b > 0.0 && b.is_finite(),
            "prior shapes must be finite and positive"
        );
        self.a_u = a;
        self.b_u = b;
        self
    }

    /// Set the Beta prior shapes for the true-positive rate v.
    pub fn true_positive_prior(mut self, a: f64, b: f64) -> Self {
        assert!(
            a > 0.0 && a.is_finite() && b > 0.0 && b.is_finite(),
            "prior shapes must be finite and positive"
        );
        self.a_v = a;
        self.b_v = b;
        self
    }

    /// Set the display weight.
    pub fn weight(mut self, weight: f64) -> Self {
        assert!(
            weight > 0.0 && weight.is_finite(),
            "weight must be finite and positive"
        );
        self.weight = weight;
        self
    }

    /// Set a deterministic seed for the Monte Carlo draws.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the rejection-loop attempt bound.
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        assert!(max_attempts > 0, "max_attempts must be positive");
        self.max_attempts = max_attempts;
        self
    }

    // =========================================================================
    // Validation and estimation
    // =========================================================================

    /// Check every field against its documented constraint.
    ///
    /// Returns the first violation as [`EstimateError::InvalidInput`].
    pub fn validate(&self) -> Result<(), EstimateError> {
        fn invalid(field: &'static str, constraint: &str) -> EstimateError {
            EstimateError::InvalidInput {
                field,
                constraint: constraint.to_string(),
            }
        }

        if self.k > self.n {
            return Err(invalid("k", "k must be <= n"));
        }
        if self.k_u > self.n_u {
            return Err(invalid("k_u", "k_u must be <= n_u"));
        }
        if self.k_v > self.n_v {
            return Err(invalid("k_v", "k_v must be <= n_v"));
        }
        if self.samples == 0 {
            return Err(invalid("samples", "samples must be positive"));
        }
        if self.max_attempts == 0 {
            return Err(invalid("max_attempts", "max_attempts must be positive"));
        }
        for (field, value) in [
            ("a_u", self.a_u),
            ("b_u", self.b_u),
            ("a_v", self.a_v),
            ("b_v", self.b_v),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, "prior shapes must be finite and positive"));
            }
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(invalid("weight", "weight must be finite and positive"));
        }
        Ok(())
    }

    /// Compute the posterior prevalence density for this request.
    ///
    /// Convenience wrapper around [`posterior`](crate::posterior).
    pub fn posterior(&self) -> Result<Density, EstimateError> {
        crate::analysis::posterior(self)
    }
}
