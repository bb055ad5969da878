//! Validation-trial sampling for test-performance uncertainty.
//!
//! The test's false-positive rate u and true-positive rate v are unknown;
//! their posteriors given the validation trials are Beta distributions.
//! This module draws (u, v) pairs from those posteriors subject to u < v,
//! and precomputes the change-of-variables Jacobian factor consumed by the
//! grid integrator.

use rand::Rng;
use rand_distr::Distribution;
use statrs::function::beta::beta_reg;

use crate::config::Request;
use crate::error::EstimateError;

/// One batch of validation draws, held as parallel arrays of equal length.
///
/// Invariant: `0 <= u[i] < v[i] <= 1` for every i, enforced by rejection
/// sampling. Produced once per estimation, read immutably by the grid
/// integrator, dropped afterwards.
#[derive(Debug, Clone)]
pub struct ValidationDraws {
    /// Sampled false-positive rates.
    pub u: Vec<f64>,
    /// Sampled true-positive rates.
    pub v: Vec<f64>,
    /// Per-draw Jacobian scale factors, zero for degenerate draws.
    pub duv: Vec<f64>,
}

impl ValidationDraws {
    /// Number of draws in the batch.
    pub fn len(&self) -> usize {
        self.u.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }
}

/// Draw candidates until `accept` holds, giving up after `max_attempts`.
///
/// Bounded-retry combinator for rejection sampling: the caller decides what
/// exhaustion means. Returns `None` when no candidate was accepted.
pub fn sample_until<T>(
    max_attempts: usize,
    mut draw: impl FnMut() -> T,
    accept: impl Fn(&T) -> bool,
) -> Option<T> {
    for _ in 0..max_attempts {
        let candidate = draw();
        if accept(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Produce `request.samples` validation draws from the given RNG.
///
/// Callers are expected to run [`Request::validate`] first (as
/// [`posterior`](crate::posterior) does); the count arithmetic below assumes
/// `k <= n` for all three count pairs.
///
/// Per draw i:
///
/// 1. Rejection-sample `u ~ Beta(k_u + a_u, n_u - k_u + b_u)` and
///    `v ~ Beta(k_v + a_v, n_v - k_v + b_v)` until u < v, bounded by
///    `request.max_attempts`.
/// 2. Evaluate `Bu = I_{1-u}(n-k+1, k+1)` and `Bv = I_{1-v}(n-k+1, k+1)`.
///    The complementary form (identity `I_x(a,b) = 1 - I_{1-x}(b,a)`) keeps
///    precision when k/n is large and both rates sit near 1; the direct
///    `I_u(k+1, n-k+1)` evaluation cancels catastrophically exactly there.
/// 3. `duv = (v - u) / (Bu - Bv)`, the reciprocal derivative of the map
///    between the interpolation parameter theta and the cumulative
///    coordinate. When `Bu - Bv` underflows to zero the factor is set to
///    zero, so the degenerate draw contributes nothing to the integral
///    instead of injecting Inf.
pub fn draw_validation_samples<R: Rng>(
    request: &Request,
    rng: &mut R,
) -> Result<ValidationDraws, EstimateError> {
    let false_positive = beta_posterior(request.k_u, request.n_u, request.a_u, request.b_u)
        .map_err(|constraint| EstimateError::InvalidInput {
            field: "n_u, k_u, a_u, b_u",
            constraint,
        })?;
    let true_positive = beta_posterior(request.k_v, request.n_v, request.a_v, request.b_v)
        .map_err(|constraint| EstimateError::InvalidInput {
            field: "n_v, k_v, a_v, b_v",
            constraint,
        })?;

    // Shape arguments for the complementary incomplete-beta evaluation.
    let a = (request.n - request.k) as f64 + 1.0;
    let b = request.k as f64 + 1.0;

    let count = request.samples;
    let mut u = Vec::with_capacity(count);
    let mut v = Vec::with_capacity(count);
    let mut duv = Vec::with_capacity(count);

    for i in 0..count {
        let (ui, vi) = sample_until(
            request.max_attempts,
            || {
                (
                    false_positive.sample(&mut *rng),
                    true_positive.sample(&mut *rng),
                )
            },
            |&(ui, vi)| ui < vi,
        )
        .ok_or(EstimateError::SamplingExhausted {
            sample: i,
            attempts: request.max_attempts,
        })?;

        let bu = beta_reg(a, b, 1.0 - ui);
        let bv = beta_reg(a, b, 1.0 - vi);

        let jacobian = (vi - ui) / (bu - bv);
        duv.push(if jacobian.is_finite() { jacobian } else { 0.0 });
        u.push(ui);
        v.push(vi);
    }

    Ok(ValidationDraws { u, v, duv })
}

/// Beta posterior for a rate given `hits` out of `trials` and a Beta(a, b) prior.
fn beta_posterior(
    hits: u64,
    trials: u64,
    a: f64,
    b: f64,
) -> Result<rand_distr::Beta<f64>, String> {
    rand_distr::Beta::new(hits as f64 + a, (trials - hits) as f64 + b)
        .map_err(|e| e.to_string())
}
