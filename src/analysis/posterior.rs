//! Posterior estimation entry point.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::analysis::grid;
use crate::config::Request;
use crate::error::EstimateError;
use crate::result::Density;
use crate::statistics::draw_validation_samples;

/// Compute the posterior prevalence density for one request.
///
/// Two stages run in sequence:
///
/// 1. **Validation sampling** — draw `samples` (u, v) rate pairs from their
///    Beta posteriors under the ordering constraint u < v, with the
///    change-of-variables Jacobian factor per draw.
/// 2. **Grid integration** — for each of `grid + 1` prevalence values,
///    average the transformed survey likelihood over all draws with
///    compensated summation, then normalize.
///
/// The estimate is a pure function of the request and its seed: identical
/// requests with the same seed produce bit-identical densities. With
/// `seed: None` the RNG is entropy-seeded.
///
/// # Errors
///
/// - [`EstimateError::InvalidInput`] for counts or priors violating their
///   documented constraints (checked before any sampling).
/// - [`EstimateError::SamplingExhausted`] when the rejection loop cannot
///   find u < v within the attempt bound.
/// - [`EstimateError::IllPosedEstimate`] when the un-normalized density has
///   no mass to normalize.
pub fn posterior(request: &Request) -> Result<Density, EstimateError> {
    request.validate()?;

    let seed = request.seed.unwrap_or_else(rand::random);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    let draws = draw_validation_samples(request, &mut rng)?;
    grid::integrate(request, &draws)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_runs_before_sampling() {
        // k > n must fail fast as InvalidInput, never as a sampling error.
        let request = Request::new(10, 11, 10, 0, 10, 10).seed(42);
        match posterior(&request) {
            Err(EstimateError::InvalidInput { field, .. }) => assert_eq!(field, "k"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn entropy_seeded_requests_still_normalize() {
        // No seed: output varies run to run, but the contract holds.
        let request = Request::new(50, 10, 100, 2, 100, 95).quick();
        let density = posterior(&request).expect("well-posed");
        let sum: f64 = density.values().iter().sum();
        let avg = sum / density.values().len() as f64;
        assert!((avg - 1.0).abs() < 1e-9);
    }
}
