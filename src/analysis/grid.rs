//! Grid-wise Monte Carlo integration of the prevalence posterior.
//!
//! For each grid point theta the density is a Monte Carlo average over the
//! validation draws of the survey likelihood evaluated at
//! `p = u + theta * (v - u)`, rescaled by the per-draw Jacobian factor.
//! Grid points are mutually independent; the inner sum over draws is not,
//! because compensated summation is strictly sequential.

use statrs::distribution::{Beta, Continuous};

use crate::config::Request;
use crate::error::EstimateError;
use crate::result::Density;
use crate::statistics::{CompensatedSum, ValidationDraws};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Raw (un-normalized) density at one grid point.
///
/// Sequential by construction: each compensated addition feeds the next
/// compensation term, so this loop must not be split across threads.
fn density_at(theta: f64, likelihood: &Beta, draws: &ValidationDraws) -> f64 {
    let mut acc = CompensatedSum::new();
    for i in 0..draws.len() {
        let p = draws.u[i] + theta * (draws.v[i] - draws.u[i]);
        acc.add(likelihood.pdf(p) * draws.duv[i]);
    }
    acc.total()
}

/// Integrate the posterior over the grid and normalize it in place.
///
/// Fills `M + 1` grid points at theta = j / M (theta = 0 for the
/// single-point M = 0 grid), accumulates the compensated total across grid
/// points, and divides every entry by `total / (M + 1)` so the discrete
/// rectangle-rule integral is exactly 1.
///
/// Fails with [`EstimateError::IllPosedEstimate`] when the total is zero or
/// non-finite: there is no mass to normalize and every entry would become
/// NaN or Inf.
pub fn integrate(request: &Request, draws: &ValidationDraws) -> Result<Density, EstimateError> {
    let m = request.grid;
    let likelihood = Beta::new(request.k as f64 + 1.0, (request.n - request.k) as f64 + 1.0)
        .map_err(|e| EstimateError::InvalidInput {
            field: "n, k",
            constraint: e.to_string(),
        })?;

    let theta_of = |j: usize| {
        if m == 0 {
            0.0
        } else {
            j as f64 / m as f64
        }
    };

    #[cfg(feature = "parallel")]
    let mut values: Vec<f64> = (0..=m)
        .into_par_iter()
        .map(|j| density_at(theta_of(j), &likelihood, draws))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let mut values: Vec<f64> = (0..=m)
        .map(|j| density_at(theta_of(j), &likelihood, draws))
        .collect();

    let mut total_acc = CompensatedSum::new();
    for &value in &values {
        total_acc.add(value);
    }
    let total = total_acc.total();
    if total == 0.0 || !total.is_finite() {
        return Err(EstimateError::IllPosedEstimate { total });
    }

    let scale = total / (m as f64 + 1.0);
    for value in &mut values {
        *value /= scale;
    }

    Ok(Density::new(values))
}
