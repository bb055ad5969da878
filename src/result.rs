//! Posterior density output and summary statistics.

use serde::{Deserialize, Serialize};

use crate::statistics::CompensatedSum;

/// Discretized posterior density over prevalence.
///
/// Entry j is the density at theta = j / M on a uniform `M + 1`-point grid
/// spanning [0, 1], normalized so that `sum(values) / (M + 1) == 1` (the
/// rectangle-rule discrete integral is 1).
///
/// Summary statistics are derived by a cumulative-sum scan over the grid;
/// this is the full contract presentation layers rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Density {
    values: Vec<f64>,
}

impl Density {
    /// Wrap normalized grid values. Callers guarantee a non-empty array.
    pub(crate) fn new(values: Vec<f64>) -> Self {
        debug_assert!(!values.is_empty());
        Self { values }
    }

    /// Grid resolution M; the grid has M + 1 points.
    pub fn resolution(&self) -> usize {
        self.values.len() - 1
    }

    /// Density values, index j corresponding to theta = j / M.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterator over (theta, density) pairs.
    pub fn grid(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let m = self.resolution().max(1) as f64;
        self.values
            .iter()
            .enumerate()
            .map(move |(j, &d)| (j as f64 / m, d))
    }

    /// Posterior mean of theta.
    pub fn mean(&self) -> f64 {
        let m = self.resolution().max(1) as f64;
        let points = self.values.len() as f64;
        let mut acc = CompensatedSum::new();
        for (j, &d) in self.values.iter().enumerate() {
            acc.add(j as f64 / m * d);
        }
        acc.total() / points
    }

    /// Theta at the maximum density (posterior mode).
    ///
    /// Ties resolve to the smallest theta.
    pub fn mode(&self) -> f64 {
        let m = self.resolution().max(1) as f64;
        let mut best = 0;
        for (j, &d) in self.values.iter().enumerate() {
            if d > self.values[best] {
                best = j;
            }
        }
        best as f64 / m
    }

    /// Posterior median: theta at cumulative mass 0.5.
    pub fn median(&self) -> f64 {
        self.quantile(0.5)
    }

    /// Equal-tailed credible interval containing `mass` of the posterior.
    ///
    /// # Panics
    ///
    /// Panics if `mass` is not in (0, 1].
    pub fn credible_interval(&self, mass: f64) -> (f64, f64) {
        assert!(
            mass > 0.0 && mass <= 1.0,
            "credible mass must be in (0, 1]"
        );
        let tail = (1.0 - mass) / 2.0;
        (self.quantile(tail), self.quantile(1.0 - tail))
    }

    /// Theta at cumulative mass `q`, interpolated within the crossing step.
    fn quantile(&self, q: f64) -> f64 {
        let m = self.resolution().max(1) as f64;
        let points = self.values.len() as f64;

        let mut cumulative = 0.0;
        for (j, &d) in self.values.iter().enumerate() {
            let step = d / points;
            if cumulative + step >= q {
                let fraction = if step > 0.0 { (q - cumulative) / step } else { 0.0 };
                let theta = (j as f64 - 1.0 + fraction) / m;
                return theta.clamp(0.0, 1.0);
            }
            cumulative += step;
        }
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat() -> Density {
        Density::new(vec![1.0; 101])
    }

    #[test]
    fn resolution_is_len_minus_one() {
        assert_eq!(flat().resolution(), 100);
        assert_eq!(Density::new(vec![1.0]).resolution(), 0);
    }

    #[test]
    fn grid_spans_zero_to_one() {
        let density = flat();
        let points: Vec<(f64, f64)> = density.grid().collect();
        assert_eq!(points.len(), 101);
        assert_eq!(points[0].0, 0.0);
        assert_eq!(points[100].0, 1.0);
    }

    #[test]
    fn flat_density_summaries() {
        let density = flat();
        assert!((density.mean() - 0.5).abs() < 1e-12);
        assert!((density.median() - 0.5).abs() < 0.01);

        let (lo, hi) = density.credible_interval(0.9);
        assert!((lo - 0.05).abs() < 0.02, "lo = {lo}");
        assert!((hi - 0.95).abs() < 0.02, "hi = {hi}");
    }

    #[test]
    fn mode_finds_the_peak() {
        let mut values = vec![0.1; 101];
        values[30] = 5.0;
        let density = Density::new(values);
        assert!((density.mode() - 0.30).abs() < 1e-12);
    }

    #[test]
    fn full_mass_interval_covers_everything() {
        let (lo, hi) = flat().credible_interval(1.0);
        assert_eq!(lo, 0.0);
        assert!(hi > 0.99);
    }

    #[test]
    #[should_panic]
    fn zero_mass_interval_panics() {
        let _ = flat().credible_interval(0.0);
    }

    #[test]
    fn concentrated_density_has_tight_interval() {
        let mut values = vec![0.0; 101];
        // All mass in a narrow band around theta = 0.5.
        for j in 48..=52 {
            values[j] = 101.0 / 5.0;
        }
        let density = Density::new(values);
        let (lo, hi) = density.credible_interval(0.9);
        assert!(lo > 0.4 && hi < 0.6, "interval ({lo}, {hi})");
        assert!((density.median() - 0.5).abs() < 0.02);
    }
}
