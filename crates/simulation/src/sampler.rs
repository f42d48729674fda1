//! Random draws for the Monte-Carlo trials: Box–Muller normals, correlated
//! shocks and terminal GBM prices.

use rand::Rng;
use rand::distr::OpenClosed01;
use std::f64::consts::PI;

/// Draws two independent standard normals with the Box–Muller transform.
///
/// `u1` is taken from `(0, 1]` so that `ln(u1)` is always finite.
pub fn box_muller<R: Rng>(rng: &mut R) -> (f64, f64) {
    let u1: f64 = rng.sample(OpenClosed01);
    let u2: f64 = rng.random();
    let radius = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * PI * u2;
    (radius * theta.cos(), radius * theta.sin())
}

/// Seed for stream `index` of a batch seeded with `seed`.
///
/// The index is spread by the 64-bit golden ratio before mixing, so
/// batches with nearby seeds draw disjoint streams.
pub fn stream_seed(seed: u64, index: u64) -> u64 {
    seed ^ index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Correlates `z2` to `z1`: `rho * z1 + sqrt(1 - rho^2) * z2`.
pub fn correlate(z1: f64, z2: f64, rho: f64) -> f64 {
    rho * z1 + (1.0 - rho * rho).sqrt() * z2
}

/// Zero-drift geometric Brownian motion over a single horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GbmHorizon {
    drift_term: f64,
    diffusion: f64,
}

impl GbmHorizon {
    /// `volatility` is annualized (decimal), `dt` the horizon in years.
    #[must_use]
    pub fn new(volatility: f64, dt: f64) -> Self {
        Self {
            drift_term: -0.5 * volatility * volatility * dt,
            diffusion: volatility * dt.sqrt(),
        }
    }

    /// `price * exp(-0.5 sigma^2 dt + sigma sqrt(dt) z)`.
    #[must_use]
    pub fn evolve(&self, price: f64, z: f64) -> f64 {
        price * (self.drift_term + self.diffusion * z).exp()
    }
}

/// Terminal prices of two correlated assets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelatedGbm {
    horizon: GbmHorizon,
    correlation: f64,
}

impl CorrelatedGbm {
    /// Both assets share volatility and horizon.
    #[must_use]
    pub fn new(volatility: f64, dt: f64, correlation: f64) -> Self {
        Self {
            horizon: GbmHorizon::new(volatility, dt),
            correlation,
        }
    }

    /// Draws terminal prices for `(price0, price1)`.
    pub fn sample<R: Rng>(&self, rng: &mut R, price0: f64, price1: f64) -> (f64, f64) {
        let (z1, z2) = box_muller(rng);
        let z2_corr = correlate(z1, z2, self.correlation);
        (
            self.horizon.evolve(price0, z1),
            self.horizon.evolve(price1, z2_corr),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_box_muller_moments() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 100_000;
        let (mut sum, mut sum_sq, mut cross) = (0.0, 0.0, 0.0);
        for _ in 0..n {
            let (a, b) = box_muller(&mut rng);
            assert!(a.is_finite() && b.is_finite());
            sum += a + b;
            sum_sq += a * a + b * b;
            cross += a * b;
        }
        let count = 2.0 * n as f64;
        assert!((sum / count).abs() < 0.02);
        assert!((sum_sq / count - 1.0).abs() < 0.02);
        assert!((cross / n as f64).abs() < 0.02);
    }

    #[test]
    fn test_correlation_is_applied() {
        let mut rng = StdRng::seed_from_u64(5);
        let n = 50_000;
        let rho = 0.65;
        let mut cross = 0.0;
        for _ in 0..n {
            let (z1, z2) = box_muller(&mut rng);
            cross += z1 * correlate(z1, z2, rho);
        }
        assert!((cross / n as f64 - rho).abs() < 0.03);
    }

    #[test]
    fn test_stream_seeds_do_not_overlap_between_nearby_batches() {
        let a: std::collections::HashSet<u64> = (0..10_000).map(|i| stream_seed(42, i)).collect();
        assert_eq!(a.len(), 10_000);
        for seed in [41, 43, 44] {
            assert!((0..10_000).all(|i| !a.contains(&stream_seed(seed, i))));
        }
    }

    #[test]
    fn test_perfect_correlation_copies_shock() {
        assert_eq!(correlate(1.25, -3.0, 1.0), 1.25);
        assert_eq!(correlate(1.25, -3.0, -1.0), -1.25);
        assert_eq!(correlate(1.25, -3.0, 0.0), -3.0);
    }

    #[test]
    fn test_zero_volatility_keeps_price() {
        let horizon = GbmHorizon::new(0.0, 30.0 / 365.0);
        assert_eq!(horizon.evolve(3_420.0, 2.5), 3_420.0);
        assert_eq!(horizon.evolve(3_420.0, -4.0), 3_420.0);
    }

    #[test]
    fn test_gbm_is_a_martingale() {
        let gbm = CorrelatedGbm::new(0.45, 30.0 / 365.0, 0.65);
        let mut rng = StdRng::seed_from_u64(99);
        let n = 100_000;
        let (mut sum0, mut sum1) = (0.0, 0.0);
        for _ in 0..n {
            let (p0, p1) = gbm.sample(&mut rng, 100.0, 1.0);
            assert!(p0 > 0.0 && p1 > 0.0);
            sum0 += p0;
            sum1 += p1;
        }
        assert!((sum0 / n as f64 - 100.0).abs() < 0.5);
        assert!((sum1 / n as f64 - 1.0).abs() < 0.005);
    }
}
