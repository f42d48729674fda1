//! Multi-step price path generators.
//!
//! The Monte-Carlo runner only needs terminal prices; these generators
//! produce whole trajectories for inspection and charting.

use crate::sampler::stream_seed;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

pub trait PricePathGenerator {
    /// Returns `steps + 1` prices, starting with the initial price.
    fn generate(&mut self, steps: usize) -> Vec<f64>;
}

pub struct GeometricBrownianMotion {
    pub initial_price: f64,
    pub drift: f64,      // annualized drift (mu)
    pub volatility: f64, // annualized volatility (sigma)
    pub time_step: f64,  // time step in years (dt) e.g. 1/365 for daily
    rng: StdRng,
}

impl GeometricBrownianMotion {
    /// Generator seeded from the thread-local RNG.
    pub fn new(initial_price: f64, drift: f64, volatility: f64, time_step: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            time_step,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible generator.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl PricePathGenerator for GeometricBrownianMotion {
    fn generate(&mut self, steps: usize) -> Vec<f64> {
        let mut prices = Vec::with_capacity(steps + 1);
        prices.push(self.initial_price);

        let dt = self.time_step;
        let drift_term = (self.drift - 0.5 * self.volatility.powi(2)) * dt;
        let vol_term = self.volatility * dt.sqrt();

        let mut current_price = self.initial_price;
        for _ in 0..steps {
            let z: f64 = self.rng.sample(StandardNormal);
            current_price *= (drift_term + vol_term * z).exp();
            prices.push(current_price);
        }

        prices
    }
}

/// Replays a fixed series.
pub struct DeterministicPricePath {
    pub prices: Vec<f64>,
}

impl PricePathGenerator for DeterministicPricePath {
    fn generate(&mut self, steps: usize) -> Vec<f64> {
        self.prices.iter().copied().take(steps + 1).collect()
    }
}

/// Generates `paths` trajectories of `steps` daily steps over `days` days.
///
/// Path `i` of a seeded fan draws from stream `i` of `seed`.
pub fn price_fan(
    initial_price: f64,
    volatility_pct: f64,
    days: u32,
    paths: usize,
    seed: Option<u64>,
) -> Vec<Vec<f64>> {
    let volatility = volatility_pct / 100.0;
    let dt = 1.0 / 365.0;
    (0..paths)
        .map(|i| {
            let gbm = GeometricBrownianMotion::new(initial_price, 0.0, volatility, dt);
            let mut gbm = match seed {
                Some(seed) => gbm.with_seed(stream_seed(seed, i as u64)),
                None => gbm,
            };
            gbm.generate(days as usize)
        })
        .collect()
}
