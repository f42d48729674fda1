//! Monte-Carlo projection of position outcomes.
//!
//! Each trial draws correlated terminal prices for both assets, revalues
//! the position and a 50/50 HODL baseline at those prices, adds a
//! stochastic fee accrual and records the PNL. Trials share no state.

use crate::error::SimulationError;
use crate::optimal_range::find_optimal_range;
use crate::params::SimulationParams;
use crate::result::SimulationResult;
use crate::sampler::{CorrelatedGbm, stream_seed};
use crate::statistics::{Histogram, mean, percentile_of_sorted, sort_samples};
use lp_nexus_domain::math::concentrated_liquidity::value_at_sqrt_range;
use lp_nexus_domain::math::price_tick::tick_to_sqrt_price;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// PNL and baseline value of a single trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    /// Position value + fees - initial value.
    pub pnl: f64,
    /// Terminal HODL baseline value.
    pub hodl_value: f64,
}

/// Quantities shared by every trial of a batch.
#[derive(Debug, Clone, Copy)]
struct TrialContext {
    liquidity: f64,
    sqrt_lower: f64,
    sqrt_upper: f64,
    price0: f64,
    price1: f64,
    initial_value: f64,
    base_fees: f64,
    gbm: CorrelatedGbm,
}

impl TrialContext {
    fn new(params: &SimulationParams) -> Self {
        let sqrt_lower = tick_to_sqrt_price(params.tick_lower);
        let sqrt_upper = tick_to_sqrt_price(params.tick_upper);
        let liquidity = params.scaled_liquidity();
        let price0 = params.current_price0;
        let price1 = params.current_price1;
        let dt = params.year_fraction();

        let initial_value = value_at_sqrt_range(
            liquidity,
            (price0 / price1).sqrt(),
            sqrt_lower,
            sqrt_upper,
            price0,
            price1,
        )
        .total_usd;

        Self {
            liquidity,
            sqrt_lower,
            sqrt_upper,
            price0,
            price1,
            initial_value,
            base_fees: initial_value * (params.fee_tier_pct / 100.0) * dt,
            gbm: CorrelatedGbm::new(params.volatility(), dt, params.correlation),
        }
    }

    fn run_trial<R: Rng>(&self, rng: &mut R) -> TrialOutcome {
        let (price0_future, price1_future) = self.gbm.sample(rng, self.price0, self.price1);

        let position_value = value_at_sqrt_range(
            self.liquidity,
            (price0_future / price1_future).sqrt(),
            self.sqrt_lower,
            self.sqrt_upper,
            price0_future,
            price1_future,
        )
        .total_usd;

        let hodl_value = 0.5 * self.initial_value * (price0_future / self.price0)
            + 0.5 * self.initial_value * (price1_future / self.price1);

        let fees = self.base_fees * (1.0 + 0.5 * rng.random::<f64>());

        TrialOutcome {
            pnl: position_value + fees - self.initial_value,
            hodl_value,
        }
    }
}

/// Generator for trial `index` in reproducibility mode.
fn trial_rng(seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(stream_seed(seed, index as u64))
}

/// Runs Monte-Carlo batches for a parameter set.
#[derive(Debug, Clone)]
pub struct MonteCarloRunner {
    /// Batch parameters.
    pub params: SimulationParams,
    cancel: Option<Arc<AtomicBool>>,
}

impl MonteCarloRunner {
    /// Creates a runner.
    #[must_use]
    pub fn new(params: SimulationParams) -> Self {
        Self {
            params,
            cancel: None,
        }
    }

    /// Aborts the batch between trials once `flag` is set.
    #[must_use]
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Validates the parameters and runs the batch.
    pub fn run(&self) -> Result<SimulationResult, SimulationError> {
        self.params.validate()?;
        self.run_unchecked()
    }

    /// Runs the batch without validating the parameters.
    ///
    /// Degenerate inputs (zero volatility, inverted ranges) propagate into
    /// the numbers instead of failing. Only cancellation is reported.
    pub fn run_unchecked(&self) -> Result<SimulationResult, SimulationError> {
        let ctx = TrialContext::new(&self.params);
        debug!(
            simulations = self.params.simulations,
            volatility_pct = self.params.volatility_pct,
            time_days = self.params.time_days,
            correlation = self.params.correlation,
            seed = ?self.params.seed,
            initial_value = ctx.initial_value,
            "Starting Monte-Carlo batch"
        );

        let total = self.params.simulations;
        let outcomes = self.execute_trials(&ctx);
        if outcomes.len() < total {
            warn!(completed = outcomes.len(), total, "Monte-Carlo batch cancelled");
            return Err(SimulationError::Cancelled {
                completed: outcomes.len(),
                total,
            });
        }

        let result = self.aggregate(&ctx, outcomes);
        info!(
            simulations = result.simulations,
            expected_pnl = result.expected_pnl,
            prob_beat_hodl = result.prob_beat_hodl,
            "Monte-Carlo batch complete"
        );
        Ok(result)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    #[cfg(not(feature = "parallel"))]
    fn execute_trials(&self, ctx: &TrialContext) -> Vec<TrialOutcome> {
        let total = self.params.simulations;
        let mut outcomes = Vec::with_capacity(total);
        let mut rng = rand::rng();

        for index in 0..total {
            if self.is_cancelled() {
                break;
            }
            let outcome = match self.params.seed {
                Some(seed) => ctx.run_trial(&mut trial_rng(seed, index)),
                None => ctx.run_trial(&mut rng),
            };
            outcomes.push(outcome);
        }

        outcomes
    }

    #[cfg(feature = "parallel")]
    fn execute_trials(&self, ctx: &TrialContext) -> Vec<TrialOutcome> {
        (0..self.params.simulations)
            .into_par_iter()
            .filter_map(|index| {
                if self.is_cancelled() {
                    return None;
                }
                Some(match self.params.seed {
                    Some(seed) => ctx.run_trial(&mut trial_rng(seed, index)),
                    None => ctx.run_trial(&mut rand::rng()),
                })
            })
            .collect()
    }

    fn aggregate(&self, ctx: &TrialContext, outcomes: Vec<TrialOutcome>) -> SimulationResult {
        let count = outcomes.len();
        let hodl_values: Vec<f64> = outcomes.iter().map(|o| o.hodl_value).collect();
        let mut pnls: Vec<f64> = outcomes.iter().map(|o| o.pnl).collect();

        let expected_pnl = mean(&pnls);
        let mean_hodl_value = mean(&hodl_values);
        let pnl_vs_hodl = if mean_hodl_value > 0.0 {
            expected_pnl / mean_hodl_value * 100.0
        } else {
            warn!(mean_hodl_value, "Non-positive HODL baseline, reporting 0 vs HODL");
            0.0
        };

        sort_samples(&mut pnls);
        let min_pnl = pnls.first().copied().unwrap_or(0.0);
        let max_pnl = pnls.last().copied().unwrap_or(0.0);
        let winners = pnls.iter().filter(|&&pnl| pnl > 0.0).count();
        let prob_beat_hodl = if count == 0 {
            0.0
        } else {
            winners as f64 / count as f64
        };

        SimulationResult {
            expected_pnl,
            pnl_vs_hodl,
            percentile5: percentile_of_sorted(&pnls, 0.05).unwrap_or(0.0),
            percentile95: percentile_of_sorted(&pnls, 0.95).unwrap_or(0.0),
            prob_beat_hodl,
            optimal_range: find_optimal_range(
                self.params.tick_lower,
                self.params.tick_upper,
                self.params.volatility_pct,
                self.params.fee_tier_pct,
            ),
            histogram: Histogram::from_samples(&pnls, min_pnl, max_pnl),
            initial_value: ctx.initial_value,
            mean_hodl_value,
            median_pnl: percentile_of_sorted(&pnls, 0.5).unwrap_or(0.0),
            min_pnl,
            max_pnl,
            simulations: count,
        }
    }
}

/// Validates `params` and runs one batch.
pub fn run_monte_carlo(params: &SimulationParams) -> Result<SimulationResult, SimulationError> {
    MonteCarloRunner::new(params.clone()).run()
}
