//! Simulation-driven search over candidate tick ranges.
//!
//! Every candidate reuses the base parameters with only the range
//! replaced. A seeded base therefore scores all candidates against the
//! same random draws.

use crate::error::OptimizationError;
use crate::objective::ObjectiveFunction;
use lp_nexus_domain::tick_to_price;
use lp_nexus_simulation::{MonteCarloRunner, SimulationParams, SimulationResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A simulated candidate and its objective score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub tick_lower: i32,
    pub tick_upper: i32,
    /// Pool price at `tick_lower`.
    pub price_lower: f64,
    /// Pool price at `tick_upper`.
    pub price_upper: f64,
    pub score: f64,
    pub result: SimulationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub objective: String,
    /// Highest scoring candidate.
    pub best: RankedCandidate,
    /// All candidates, best first.
    pub ranked: Vec<RankedCandidate>,
}

pub struct RangeOptimizer;

impl RangeOptimizer {
    /// Simulates every candidate and ranks them by `objective`.
    ///
    /// Candidates with equal scores keep their input order.
    pub fn optimize<O: ObjectiveFunction + ?Sized>(
        base_params: &SimulationParams,
        candidates: &[(i32, i32)],
        objective: &O,
    ) -> Result<OptimizationResult, OptimizationError> {
        if candidates.is_empty() {
            return Err(OptimizationError::NoCandidates);
        }

        let mut ranked = Vec::with_capacity(candidates.len());
        for &(tick_lower, tick_upper) in candidates {
            let params = base_params.clone().with_range(tick_lower, tick_upper);
            let result = MonteCarloRunner::new(params).run()?;
            let score = objective.evaluate(&result);
            debug!(tick_lower, tick_upper, score, "Scored candidate range");
            ranked.push(RankedCandidate {
                tick_lower,
                tick_upper,
                price_lower: tick_to_price(tick_lower),
                price_upper: tick_to_price(tick_upper),
                score,
                result,
            });
        }

        ranked.sort_by(|a, b| objective.compare(&b.result, &a.result));
        let best = ranked[0].clone();
        info!(
            objective = objective.name(),
            candidates = ranked.len(),
            best_lower = best.tick_lower,
            best_upper = best.tick_upper,
            best_score = best.score,
            "Range optimization complete"
        );

        Ok(OptimizationResult {
            objective: objective.name().to_string(),
            best,
            ranked,
        })
    }

    /// Ranges of the given `widths` centred on the current range.
    ///
    /// Bounds are widened outward to multiples of `tick_spacing` (values
    /// below 1 are treated as 1). Widths that collapse to an empty range
    /// and duplicates are skipped.
    pub fn candidates_around(
        tick_lower: i32,
        tick_upper: i32,
        widths: &[u32],
        tick_spacing: i32,
    ) -> Vec<(i32, i32)> {
        let spacing = i64::from(tick_spacing.max(1));
        let center = (i64::from(tick_lower) + i64::from(tick_upper)).div_euclid(2);

        let mut candidates = Vec::with_capacity(widths.len());
        for &width in widths {
            let half = i64::from(width) / 2;
            let lower = (center - half).div_euclid(spacing) * spacing;
            let upper = -((-(center + half)).div_euclid(spacing)) * spacing;
            let (Ok(lower), Ok(upper)) = (i32::try_from(lower), i32::try_from(upper)) else {
                continue;
            };
            if lower < upper && !candidates.contains(&(lower, upper)) {
                candidates.push((lower, upper));
            }
        }
        candidates
    }
}
