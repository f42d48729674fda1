use crate::optimal_range::OptimalRange;
use crate::statistics::Histogram;
use serde::{Deserialize, Serialize};

/// Aggregated outcome of a Monte-Carlo batch.
///
/// Field names on the wire follow the presentation layer's conventions
/// (`expectedPNL`, `pnlVsHODL`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Mean PNL across trials, in USD.
    #[serde(rename = "expectedPNL")]
    pub expected_pnl: f64,
    /// `expected_pnl / mean_hodl_value * 100`; 0 when the baseline is not positive.
    #[serde(rename = "pnlVsHODL")]
    pub pnl_vs_hodl: f64,
    /// 5th percentile PNL.
    pub percentile5: f64,
    /// 95th percentile PNL.
    pub percentile95: f64,
    /// Fraction of trials with a positive PNL.
    #[serde(rename = "probBeatHODL")]
    pub prob_beat_hodl: f64,
    /// Heuristic range suggestion.
    pub optimal_range: OptimalRange,
    /// 20-bucket PNL histogram.
    pub histogram: Histogram,
    /// Position value at the start of the horizon.
    pub initial_value: f64,
    /// Mean terminal value of the HODL baseline.
    pub mean_hodl_value: f64,
    /// Median PNL.
    pub median_pnl: f64,
    /// Lowest trial PNL.
    pub min_pnl: f64,
    /// Highest trial PNL.
    pub max_pnl: f64,
    /// Number of trials aggregated.
    pub simulations: usize,
}
