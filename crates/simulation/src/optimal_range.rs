//! Heuristic range suggestion.
//!
//! Scans candidate ranges of the same width around the current one and
//! scores them with `fee_tier * 365 * tightness_bonus * vol_penalty`. The
//! score is an ad hoc heuristic, not a fee-income model; treat the
//! suggestion and its APR as approximate.

use serde::{Deserialize, Serialize};

/// Half-width of the offset window scanned around the current range, in ticks.
pub const SEARCH_WINDOW: i64 = 500;
/// Furthest the candidate lower tick may move below the current one.
pub const MAX_LOWER_SHIFT: f64 = 2_000.0;

/// Suggested range and its heuristic annual yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalRange {
    /// Suggested lower tick.
    pub lower: i32,
    /// Suggested upper tick.
    pub upper: i32,
    /// Heuristic APR in percent.
    #[serde(rename = "expectedAPR")]
    pub expected_apr: f64,
}

/// Heuristic score of a candidate at `offset` ticks from the current range.
pub fn score_candidate(offset: i64, volatility_pct: f64, fee_tier_pct: f64) -> f64 {
    let tightness_bonus = 1.0 + (MAX_LOWER_SHIFT - offset.abs() as f64) / MAX_LOWER_SHIFT * 0.3;
    let vol_penalty = 1.0 - volatility_pct / 200.0;
    fee_tier_pct * 365.0 * tightness_bonus * vol_penalty
}

/// Bounded left-to-right search for the best-scoring range.
///
/// Offsets run from -500 to +500 ticks with a step of
/// `max(10, range_width / 20)`. Only a strictly better score replaces the
/// incumbent, so the first best candidate wins. When nothing scores above
/// zero (volatility at or above 200 %, or a zero fee tier) the input
/// range is returned with an APR of 0.
pub fn find_optimal_range(
    tick_lower: i32,
    tick_upper: i32,
    volatility_pct: f64,
    fee_tier_pct: f64,
) -> OptimalRange {
    let range_size = i64::from(tick_upper) - i64::from(tick_lower);
    let step = (range_size.div_euclid(20)).max(10);
    let half_range = range_size as f64 / 2.0;
    let lower = f64::from(tick_lower);

    let mut best = OptimalRange {
        lower: tick_lower,
        upper: tick_upper,
        expected_apr: 0.0,
    };

    let mut offset = -SEARCH_WINDOW;
    while offset <= SEARCH_WINDOW {
        let test_lower = (lower - MAX_LOWER_SHIFT).max(lower + offset as f64 - half_range);
        let test_upper = test_lower + range_size as f64;
        let score = score_candidate(offset, volatility_pct, fee_tier_pct);

        if score > best.expected_apr {
            best = OptimalRange {
                lower: test_lower.floor() as i32,
                upper: test_upper.floor() as i32,
                expected_apr: score,
            };
        }
        offset += step;
    }

    best
}
