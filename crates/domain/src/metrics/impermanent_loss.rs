use super::PositionIl;
use crate::value_objects::Liquidity;

/// Scale applied to raw liquidity when sizing the USD loss.
pub const IL_LIQUIDITY_SCALE: f64 = 1e18;

/// Closed-form two-asset impermanent loss.
/// formula: 2 * sqrt(k) / (1 + k) - 1, with k the price ratio.
///
/// Working on sqrt prices, `r = sqrt_p1 / sqrt_p0 = sqrt(k)`, so the loss
/// is `2r / (1 + r^2) - 1`: zero at `r = 1` and tending to -1 as `r` moves
/// towards 0 or infinity.
///
/// # Arguments
///
/// * `sqrt_p0` - Entry sqrt price (sqrt of token1 per token0)
/// * `sqrt_p1` - Current sqrt price
///
/// # Returns
///
/// The loss as a decimal (e.g. -0.05 for 5 %). Zero when either sqrt
/// price is zero.
pub fn calculate_il(sqrt_p0: f64, sqrt_p1: f64) -> f64 {
    if sqrt_p0 == 0.0 || sqrt_p1 == 0.0 {
        return 0.0;
    }
    let ratio = sqrt_p1 / sqrt_p0;
    2.0 * ratio / (1.0 + ratio * ratio) - 1.0
}

/// Impermanent loss of a position, in percent and USD.
///
/// The USD figure sizes the loss on `liquidity / 1e18` units of token1.
pub fn calculate_position_il(
    liquidity: Liquidity,
    sqrt_p0: f64,
    sqrt_p1: f64,
    price1_usd: f64,
) -> PositionIl {
    let il = calculate_il(sqrt_p0, sqrt_p1);
    PositionIl {
        il_usd: liquidity.scaled(IL_LIQUIDITY_SCALE) * price1_usd * il.abs(),
        il_percent: il * 100.0,
    }
}

/// Positional proxy for time-in-range, in percent.
///
/// Linear position of `current_tick` within the range, rounded and
/// clamped to `[0, 100]`. Outside the range the estimate is 0. This is not
/// a time-weighted historical figure.
pub fn estimate_time_in_range(tick_lower: i32, tick_upper: i32, current_tick: i32) -> f64 {
    if current_tick < tick_lower || current_tick > tick_upper {
        return 0.0;
    }
    let range = f64::from(tick_upper) - f64::from(tick_lower);
    if range == 0.0 {
        return 100.0;
    }
    let position = f64::from(current_tick) - f64::from(tick_lower);
    (position / range * 100.0).round().clamp(0.0, 100.0)
}
