use crate::error::{DomainError, ensure_positive};
use primitive_types::U256;

use super::u256_to_f64;

/// Base of the tick lattice: each tick moves the price by one basis point.
pub const TICK_BASE: f64 = 1.0001;

/// 2^96, the scale of Q64.96 sqrt prices.
const Q96: f64 = 79_228_162_514_264_337_593_543_950_336.0;

/// Returns the price corresponding to a given tick.
/// P = 1.0001 ^ tick
///
/// Accepts integer ticks as well as the fractional ticks produced by
/// [`price_to_tick`]. No clamping is applied, so extreme ticks give
/// extremely small or large (but positive) prices.
pub fn tick_to_price<T: Into<f64>>(tick: T) -> f64 {
    TICK_BASE.powf(tick.into())
}

/// Returns the (real-valued) tick corresponding to a given price.
/// tick = ln(P) / ln(1.0001)
///
/// NaN for non-positive prices; use [`try_price_to_tick`] at API boundaries.
pub fn price_to_tick(price: f64) -> f64 {
    price.ln() / TICK_BASE.ln()
}

/// Checked variant of [`price_to_tick`].
pub fn try_price_to_tick(price: f64) -> Result<f64, DomainError> {
    ensure_positive("price", price)?;
    Ok(price_to_tick(price))
}

/// Returns the integer tick closest to `price`.
pub fn nearest_tick(price: f64) -> Result<i32, DomainError> {
    let tick = try_price_to_tick(price)?.round();
    if tick < f64::from(i32::MIN) || tick > f64::from(i32::MAX) {
        return Err(DomainError::invalid("price", "tick out of i32 range"));
    }
    Ok(tick as i32)
}

/// Returns sqrt(1.0001 ^ tick).
pub fn tick_to_sqrt_price<T: Into<f64>>(tick: T) -> f64 {
    tick_to_price(tick).sqrt()
}

/// Decodes a Q64.96 `sqrtPriceX96` into a plain price (token1 per token0).
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256) -> f64 {
    let sqrt_price = u256_to_f64(sqrt_price_x96) / Q96;
    sqrt_price * sqrt_price
}
