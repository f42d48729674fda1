use super::price_tick::tick_to_sqrt_price;
use serde::{Deserialize, Serialize};

/// Token amounts held by a position at a given price, and their USD value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    /// Token0 held, in liquidity-normalized token units.
    pub amount0: f64,
    /// Token1 held, in liquidity-normalized token units.
    pub amount1: f64,
    /// `amount0 * price0_usd`.
    pub value0_usd: f64,
    /// `amount1 * price1_usd`.
    pub value1_usd: f64,
    /// `value0_usd + value1_usd`.
    pub total_usd: f64,
}

impl ValuationResult {
    /// Prices a pair of token amounts.
    #[must_use]
    pub fn from_amounts(amount0: f64, amount1: f64, price0_usd: f64, price1_usd: f64) -> Self {
        let value0_usd = amount0 * price0_usd;
        let value1_usd = amount1 * price1_usd;
        Self {
            amount0,
            amount1,
            value0_usd,
            value1_usd,
            total_usd: value0_usd + value1_usd,
        }
    }
}

/// Amount of token0 (x) spanned by liquidity between two sqrt prices.
/// delta_x = L * (1/sqrt(P_a) - 1/sqrt(P_b))
///
/// Bounds are used as given; swapping them flips the sign.
pub fn amount0_delta(liquidity: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    liquidity * (1.0 / sqrt_price_a - 1.0 / sqrt_price_b)
}

/// Amount of token1 (y) spanned by liquidity between two sqrt prices.
/// delta_y = L * (sqrt(P_b) - sqrt(P_a))
pub fn amount1_delta(liquidity: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    liquidity * (sqrt_price_b - sqrt_price_a)
}

/// Token amounts held by `liquidity` at `sqrt_price` for a range given by
/// its sqrt-price bounds.
///
/// Below the range the position is all token0, above it all token1.
pub fn amounts_for_sqrt_range(
    liquidity: f64,
    sqrt_price: f64,
    sqrt_lower: f64,
    sqrt_upper: f64,
) -> (f64, f64) {
    if sqrt_price <= sqrt_lower {
        (amount0_delta(liquidity, sqrt_lower, sqrt_upper), 0.0)
    } else if sqrt_price >= sqrt_upper {
        (0.0, amount1_delta(liquidity, sqrt_lower, sqrt_upper))
    } else {
        (
            amount0_delta(liquidity, sqrt_price, sqrt_upper),
            amount1_delta(liquidity, sqrt_lower, sqrt_price),
        )
    }
}

/// Values a position given precomputed sqrt-price bounds.
pub fn value_at_sqrt_range(
    liquidity: f64,
    sqrt_price: f64,
    sqrt_lower: f64,
    sqrt_upper: f64,
    price0_usd: f64,
    price1_usd: f64,
) -> ValuationResult {
    let (amount0, amount1) = amounts_for_sqrt_range(liquidity, sqrt_price, sqrt_lower, sqrt_upper);
    ValuationResult::from_amounts(amount0, amount1, price0_usd, price1_usd)
}

/// Values a concentrated-liquidity position at the current sqrt price.
///
/// # Arguments
///
/// * `liquidity` - Position liquidity `L`
/// * `sqrt_price_current` - sqrt of the pool price (token1 per token0)
/// * `tick_lower` / `tick_upper` - Range bounds
/// * `price0_usd` / `price1_usd` - USD prices of the two tokens
///
/// Inputs are not validated: negative liquidity or an inverted range give
/// degenerate (zero or negative) amounts. See
/// [`LiquidityPosition::value_at`](crate::value_objects::LiquidityPosition::value_at)
/// for the checked entry point.
pub fn value_at(
    liquidity: f64,
    sqrt_price_current: f64,
    tick_lower: i32,
    tick_upper: i32,
    price0_usd: f64,
    price1_usd: f64,
) -> ValuationResult {
    value_at_sqrt_range(
        liquidity,
        sqrt_price_current,
        tick_to_sqrt_price(tick_lower),
        tick_to_sqrt_price(tick_upper),
        price0_usd,
        price1_usd,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::price_tick::tick_to_price;

    fn rel_diff(a: f64, b: f64) -> f64 {
        (a - b).abs() / a.abs().max(b.abs()).max(1e-12)
    }

    #[test]
    fn test_value_below_range_is_all_token0() {
        let r = value_at(1_000.0, 0.5, -100, 100, 2.0, 3.0);
        let expected = 1_000.0 * (1.0 / tick_to_price(-50) - 1.0 / tick_to_price(50));
        assert!(rel_diff(r.amount0, expected) < 1e-12);
        assert_eq!(r.amount1, 0.0);
        assert_eq!(r.value1_usd, 0.0);
        assert!(rel_diff(r.total_usd, expected * 2.0) < 1e-12);
    }

    #[test]
    fn test_value_above_range_is_all_token1() {
        let r = value_at(1_000.0, 2.0, -100, 100, 2.0, 3.0);
        let expected = 1_000.0 * (tick_to_price(50) - tick_to_price(-50));
        assert_eq!(r.amount0, 0.0);
        assert!(rel_diff(r.amount1, expected) < 1e-12);
        assert!(rel_diff(r.total_usd, expected * 3.0) < 1e-12);
    }

    #[test]
    fn test_value_in_range() {
        // Symmetric range around price 1: both legs are equal.
        let r = value_at(1_000.0, 1.0, -1_000, 1_000, 1.0, 1.0);
        assert!(rel_diff(r.amount0, 48.768_197_581_273_6) < 1e-9);
        assert!(rel_diff(r.amount1, 48.768_197_581_273_6) < 1e-9);
        assert!(rel_diff(r.total_usd, r.amount0 + r.amount1) < 1e-15);
    }

    #[test]
    fn test_value_is_continuous_at_lower_bound() {
        let (lower, upper) = (-2_000, 3_000);
        let sqrt_pa = tick_to_price(lower).sqrt();
        let eps = 1e-10;

        let below = value_at(5e6, sqrt_pa * (1.0 - eps), lower, upper, 1.0, 1.0);
        let at = value_at(5e6, sqrt_pa, lower, upper, 1.0, 1.0);
        let within = value_at(5e6, sqrt_pa * (1.0 + eps), lower, upper, 1.0, 1.0);

        assert_eq!(below.amount1, 0.0);
        assert_eq!(at.amount1, 0.0);
        assert!(within.amount1.abs() < 1e-2);
        assert!(rel_diff(below.amount0, within.amount0) < 1e-8);
        assert!(rel_diff(at.amount0, within.amount0) < 1e-8);
    }

    #[test]
    fn test_value_is_continuous_at_upper_bound() {
        let (lower, upper) = (-2_000, 3_000);
        let sqrt_pb = tick_to_price(upper).sqrt();
        let eps = 1e-10;

        let within = value_at(5e6, sqrt_pb * (1.0 - eps), lower, upper, 1.0, 1.0);
        let above = value_at(5e6, sqrt_pb * (1.0 + eps), lower, upper, 1.0, 1.0);

        assert_eq!(above.amount0, 0.0);
        assert!(within.amount0.abs() < 1e-2);
        assert!(rel_diff(within.amount1, above.amount1) < 1e-8);
    }

    #[test]
    fn test_value_is_linear_in_liquidity() {
        for sqrt_price in [0.5, 1.0, 1.02, 3.0] {
            let single = value_at(7_500.0, sqrt_price, -500, 800, 10.0, 2.0);
            let double = value_at(15_000.0, sqrt_price, -500, 800, 10.0, 2.0);
            assert!(rel_diff(double.amount0, 2.0 * single.amount0) < 1e-12);
            assert!(rel_diff(double.amount1, 2.0 * single.amount1) < 1e-12);
            assert!(rel_diff(double.total_usd, 2.0 * single.total_usd) < 1e-12);
        }
    }

    #[test]
    fn test_amounts_are_non_negative() {
        let mut sqrt_price = 0.1;
        while sqrt_price < 10.0 {
            let r = value_at(1e9, sqrt_price, -20_000, 20_000, 1.0, 1.0);
            assert!(r.amount0 >= 0.0 && r.amount1 >= 0.0);
            sqrt_price *= 1.1;
        }
    }

    #[test]
    fn test_position_detail_regression_fixture() {
        // WBTC/WETH position: tick range [184200, 192400], pool sqrt price
        // sqrt(3450) sits below the range, so the position is all WBTC.
        let r = value_at(1e9, 3450f64.sqrt(), 184_200, 192_400, 84_291.0, 3_420.0);
        assert_eq!(r.amount1, 0.0);
        assert!(rel_diff(r.amount0, 33_660.560_555_320_17) < 1e-9);
        assert!(rel_diff(r.value0_usd, 2_837_282_309.768_492) < 1e-9);
        assert_eq!(r.total_usd, r.value0_usd);
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        // Negative liquidity mirrors the amounts.
        let r = value_at(-1_000.0, 1.0, -100, 100, 1.0, 1.0);
        assert!(r.amount0 < 0.0 && r.amount1 < 0.0);

        // Inverted range produces a negative leg.
        let r = value_at(1_000.0, 0.5, 100, -100, 1.0, 1.0);
        assert!(r.amount0 < 0.0);

        let r = value_at(0.0, 1.0, -100, 100, 1.0, 1.0);
        assert_eq!(r, ValuationResult::default());
    }
}
