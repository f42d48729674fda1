//! Position performance metrics shown next to the valuation: fee capture
//! efficiency, volatility-adjusted ROI, deposit-weighted entry price and
//! fee APR.

use crate::value_objects::{Deposit, PairPrices};
use serde::{Deserialize, Serialize};

/// Fee capture efficiency, in percent.
/// formula: time_in_range * (1 - min(volatility * 0.003, 0.5))
///
/// Rounded to the nearest integer and clamped to `[0, 100]`.
pub fn calculate_fee_capture_efficiency(time_in_range_pct: f64, volatility_pct: f64) -> f64 {
    let volatility_factor = (volatility_pct * 0.003).min(0.5);
    let efficiency = time_in_range_pct * (1.0 - volatility_factor);
    efficiency.clamp(0.0, 100.0).round()
}

/// ROI penalized by impermanent loss scaled with volatility.
/// formula: roi - |il_percent| * volatility_pct * 0.4
///
/// Negative values mean the position underperforms a risk-adjusted HODL.
pub fn calculate_volatility_adjusted_roi(roi: f64, il_percent: f64, volatility_pct: f64) -> f64 {
    roi - il_percent.abs() * volatility_pct * 0.4
}

/// Deposit-weighted entry price.
///
/// Every deposit is valued at `current_prices`; deposits with positive
/// value contribute their implied token1 price (`value1 / amount1`)
/// weighted by that value. Falls back to `current_prices.price0` when
/// there is nothing to weigh.
pub fn calculate_smart_entry_price(deposits: &[Deposit], current_prices: PairPrices) -> f64 {
    let mut total_weight = 0.0;
    let mut weighted_price_sum = 0.0;

    for deposit in deposits {
        let (amount0, amount1) = deposit.units();
        let value0 = amount0 * current_prices.price0;
        let value1 = amount1 * current_prices.price1;
        let total_value = value0 + value1;

        if total_value > 0.0 {
            let deposit_price = if amount1 > 0.0 { value1 / amount1 } else { 0.0 };
            weighted_price_sum += deposit_price * total_value;
            total_weight += total_value;
        }
    }

    if total_weight > 0.0 {
        weighted_price_sum / total_weight
    } else {
        current_prices.price0
    }
}

/// Annualized fee yield in percent.
/// formula: daily_fees * 365 / tvl * 100
pub fn calculate_fee_apr(daily_fees: f64, tvl: f64) -> f64 {
    if tvl == 0.0 {
        return 0.0;
    }
    daily_fees * 365.0 / tvl * 100.0
}

/// Price multipliers bracketing the current price for a volatility-sized range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeMultipliers {
    /// Multiplier for the lower bound, e.g. `0.95`.
    pub lower: f64,
    /// Multiplier for the upper bound, e.g. `1.05`.
    pub upper: f64,
}

/// Range width multipliers from volatility and a confidence level.
///
/// Width is `2 * volatility * z` on each side, with z = 1.96 at 0.95,
/// 2.576 at 0.99 and 1.645 for any other confidence.
pub fn estimate_optimal_range_multipliers(volatility: f64, confidence: f64) -> RangeMultipliers {
    let range_width = volatility * 2.0;
    let z_score = if confidence == 0.95 {
        1.96
    } else if confidence == 0.99 {
        2.576
    } else {
        1.645
    };
    RangeMultipliers {
        lower: 1.0 - range_width * z_score,
        upper: 1.0 + range_width * z_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_fee_capture_efficiency() {
        // 94 * (1 - 0.135) = 81.31
        assert_eq!(calculate_fee_capture_efficiency(94.0, 45.0), 81.0);
        // volatility factor saturates at 0.5
        assert_eq!(calculate_fee_capture_efficiency(80.0, 400.0), 40.0);
        assert_eq!(calculate_fee_capture_efficiency(250.0, 0.0), 100.0);
        assert_eq!(calculate_fee_capture_efficiency(-10.0, 20.0), 0.0);
    }

    #[test]
    fn test_volatility_adjusted_roi() {
        let adjusted = calculate_volatility_adjusted_roi(29.8, -5.8, 0.45);
        assert!((adjusted - (29.8 - 5.8 * 0.45 * 0.4)).abs() < 1e-12);
        assert_eq!(calculate_volatility_adjusted_roi(10.0, 0.0, 80.0), 10.0);
    }

    #[test]
    fn test_smart_entry_price_fallbacks() {
        let prices = PairPrices::new(84_291.0, 3_420.0);
        assert_eq!(calculate_smart_entry_price(&[], prices), 84_291.0);

        let empty = [Deposit::new(0u64, 0u64, 1)];
        assert_eq!(calculate_smart_entry_price(&empty, prices), 84_291.0);
    }

    #[test]
    fn test_smart_entry_price_weighting() {
        let prices = PairPrices::new(2.0, 3.0);
        // Every deposit with token1 implies price1 under current prices.
        let deposits = [
            Deposit::new(ONE, ONE, 1),
            Deposit::new(5 * ONE, 2 * ONE, 2),
        ];
        let entry = calculate_smart_entry_price(&deposits, prices);
        assert!((entry - 3.0).abs() < 1e-12);

        // A token0-only deposit pulls the weighted price towards zero.
        let deposits = [Deposit::new(0u128, ONE, 1), Deposit::new(ONE, 0u128, 2)];
        let entry = calculate_smart_entry_price(&deposits, prices);
        // (3 * 3 + 0 * 2) / (3 + 2)
        assert!((entry - 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_fee_apr() {
        assert_eq!(calculate_fee_apr(10.0, 0.0), 0.0);
        assert!((calculate_fee_apr(10.0, 36_500.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_range_multipliers() {
        let m = estimate_optimal_range_multipliers(0.05, 0.95);
        assert!((m.lower - (1.0 - 0.1 * 1.96)).abs() < 1e-12);
        assert!((m.upper - (1.0 + 0.1 * 1.96)).abs() < 1e-12);

        let m = estimate_optimal_range_multipliers(0.05, 0.99);
        assert!((m.upper - (1.0 + 0.1 * 2.576)).abs() < 1e-12);

        let m = estimate_optimal_range_multipliers(0.05, 0.9);
        assert!((m.lower - (1.0 - 0.1 * 1.645)).abs() < 1e-12);
    }
}
