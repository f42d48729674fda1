use primitive_types::U256;

/// Concentrated-liquidity amounts and valuation.
pub mod concentrated_liquidity;
/// Tick <-> price conversions.
pub mod price_tick;

/// Converts a 256-bit unsigned integer to the nearest `f64`.
///
/// Values above `f64::MAX` saturate to infinity.
pub fn u256_to_f64(value: U256) -> f64 {
    const LIMB: f64 = 18_446_744_073_709_551_616.0; // 2^64
    value
        .0
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * LIMB + *limb as f64)
}
