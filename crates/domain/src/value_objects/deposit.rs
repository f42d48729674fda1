use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::math::u256_to_f64;

/// Decimals assumed when decoding raw deposit amounts.
pub const DEPOSIT_DECIMALS: i32 = 18;

/// A single liquidity deposit into a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    /// Raw token0 amount.
    pub amount0: U256,
    /// Raw token1 amount.
    pub amount1: U256,
    /// Unix timestamp of the deposit, in seconds.
    pub timestamp: u64,
}

impl Deposit {
    /// Creates a deposit from raw amounts.
    #[must_use]
    pub fn new(amount0: impl Into<U256>, amount1: impl Into<U256>, timestamp: u64) -> Self {
        Self {
            amount0: amount0.into(),
            amount1: amount1.into(),
            timestamp,
        }
    }

    /// Token amounts in whole units, decoded with [`DEPOSIT_DECIMALS`].
    #[must_use]
    pub fn units(&self) -> (f64, f64) {
        let scale = 10f64.powi(DEPOSIT_DECIMALS);
        (u256_to_f64(self.amount0) / scale, u256_to_f64(self.amount1) / scale)
    }
}
