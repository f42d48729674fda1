use crate::error::{DomainError, ensure_positive, ensure_tick_range};
use crate::math::concentrated_liquidity::{ValuationResult, value_at};
use crate::math::price_tick::{tick_to_price, tick_to_sqrt_price};
use crate::metrics::impermanent_loss::estimate_time_in_range;
use crate::value_objects::{FeeTier, Liquidity, PairPrices, TokenInfo};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A concentrated-liquidity position as delivered by the discovery layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityPosition {
    /// Position liquidity `L`.
    pub liquidity: Liquidity,
    /// Lower tick bound (inclusive).
    pub tick_lower: i32,
    /// Upper tick bound (inclusive).
    pub tick_upper: i32,
    /// Token0 metadata.
    pub token0: TokenInfo,
    /// Token1 metadata.
    pub token1: TokenInfo,
    /// Pool fee tier, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_tier: Option<FeeTier>,
}

impl LiquidityPosition {
    /// Creates a position without a fee tier.
    pub fn new(
        liquidity: impl Into<Liquidity>,
        tick_lower: i32,
        tick_upper: i32,
        token0: TokenInfo,
        token1: TokenInfo,
    ) -> Self {
        Self {
            liquidity: liquidity.into(),
            tick_lower,
            tick_upper,
            token0,
            token1,
            fee_tier: None,
        }
    }

    /// Sets the fee tier.
    #[must_use]
    pub fn with_fee_tier(mut self, fee_tier: FeeTier) -> Self {
        self.fee_tier = Some(fee_tier);
        self
    }

    /// Checks the tick range and token prices.
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_tick_range(self.tick_lower, self.tick_upper)?;
        ensure_positive("token0.priceUsd", self.token0.price_usd)?;
        ensure_positive("token1.priceUsd", self.token1.price_usd)?;
        Ok(())
    }

    /// USD prices of the two tokens.
    #[must_use]
    pub fn prices(&self) -> PairPrices {
        PairPrices::new(self.token0.price_usd, self.token1.price_usd)
    }

    /// Range bounds as prices (token1 per token0).
    #[must_use]
    pub fn price_bounds(&self) -> (f64, f64) {
        (tick_to_price(self.tick_lower), tick_to_price(self.tick_upper))
    }

    /// Sqrt of the pool price implied by the token USD prices.
    #[must_use]
    pub fn spot_sqrt_price(&self) -> f64 {
        self.prices().pool_price().sqrt()
    }

    /// Whether `tick` lies inside `[tick_lower, tick_upper]`.
    #[must_use]
    pub fn is_in_range(&self, tick: i32) -> bool {
        tick >= self.tick_lower && tick <= self.tick_upper
    }

    /// Positional time-in-range proxy for `current_tick`, in percent.
    #[must_use]
    pub fn time_in_range(&self, current_tick: i32) -> f64 {
        estimate_time_in_range(self.tick_lower, self.tick_upper, current_tick)
    }

    /// Values the position at `sqrt_price` using the tokens' USD prices.
    pub fn value_at(&self, sqrt_price: f64) -> Result<ValuationResult, DomainError> {
        self.validate()?;
        ensure_positive("sqrtPrice", sqrt_price)?;
        debug!(
            liquidity = %self.liquidity,
            tick_lower = self.tick_lower,
            tick_upper = self.tick_upper,
            sqrt_price,
            "Valuing position"
        );
        Ok(value_at(
            self.liquidity.to_f64(),
            sqrt_price,
            self.tick_lower,
            self.tick_upper,
            self.token0.price_usd,
            self.token1.price_usd,
        ))
    }

    /// Values the position with the pool sitting at `tick`.
    pub fn value_at_tick(&self, tick: i32) -> Result<ValuationResult, DomainError> {
        self.value_at(tick_to_sqrt_price(tick))
    }
}
