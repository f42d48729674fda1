//! Monte-Carlo simulation parameters.
//!
//! Parameters are plain data with builder-style setters. The runner
//! validates them once at the API boundary; the trial math itself never
//! re-checks ranges.

use lp_nexus_domain::error::{DomainError, ensure_positive, ensure_tick_range};
use lp_nexus_domain::{FeeTier, Liquidity, LiquidityPosition};
use serde::{Deserialize, Serialize};

/// Default divisor applied to raw liquidity before valuation.
pub const DEFAULT_LIQUIDITY_SCALE: f64 = 1e18;

fn default_liquidity_scale() -> f64 {
    DEFAULT_LIQUIDITY_SCALE
}

/// Configuration for a Monte-Carlo batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    /// Token0 USD price at the start of the horizon.
    pub current_price0: f64,
    /// Token1 USD price at the start of the horizon.
    pub current_price1: f64,
    /// Lower tick bound of the simulated range.
    pub tick_lower: i32,
    /// Upper tick bound of the simulated range.
    pub tick_upper: i32,
    /// Raw position liquidity.
    pub liquidity: Liquidity,
    /// Annualized volatility in percent, e.g. `45.0`.
    pub volatility_pct: f64,
    /// Horizon in days.
    pub time_days: f64,
    /// Number of trials.
    pub simulations: usize,
    /// Correlation between the two assets' shocks, in `[-1, 1]`.
    pub correlation: f64,
    /// Pool fee in percent, e.g. `0.3` for the 3000 pip tier.
    pub fee_tier_pct: f64,
    /// Divisor applied to `liquidity` before valuation.
    #[serde(default = "default_liquidity_scale")]
    pub liquidity_scale: f64,
    /// Seed for reproducible batches; `None` draws from the thread-local generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimulationParams {
    /// Creates parameters with the simulator's default knobs:
    /// 45 % volatility, 30 days, 10,000 trials, 0.65 correlation, 0.3 % fee.
    pub fn new(
        current_price0: f64,
        current_price1: f64,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: impl Into<Liquidity>,
    ) -> Self {
        Self {
            current_price0,
            current_price1,
            tick_lower,
            tick_upper,
            liquidity: liquidity.into(),
            volatility_pct: 45.0,
            time_days: 30.0,
            simulations: 10_000,
            correlation: 0.65,
            fee_tier_pct: 0.3,
            liquidity_scale: DEFAULT_LIQUIDITY_SCALE,
            seed: None,
        }
    }

    /// Parameters for an existing position at its tokens' current prices.
    #[must_use]
    pub fn from_position(position: &LiquidityPosition) -> Self {
        let params = Self::new(
            position.token0.price_usd,
            position.token1.price_usd,
            position.tick_lower,
            position.tick_upper,
            position.liquidity,
        );
        match position.fee_tier {
            Some(fee_tier) => params.with_fee_tier(fee_tier),
            None => params,
        }
    }

    /// Sets the annualized volatility in percent.
    #[must_use]
    pub fn with_volatility(mut self, volatility_pct: f64) -> Self {
        self.volatility_pct = volatility_pct;
        self
    }

    /// Sets the horizon in days.
    #[must_use]
    pub fn with_time_days(mut self, time_days: f64) -> Self {
        self.time_days = time_days;
        self
    }

    /// Sets the number of trials.
    #[must_use]
    pub fn with_simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations;
        self
    }

    /// Sets the correlation coefficient.
    #[must_use]
    pub fn with_correlation(mut self, correlation: f64) -> Self {
        self.correlation = correlation;
        self
    }

    /// Sets the fee tier as a percent value.
    #[must_use]
    pub fn with_fee_tier_pct(mut self, fee_tier_pct: f64) -> Self {
        self.fee_tier_pct = fee_tier_pct;
        self
    }

    /// Sets the fee tier from pool pips.
    #[must_use]
    pub fn with_fee_tier(self, fee_tier: FeeTier) -> Self {
        self.with_fee_tier_pct(fee_tier.as_percent_f64())
    }

    /// Sets the liquidity scale.
    #[must_use]
    pub fn with_liquidity_scale(mut self, liquidity_scale: f64) -> Self {
        self.liquidity_scale = liquidity_scale;
        self
    }

    /// Replaces the tick range.
    #[must_use]
    pub fn with_range(mut self, tick_lower: i32, tick_upper: i32) -> Self {
        self.tick_lower = tick_lower;
        self.tick_upper = tick_upper;
        self
    }

    /// Enables reproducibility mode.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Horizon as a fraction of a year.
    #[must_use]
    pub fn year_fraction(&self) -> f64 {
        self.time_days / 365.0
    }

    /// Volatility as a decimal (`volatility_pct / 100`).
    #[must_use]
    pub fn volatility(&self) -> f64 {
        self.volatility_pct / 100.0
    }

    /// Liquidity after applying [`Self::liquidity_scale`].
    #[must_use]
    pub fn scaled_liquidity(&self) -> f64 {
        self.liquidity.scaled(self.liquidity_scale)
    }

    /// Checks every parameter against its admissible domain.
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_positive("currentPrice0", self.current_price0)?;
        ensure_positive("currentPrice1", self.current_price1)?;
        ensure_tick_range(self.tick_lower, self.tick_upper)?;
        ensure_positive("volatilityPct", self.volatility_pct)?;
        ensure_positive("timeDays", self.time_days)?;
        ensure_positive("liquidityScale", self.liquidity_scale)?;
        if self.simulations == 0 {
            return Err(DomainError::invalid("simulations", "must be at least 1"));
        }
        if !(-1.0..=1.0).contains(&self.correlation) {
            return Err(DomainError::invalid(
                "correlation",
                format!("must lie in [-1, 1], got {}", self.correlation),
            ));
        }
        if !(self.fee_tier_pct.is_finite() && self.fee_tier_pct >= 0.0) {
            return Err(DomainError::invalid(
                "feeTierPct",
                format!("must be a finite non-negative number, got {}", self.fee_tier_pct),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_nexus_domain::TokenInfo;

    fn params() -> SimulationParams {
        SimulationParams::new(3_420.0, 1.0, 78_000, 84_000, 1_000_000_000_000_000_000_000u128)
    }

    #[test]
    fn test_defaults() {
        let p = params();
        assert_eq!(p.volatility_pct, 45.0);
        assert_eq!(p.time_days, 30.0);
        assert_eq!(p.simulations, 10_000);
        assert_eq!(p.correlation, 0.65);
        assert_eq!(p.seed, None);
        assert!((p.scaled_liquidity() - 1_000.0).abs() < 1e-9);
        assert!((p.year_fraction() - 30.0 / 365.0).abs() < 1e-15);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_from_position_picks_up_fee_tier() {
        let position = LiquidityPosition::new(
            5u64,
            -10,
            10,
            TokenInfo::new("WETH", 18, 3_420.0),
            TokenInfo::new("USDC", 6, 1.0),
        )
        .with_fee_tier(FeeTier::from_pips(500));
        let p = SimulationParams::from_position(&position);
        assert!((p.fee_tier_pct - 0.05).abs() < 1e-12);
        assert_eq!(p.current_price0, 3_420.0);
        assert_eq!((p.tick_lower, p.tick_upper), (-10, 10));
    }

    #[test]
    fn test_validation_failures() {
        assert!(matches!(
            params().with_range(10, 10).validate(),
            Err(DomainError::InvalidTickRange { .. })
        ));
        let cases = [
            params().with_volatility(0.0),
            params().with_time_days(-1.0),
            params().with_simulations(0),
            params().with_correlation(1.5),
            params().with_correlation(f64::NAN),
            params().with_fee_tier_pct(-0.1),
            params().with_liquidity_scale(0.0),
            SimulationParams::new(0.0, 1.0, 0, 10, 1u64),
        ];
        for case in cases {
            assert!(
                matches!(case.validate(), Err(DomainError::InvalidParameter { .. })),
                "{case:?}"
            );
        }
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(params().with_seed(7)).unwrap();
        assert_eq!(json["volatilityPct"], 45.0);
        assert_eq!(json["liquidity"], "1000000000000000000000");
        assert_eq!(json["seed"], 7);
    }

    #[test]
    fn test_deserialize_without_supplemental_knobs() {
        let json = r#"{
            "currentPrice0": 3420, "currentPrice1": 1,
            "tickLower": 78000, "tickUpper": 84000,
            "liquidity": "1000000000000000000000",
            "volatilityPct": 45, "timeDays": 30, "simulations": 10000,
            "correlation": 0.65, "feeTierPct": 0.3
        }"#;
        let p: SimulationParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.liquidity_scale, DEFAULT_LIQUIDITY_SCALE);
        assert_eq!(p.seed, None);
        assert_eq!(p, params());
    }
}
