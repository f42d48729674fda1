use crate::error::DomainError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Pool fee tier in hundredths of a basis point ("pips").
///
/// 500 = 0.05 %, 3000 = 0.3 %, 10000 = 1 %.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(pub u32);

impl FeeTier {
    /// Fee tier from pips.
    #[must_use]
    pub fn from_pips(pips: u32) -> Self {
        Self(pips)
    }

    /// Fee tier from a percent value, e.g. `0.3` for the 3000 pip tier.
    ///
    /// Fails for negative percents and for values beyond `u32` pips.
    pub fn from_percent(percent: Decimal) -> Result<Self, DomainError> {
        if percent.is_sign_negative() && !percent.is_zero() {
            return Err(DomainError::invalid(
                "feeTierPercent",
                format!("must not be negative, got {percent}"),
            ));
        }
        percent
            .checked_mul(Decimal::from(10_000))
            .and_then(|pips| pips.round().to_u32())
            .map(Self)
            .ok_or_else(|| {
                DomainError::invalid("feeTierPercent", format!("out of range: {percent}"))
            })
    }

    /// Raw pips.
    #[must_use]
    pub fn pips(&self) -> u32 {
        self.0
    }

    /// Fee as a percent value (`pips / 10_000`).
    #[must_use]
    pub fn as_percent(&self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(10_000)
    }

    /// Fee as a percent value in `f64`, the unit the simulator consumes.
    #[must_use]
    pub fn as_percent_f64(&self) -> f64 {
        self.as_percent().to_f64().unwrap_or(0.0)
    }

    /// Fee as a fraction of swap volume (`pips / 1_000_000`).
    #[must_use]
    pub fn as_rate(&self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(1_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_tiers() {
        assert_eq!(FeeTier::from_pips(500).as_percent(), dec!(0.05));
        assert_eq!(FeeTier::from_pips(3000).as_percent(), dec!(0.3));
        assert_eq!(FeeTier::from_pips(10_000).as_percent(), dec!(1));
        assert_eq!(FeeTier::from_pips(3000).as_rate(), dec!(0.003));
    }

    #[test]
    fn test_from_percent() {
        assert_eq!(FeeTier::from_percent(dec!(0.05)), Ok(FeeTier(500)));
        assert_eq!(FeeTier::from_percent(dec!(0.3)).unwrap().pips(), 3000);
        assert_eq!(FeeTier::from_percent(dec!(0)), Ok(FeeTier(0)));
    }

    #[test]
    fn test_from_percent_rejects_out_of_range() {
        assert!(matches!(
            FeeTier::from_percent(dec!(-1)),
            Err(DomainError::InvalidParameter {
                name: "feeTierPercent",
                ..
            })
        ));
        assert!(FeeTier::from_percent(dec!(1000000)).is_err());
    }

    #[test]
    fn test_percent_f64() {
        assert!((FeeTier(500).as_percent_f64() - 0.05).abs() < 1e-12);
    }
}
