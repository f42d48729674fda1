use crate::error::DomainError;
use crate::math::u256_to_f64;
use primitive_types::U256;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Non-negative liquidity magnitude of a concentrated-liquidity position.
///
/// Subgraphs deliver liquidity as an integer string that may exceed
/// `u128`, so the raw value is kept as a `U256` and only converted to
/// `f64` for valuation. Serialized as a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Liquidity(U256);

impl Liquidity {
    /// Wraps a raw liquidity value.
    #[must_use]
    pub fn new(raw: U256) -> Self {
        Self(raw)
    }

    /// Zero liquidity.
    #[must_use]
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// Returns the raw 256-bit value.
    #[must_use]
    pub fn raw(&self) -> U256 {
        self.0
    }

    /// Returns `true` when the position holds no liquidity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Nearest `f64` to the raw value.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        u256_to_f64(self.0)
    }

    /// Raw value divided by `scale` (e.g. `1e18` for 18-decimal normalization).
    #[must_use]
    pub fn scaled(&self, scale: f64) -> f64 {
        self.to_f64() / scale
    }
}

impl From<u128> for Liquidity {
    fn from(v: u128) -> Self {
        Self(U256::from(v))
    }
}

impl From<u64> for Liquidity {
    fn from(v: u64) -> Self {
        Self(U256::from(v))
    }
}

impl From<U256> for Liquidity {
    fn from(v: U256) -> Self {
        Self(v)
    }
}

impl FromStr for Liquidity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidLiquidity(s.to_string()));
        }
        U256::from_dec_str(trimmed)
            .map(Self)
            .map_err(|_| DomainError::InvalidLiquidity(s.to_string()))
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Liquidity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct LiquidityVisitor;

impl Visitor<'_> for LiquidityVisitor {
    type Value = Liquidity;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or an integer string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Liquidity::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(Liquidity::from)
            .map_err(|_| E::custom(DomainError::InvalidLiquidity(v.to_string())))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(Liquidity::from(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
        u128::try_from(v)
            .map(Liquidity::from)
            .map_err(|_| E::custom(DomainError::InvalidLiquidity(v.to_string())))
    }

    /// JSON numbers above `u64::MAX` arrive as floats. Only finite,
    /// non-negative, integral values are accepted.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() || v < 0.0 || v.fract() != 0.0 {
            return Err(E::custom(DomainError::InvalidLiquidity(v.to_string())));
        }
        U256::from_dec_str(&format!("{v:.0}"))
            .map(Liquidity)
            .map_err(|_| E::custom(DomainError::InvalidLiquidity(v.to_string())))
    }
}

impl<'de> Deserialize<'de> for Liquidity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LiquidityVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subgraph_string() {
        let l: Liquidity = "124812481248".parse().unwrap();
        assert_eq!(l.raw(), U256::from(124_812_481_248u64));
        assert_eq!(l.to_f64(), 124_812_481_248.0);
        assert_eq!(l.to_string(), "124812481248");
    }

    #[test]
    fn test_parse_beyond_u128() {
        let s = "1000000000000000000000000000000000000000000";
        let l: Liquidity = s.parse().unwrap();
        assert_eq!(l.to_string(), s);
        assert!((l.scaled(1e18) - 1e24).abs() / 1e24 < 1e-12);
    }

    #[test]
    fn test_rejects_negative_and_garbage() {
        assert!("-5".parse::<Liquidity>().is_err());
        assert!("".parse::<Liquidity>().is_err());
        assert!("12.5".parse::<Liquidity>().is_err());
        assert!("0x10".parse::<Liquidity>().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let l = Liquidity::from(42u64);
        let json = serde_json::to_string(&l).unwrap();
        assert_eq!(json, "\"42\"");
        let back: Liquidity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, l);

        let from_number: Liquidity = serde_json::from_str("42").unwrap();
        assert_eq!(from_number, l);
        assert!(serde_json::from_str::<Liquidity>("-1").is_err());
    }

    #[test]
    fn test_deserialize_unquoted_big_integer() {
        let l: Liquidity = serde_json::from_str("1000000000000000000000").unwrap();
        assert_eq!(l.to_string(), "1000000000000000000000");
        assert!((l.scaled(1e18) - 1_000.0).abs() < 1e-9);

        let l: Liquidity = serde_json::from_str("1e21").unwrap();
        assert_eq!(l.to_string(), "1000000000000000000000");

        assert!(serde_json::from_str::<Liquidity>("12.5").is_err());
        assert!(serde_json::from_str::<Liquidity>("-1e21").is_err());
    }
}
