//! Domain model and pure math for concentrated-liquidity LP positions.
//!
//! This crate provides:
//! - Tick/price conversions on the base-1.0001 tick lattice
//! - Position valuation over a `[tick_lower, tick_upper]` range
//! - Impermanent loss and position performance metrics
//! - Value objects (liquidity, tokens, fee tiers, positions) with
//!   validation at the API boundary

/// Error types.
pub mod error;
/// Tick math and concentrated-liquidity valuation.
pub mod math;
/// Impermanent loss and performance metrics.
pub mod metrics;
/// Value objects.
pub mod value_objects;

pub use error::DomainError;
pub use math::concentrated_liquidity::{ValuationResult, value_at};
pub use math::price_tick::{price_to_tick, tick_to_price};
pub use value_objects::{FeeTier, Liquidity, LiquidityPosition, TokenInfo};
