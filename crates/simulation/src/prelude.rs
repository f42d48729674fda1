//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use lp_nexus_simulation::prelude::*;
//! ```

// Errors
pub use crate::error::SimulationError;

// Monte Carlo
pub use crate::monte_carlo::{MonteCarloRunner, TrialOutcome, run_monte_carlo};

// Parameters and results
pub use crate::params::{DEFAULT_LIQUIDITY_SCALE, SimulationParams};
pub use crate::result::SimulationResult;

// Range heuristic
pub use crate::optimal_range::{OptimalRange, find_optimal_range};

// Price path generators
pub use crate::price_path::{
    DeterministicPricePath, GeometricBrownianMotion, PricePathGenerator, price_fan,
};

// Statistics
pub use crate::statistics::{HISTOGRAM_BUCKETS, Histogram};
