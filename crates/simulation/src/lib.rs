//! Monte-Carlo projection of concentrated-liquidity positions.
//!
//! This crate provides:
//! - Correlated two-asset GBM sampling with Box–Muller normals
//! - A batch runner producing PNL statistics against a HODL baseline
//! - A heuristic range suggestion
//! - Price path generators for charting

/// Error types.
pub mod error;
/// Monte-Carlo batch runner.
pub mod monte_carlo;
/// Range suggestion heuristic.
pub mod optimal_range;
/// Simulation parameters.
pub mod params;
/// Commonly used re-exports.
pub mod prelude;
/// Price path generators.
pub mod price_path;
/// Batch results.
pub mod result;
/// Random draws.
pub mod sampler;
/// Summary statistics.
pub mod statistics;

pub use error::SimulationError;
pub use monte_carlo::{MonteCarloRunner, run_monte_carlo};
pub use params::SimulationParams;
pub use result::SimulationResult;
