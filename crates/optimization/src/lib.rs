//! Range selection driven by Monte-Carlo simulation.

/// Error types.
pub mod error;
/// Objective functions for ranking simulated outcomes.
pub mod objective;
/// Candidate generation and ranking.
pub mod range_optimizer;

pub use error::OptimizationError;
pub use objective::{
    MaximizeExpectedPnl, MaximizeProbBeatHodl, MaximizeRiskAdjusted, ObjectiveFunction,
};
pub use range_optimizer::{OptimizationResult, RangeOptimizer, RankedCandidate};
