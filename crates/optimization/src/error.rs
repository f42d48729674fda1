use lp_nexus_simulation::SimulationError;
use thiserror::Error;

/// Errors returned by the range optimizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizationError {
    /// No candidate ranges were supplied.
    #[error("no candidate ranges to evaluate")]
    NoCandidates,
    /// A candidate simulation failed.
    #[error("candidate simulation failed: {0}")]
    Simulation(#[from] SimulationError),
}
