use lp_nexus_domain::DomainError;
use thiserror::Error;

/// Errors returned by the Monte-Carlo simulator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Parameters failed boundary validation.
    #[error("invalid simulation parameters: {0}")]
    InvalidParameters(#[from] DomainError),
    /// The batch was aborted between trials.
    #[error("simulation cancelled after {completed} of {total} trials")]
    Cancelled {
        /// Trials finished before the abort was observed.
        completed: usize,
        /// Trials requested.
        total: usize,
    },
}
