use serde::{Deserialize, Serialize};

pub mod impermanent_loss;
pub mod performance;

/// Impermanent loss of a specific position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionIl {
    /// Loss in USD (non-negative magnitude).
    pub il_usd: f64,
    /// Loss as a signed percent, e.g. `-5.7` for a 5.7 % shortfall.
    pub il_percent: f64,
}
