use cb_core::CoreError;
use cb_demand::DemandError;
use cb_fleet::FleetError;
use cb_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("demand error: {0}")]
    Demand(#[from] DemandError),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),

    /// A whole-network check failed after a tick.
    #[error("invariant violated after tick {tick}: {detail}")]
    InvariantViolation { tick: u64, detail: String },
}

pub type SimResult<T> = Result<T, SimError>;
