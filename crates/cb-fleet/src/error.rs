use cb_core::BusId;
use cb_demand::DemandError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    /// A computed transition broke an occupancy invariant.  Always a bug.
    #[error("invariant violated for {bus}: {detail}")]
    InvariantViolation { bus: BusId, detail: String },

    #[error("invalid fleet parameter: {0}")]
    InvalidParameter(String),

    #[error("stop update failed: {0}")]
    Demand(#[from] DemandError),
}

pub type FleetResult<T> = Result<T, FleetError>;
