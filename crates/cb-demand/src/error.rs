use cb_core::StopId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemandError {
    #[error("invalid demand band: {0}")]
    InvalidBand(String),

    #[error("cannot board {requested} passenger(s) at {stop}: only {waiting} waiting")]
    InsufficientWaiting {
        stop:      StopId,
        waiting:   u32,
        requested: u32,
    },
}

pub type DemandResult<T> = Result<T, DemandError>;
