use sc_core::{CraftId, GeometryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CraftError {
    #[error("craft dimensions must be positive and finite (length {length}, width {width})")]
    InvalidDimensions { length: f64, width: f64 },

    #[error("non-finite actuation (steering {steering}, acceleration {acceleration})")]
    NonFiniteAction { steering: f64, acceleration: f64 },

    #[error("{0} has a non-finite position, heading, or velocity")]
    NonFiniteState(CraftId),

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("{0} is an obstacle and cannot be actuated")]
    ObstacleActuation(CraftId),

    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("collision geometry: {0}")]
    Geometry(#[from] GeometryError),
}

pub type CraftResult<T> = Result<T, CraftError>;
