use sc_core::{CoreError, CraftId};
use sc_craft::CraftError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpaceError {
    #[error("{0} is not in this space")]
    CraftNotFound(CraftId),

    #[error("{0} is already in this space")]
    DuplicateCraft(CraftId),

    #[error("space configuration error: {0}")]
    Config(String),

    #[error("craft error: {0}")]
    Craft(#[from] CraftError),
}

impl From<CoreError> for SpaceError {
    fn from(e: CoreError) -> Self {
        SpaceError::Config(e.to_string())
    }
}

pub type SpaceResult<T> = Result<T, SpaceError>;
