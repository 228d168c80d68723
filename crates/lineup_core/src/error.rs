use thiserror::Error;

use crate::crop::CropError;
use crate::models::ValidationError;
use crate::save::SaveError;

#[derive(Error, Debug)]
pub enum LineupError {
    #[error("Invalid player: {0}")]
    Validation(#[from] ValidationError),

    #[error("Player not found: {id}")]
    PlayerNotFound { id: String },

    #[error("Unknown formation: {id}")]
    UnknownFormation { id: String },

    #[error("Photo crop failed: {0}")]
    Crop(#[from] CropError),

    #[error("Save error: {0}")]
    Save(#[from] SaveError),
}

impl LineupError {
    /// Errors the editor reports but treats as a no-op on the team.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, LineupError::PlayerNotFound { .. } | LineupError::UnknownFormation { .. })
    }
}

pub type Result<T> = std::result::Result<T, LineupError>;
