//! Input-boundary validation for submitted player forms.

use super::PlayerDraft;
use thiserror::Error;

pub const MAX_NAME_LEN: usize = 50;
pub const MIN_JERSEY_NUMBER: u8 = 1;
pub const MAX_JERSEY_NUMBER: u8 = 99;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid jersey number: {0}. Must be between 1 and 99")]
    InvalidJerseyNumber(u8),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(f32),
}

/// Player form validation utility
pub struct PlayerValidator;

impl PlayerValidator {
    /// Name is required and at most 50 characters once trimmed
    pub fn validate_name(name: &str) -> Result<(), ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidName("Name cannot be empty".to_string()));
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::InvalidName(format!(
                "Name cannot exceed {} characters",
                MAX_NAME_LEN
            )));
        }

        Ok(())
    }

    pub fn validate_jersey_number(number: u8) -> Result<(), ValidationError> {
        if !(MIN_JERSEY_NUMBER..=MAX_JERSEY_NUMBER).contains(&number) {
            return Err(ValidationError::InvalidJerseyNumber(number));
        }
        Ok(())
    }

    pub fn validate_coordinate(value: f32) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidCoordinate(value));
        }
        Ok(())
    }

    pub fn validate_draft(draft: &PlayerDraft) -> Result<(), ValidationError> {
        Self::validate_name(&draft.name)?;
        Self::validate_jersey_number(draft.jersey_number)?;
        Self::validate_coordinate(draft.x)?;
        Self::validate_coordinate(draft.y)?;
        Ok(())
    }
}
