//! Error types for storage, the recipe store and form validation

use crate::types::RecipeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recipe {0} not found")]
    NotFound(RecipeId),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to serialize recipes: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Form validation failures. The display text is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a recipe name")]
    MissingName,
    #[error("Please enter the total time")]
    MissingTotalTime,
    #[error("Total time must be a whole number of minutes greater than zero")]
    InvalidTotalTime,
    #[error("Total time cannot be more than {max} minutes")]
    TotalTimeTooLong { max: i64 },
    #[error("A recipe needs at least one step")]
    NoSteps,
    #[error("Step {step}: please enter a description")]
    MissingStepDescription { step: usize },
    #[error("Step {step}: please enter the cook time")]
    MissingCookTime { step: usize },
    #[error("Step {step}: cook time must be a whole number of minutes greater than zero")]
    InvalidCookTime { step: usize },
    #[error("Step {step}: cook time cannot be more than {max} minutes")]
    CookTimeTooLong { step: usize, max: i64 },
    #[error("Step {step}: flame intensity must be between 1 and 5")]
    InvalidFlame { step: usize },
}
