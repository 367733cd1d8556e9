use tankfarm_errors::{AppError, FieldError};
use thiserror::Error;

use crate::domain::value_objects::{MovementId, PropertyId, TankId};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Tank not found: {0}")]
    TankNotFound(TankId),
    #[error("Movement not found: {0}")]
    MovementNotFound(MovementId),
    #[error("Property not found: {0}")]
    PropertyNotFound(PropertyId),
    #[error("A tank named '{0}' already exists")]
    DuplicateTankName(String),
    #[error("A property named '{0}' already exists")]
    DuplicatePropertyName(String),
    #[error("Request rejected with {} violation(s)", .0.len())]
    Rejected(Vec<FieldError>),
}

impl From<InventoryError> for AppError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::TankNotFound(_)
            | InventoryError::MovementNotFound(_)
            | InventoryError::PropertyNotFound(_) => AppError::NotFound(error.to_string()),
            InventoryError::DuplicateTankName(_) | InventoryError::DuplicatePropertyName(_) => {
                AppError::Conflict(error.to_string())
            }
            InventoryError::Rejected(errors) => AppError::ValidationFailed(errors),
        }
    }
}
