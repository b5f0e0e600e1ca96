use crate::constants::{ERR_INVALID_HOME_NAME, ERR_INVALID_USER_ID};
use crate::error::AppError;
use crate::models::{Home, User};

/// Reject malformed user ids before they reach the store
pub fn validate_user_id(user_id: &str) -> Result<(), AppError> {
    if !User::validate_id(user_id) {
        tracing::warn!("Invalid user ID format: {:?}", user_id);
        return Err(AppError::InvalidInput(ERR_INVALID_USER_ID.to_string()));
    }
    Ok(())
}

/// Reject home names outside 1-32 characters of `[A-Za-z0-9_-]`
pub fn validate_home_name(name: &str) -> Result<(), AppError> {
    if !Home::validate_name(name) {
        return Err(AppError::InvalidInput(ERR_INVALID_HOME_NAME.to_string()));
    }
    Ok(())
}
