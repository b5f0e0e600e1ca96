use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::constants::ERR_AMOUNT_NOT_POSITIVE;
use crate::error::{AppError, Result};
use crate::routes::validate_user_id;
use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitAction {
    Add,
    Minus,
}

#[derive(Debug, Deserialize)]
pub struct AdjustLimitRequest {
    pub action: LimitAction,
    pub amount: i32,
}

#[derive(Debug, Serialize)]
pub struct LimitResponse {
    pub limit: i32,
    pub count: i64,
    pub unlimited: bool,
}

#[derive(Debug, Serialize)]
pub struct AdjustLimitResponse {
    pub previous: i32,
    pub limit: i32,
    pub count: i64,
    /// The user already holds more homes than the new limit allows
    #[serde(rename = "overLimit")]
    pub over_limit: bool,
}

/// Compute a new limit from the current one.
///
/// Unlimited (negative) limits are left alone and `minus` never goes below zero.
pub fn apply_adjustment(current: i32, action: LimitAction, amount: i32) -> Result<i32> {
    if amount <= 0 {
        return Err(AppError::InvalidInput(ERR_AMOUNT_NOT_POSITIVE.to_string()));
    }
    if current < 0 {
        return Err(AppError::LimitUnchanged);
    }

    Ok(match action {
        LimitAction::Add => current.saturating_add(amount),
        LimitAction::Minus => (current - amount).max(0),
    })
}

/// Current limit and usage for a user
pub async fn get_limit(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<LimitResponse>> {
    validate_user_id(&user_id)?;

    let limit = state.store.get_limit(&user_id).await;
    let count = state.store.count(&user_id).await;

    Ok(Json(LimitResponse {
        limit,
        count,
        unlimited: limit < 0,
    }))
}

/// Raise or lower a user's home limit
///
/// Lowering below the current home count is allowed; existing homes are kept
/// and the response flags the overage.
pub async fn adjust_limit(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<AdjustLimitRequest>,
) -> Result<Json<AdjustLimitResponse>> {
    validate_user_id(&user_id)?;

    let previous = state.store.get_limit(&user_id).await;
    let limit = apply_adjustment(previous, payload.action, payload.amount)?;

    if !state.store.set_limit(&user_id, limit).await {
        return Err(AppError::StorageFailure(format!(
            "updating home limit for {}",
            user_id
        )));
    }

    let count = state.store.count(&user_id).await;
    let over_limit = count > i64::from(limit);
    if over_limit {
        tracing::info!(
            user = %user_id,
            limit,
            count,
            "New home limit is below the current home count"
        );
    }

    tracing::info!(user = %user_id, previous, limit, "Home limit updated");

    Ok(Json(AdjustLimitResponse {
        previous,
        limit,
        count,
        over_limit,
    }))
}
