use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Home, Location, Page};
use crate::routes::{validate_home_name, validate_user_id};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListHomesParams {
    #[serde(default)]
    pub page: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteHomeResponse {
    pub success: bool,
    pub message: String,
}

/// List a user's home names, one page at a time
pub async fn list_homes(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<ListHomesParams>,
) -> Result<Json<Page>> {
    validate_user_id(&user_id)?;

    let names = state.store.list_names(&user_id).await;
    Ok(Json(Page::of(names, params.page)))
}

/// Look up the coordinates of a named home (the teleport target)
pub async fn get_home(
    State(state): State<AppState>,
    Path((user_id, name)): Path<(String, String)>,
) -> Result<Json<Home>> {
    validate_user_id(&user_id)?;

    let location = state
        .store
        .read(&user_id, &name)
        .await
        .ok_or_else(|| AppError::HomeNotFound(name.clone()))?;

    Ok(Json(Home { name, location }))
}

/// Save a new named home
///
/// Existing names are never overwritten; the caller has to delete first.
/// The existence and quota checks are not atomic with the insert, so a
/// concurrent duplicate can still lose at the unique key and report a
/// storage failure.
pub async fn set_home(
    State(state): State<AppState>,
    Path((user_id, name)): Path<(String, String)>,
    Json(location): Json<Location>,
) -> Result<(StatusCode, Json<Home>)> {
    validate_user_id(&user_id)?;
    validate_home_name(&name)?;

    if state.store.exists(&user_id, &name).await {
        return Err(AppError::HomeAlreadyExists(name));
    }

    if !state.store.can_create_more(&user_id).await {
        let limit = state.store.get_limit(&user_id).await;
        tracing::info!(user = %user_id, limit, "Home limit reached");
        return Err(AppError::HomeLimitReached(limit));
    }

    if !state.store.create(&user_id, &name, location).await {
        return Err(AppError::StorageFailure(format!("saving home '{}'", name)));
    }

    tracing::info!(user = %user_id, home = %name, "Home saved");

    Ok((StatusCode::CREATED, Json(Home { name, location })))
}

/// Delete a named home
pub async fn delete_home(
    State(state): State<AppState>,
    Path((user_id, name)): Path<(String, String)>,
) -> Result<Json<DeleteHomeResponse>> {
    validate_user_id(&user_id)?;

    if !state.store.delete(&user_id, &name).await {
        return Err(AppError::HomeNotFound(name));
    }

    Ok(Json(DeleteHomeResponse {
        success: true,
        message: format!("Home '{}' has been deleted", name),
    }))
}
