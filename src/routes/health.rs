use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Health check endpoint
///
/// Reports the deployment environment, which backend is in use and whether
/// its tables were provisioned.
/// An unprovisioned store still answers requests, but with failure defaults.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let provisioned = state.store.is_provisioned();

    Json(json!({
        "status": if provisioned { "healthy" } else { "degraded" },
        "backend": state.store.backend().as_str(),
        "provisioned": provisioned,
        "environment": state.config.environment,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
