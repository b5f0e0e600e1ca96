pub mod completions;
pub mod health;
pub mod homes;
pub mod limit;
pub mod validation;

pub use completions::completions;
pub use health::health_check;
pub use homes::{delete_home, get_home, list_homes, set_home};
pub use limit::{adjust_limit, get_limit};
pub use validation::{validate_home_name, validate_user_id};

use axum::{routing::get, Router};

use crate::AppState;

/// All API routes, without middleware layers
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/users/:user_id/homes", get(list_homes))
        .route(
            "/api/users/:user_id/homes/:name",
            get(get_home).post(set_home).delete(delete_home),
        )
        .route("/api/users/:user_id/limit", get(get_limit).post(adjust_limit))
        .route("/api/users/:user_id/completions", get(completions))
        .with_state(state)
}
