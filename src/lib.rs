//! Home Store Library
//!
//! Per-user named locations ("homes") with a per-user quota, stored in
//! SQLite, MySQL or PostgreSQL behind one contract.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use config::Config;
pub use db::{connect, Backend, HomeBackend};
pub use error::{AppError, Result};
pub use store::HomeStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: HomeStore,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given store and configuration
    pub fn new(store: HomeStore, config: Config) -> Self {
        Self { store, config }
    }
}
