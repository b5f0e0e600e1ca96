//! Quota and home records over any [`HomeBackend`].
//!
//! Every operation is a single independent unit of work and never returns an
//! error: failures are logged with the user and home involved, then reported
//! as `false`, `0`, the default limit, an empty list or `None`.
//!
//! User ids and home names outside the valid domain (see [`User::validate_id`]
//! and [`Home::validate_name`]) never reach the backend; they get the same
//! failure values.
//!
//! Composing calls (check `exists`, check `can_create_more`, then `create`) is
//! not atomic. Two concurrent creations of the same name can both pass the
//! checks; the unique `(user, name)` key makes one of them fail.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::constants::DEFAULT_HOME_LIMIT;
use crate::db::{Backend, HomeBackend};
use crate::models::{Home, Location, User};

#[derive(Clone)]
pub struct HomeStore {
    backend: Arc<dyn HomeBackend>,
    provisioned: Arc<AtomicBool>,
}

impl HomeStore {
    /// Wrap a backend and try to create its tables.
    ///
    /// A provisioning failure is logged and leaves the store usable but
    /// unprovisioned; later calls fall back to their failure values.
    pub async fn new(backend: Arc<dyn HomeBackend>) -> Self {
        let store = Self {
            backend,
            provisioned: Arc::new(AtomicBool::new(false)),
        };
        store.provision_schema().await;
        store
    }

    pub fn backend(&self) -> Backend {
        self.backend.backend()
    }

    /// Whether the tables were confirmed to exist
    pub fn is_provisioned(&self) -> bool {
        self.provisioned.load(Ordering::Relaxed)
    }

    fn accepts_user(&self, user_id: &str) -> bool {
        if User::validate_id(user_id) {
            return true;
        }
        tracing::warn!(backend = %self.backend(), user = user_id, "Rejected invalid user id");
        false
    }

    fn accepts_home(&self, user_id: &str, name: &str) -> bool {
        if !self.accepts_user(user_id) {
            return false;
        }
        if Home::validate_name(name) {
            return true;
        }
        tracing::warn!(
            backend = %self.backend(),
            user = user_id,
            home = name,
            "Rejected invalid home name"
        );
        false
    }

    /// Create both tables if absent. Safe to call repeatedly.
    pub async fn provision_schema(&self) -> bool {
        match self.backend.provision_schema().await {
            Ok(()) => {
                tracing::info!(backend = %self.backend(), "Home tables created or already exist");
                self.provisioned.store(true, Ordering::Relaxed);
                true
            }
            Err(e) => {
                tracing::warn!(backend = %self.backend(), "Failed to create home tables: {}", e);
                false
            }
        }
    }

    /// Insert a default quota row for `user_id` unless one exists
    pub async fn ensure_quota_row(&self, user_id: &str) {
        if !self.accepts_user(user_id) {
            return;
        }
        if let Err(e) = self.backend.ensure_quota_row(user_id).await {
            tracing::warn!(
                backend = %self.backend(),
                user = user_id,
                "Failed to ensure quota row: {}",
                e
            );
        }
    }

    /// The user's home limit; negative means unlimited
    pub async fn get_limit(&self, user_id: &str) -> i32 {
        if !self.accepts_user(user_id) {
            return DEFAULT_HOME_LIMIT;
        }
        self.ensure_quota_row(user_id).await;
        match self.backend.home_limit(user_id).await {
            Ok(limit) => limit.unwrap_or(DEFAULT_HOME_LIMIT),
            Err(e) => {
                tracing::warn!(
                    backend = %self.backend(),
                    user = user_id,
                    "Failed to read home limit: {}",
                    e
                );
                DEFAULT_HOME_LIMIT
            }
        }
    }

    pub async fn set_limit(&self, user_id: &str, limit: i32) -> bool {
        if !self.accepts_user(user_id) {
            return false;
        }
        self.ensure_quota_row(user_id).await;
        match self.backend.update_home_limit(user_id, limit).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    backend = %self.backend(),
                    user = user_id,
                    limit,
                    "Failed to update home limit: {}",
                    e
                );
                false
            }
        }
    }

    pub async fn count(&self, user_id: &str) -> i64 {
        if !self.accepts_user(user_id) {
            return 0;
        }
        self.backend.count_homes(user_id).await.unwrap_or_else(|e| {
            tracing::warn!(
                backend = %self.backend(),
                user = user_id,
                "Failed to count homes: {}",
                e
            );
            0
        })
    }

    pub async fn exists(&self, user_id: &str, name: &str) -> bool {
        if !self.accepts_home(user_id, name) {
            return false;
        }
        self.backend
            .home_exists(user_id, name)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(
                    backend = %self.backend(),
                    user = user_id,
                    home = name,
                    "Failed to check existing home: {}",
                    e
                );
                false
            })
    }

    /// True when the limit is negative or the user is below it.
    /// An invalid user id can never create, so it gets `false`.
    pub async fn can_create_more(&self, user_id: &str) -> bool {
        if !self.accepts_user(user_id) {
            return false;
        }
        let limit = self.get_limit(user_id).await;
        if limit < 0 {
            return true;
        }
        self.count(user_id).await < i64::from(limit)
    }

    /// Insert a new home. Never overwrites and never checks the quota;
    /// a duplicate name fails at the unique key and returns `false`.
    pub async fn create(&self, user_id: &str, name: &str, location: Location) -> bool {
        if !self.accepts_home(user_id, name) {
            return false;
        }
        self.ensure_quota_row(user_id).await;
        match self.backend.insert_home(user_id, name, location).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    backend = %self.backend(),
                    user = user_id,
                    home = name,
                    "Failed to insert home: {}",
                    e
                );
                false
            }
        }
    }

    pub async fn read(&self, user_id: &str, name: &str) -> Option<Location> {
        if !self.accepts_home(user_id, name) {
            return None;
        }
        self.backend
            .find_home(user_id, name)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(
                    backend = %self.backend(),
                    user = user_id,
                    home = name,
                    "Failed to read home: {}",
                    e
                );
                None
            })
    }

    /// Returns whether a row was actually removed
    pub async fn delete(&self, user_id: &str, name: &str) -> bool {
        if !self.accepts_home(user_id, name) {
            return false;
        }
        match self.backend.delete_home(user_id, name).await {
            Ok(rows) => rows > 0,
            Err(e) => {
                tracing::warn!(
                    backend = %self.backend(),
                    user = user_id,
                    home = name,
                    "Failed to delete home: {}",
                    e
                );
                false
            }
        }
    }

    /// All of the user's home names, case-insensitive ascending
    pub async fn list_names(&self, user_id: &str) -> Vec<String> {
        if !self.accepts_user(user_id) {
            return Vec::new();
        }
        self.backend.home_names(user_id).await.unwrap_or_else(|e| {
            tracing::warn!(
                backend = %self.backend(),
                user = user_id,
                "Failed to list homes: {}",
                e
            );
            Vec::new()
        })
    }

    /// Drop the user's quota row together with every home they own
    pub async fn remove_user(&self, user_id: &str) -> bool {
        if !self.accepts_user(user_id) {
            return false;
        }
        match self.backend.delete_quota_row(user_id).await {
            Ok(rows) => rows > 0,
            Err(e) => {
                tracing::warn!(
                    backend = %self.backend(),
                    user = user_id,
                    "Failed to remove quota row: {}",
                    e
                );
                false
            }
        }
    }
}
