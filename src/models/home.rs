use serde::{Deserialize, Serialize};

use crate::constants::MAX_HOME_NAME_LEN;

/// Stored X/Y/Z of a home; the caller resolves which world it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A named home as returned to API callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Home {
    pub name: String,
    #[serde(flatten)]
    pub location: Location,
}

impl Home {
    /// Validate a home name: 1-32 characters of letters, digits, `_` or `-`
    pub fn validate_name(name: &str) -> bool {
        !name.is_empty()
            && name.len() <= MAX_HOME_NAME_LEN
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}
