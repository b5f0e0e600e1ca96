use crate::constants::MAX_USER_ID_LEN;

/// Owner of a quota row and its homes
pub struct User;

impl User {
    /// Validate an opaque user id: 1-36 visible ASCII characters
    pub fn validate_id(id: &str) -> bool {
        !id.is_empty() && id.len() <= MAX_USER_ID_LEN && id.chars().all(|c| c.is_ascii_graphic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        // Hyphenated UUID
        assert!(User::validate_id("069a79f4-44e9-4726-a5be-fca90e38aaf5"));
        assert!(User::validate_id("steve"));

        // Too short
        assert!(!User::validate_id(""));

        // Too long
        assert!(!User::validate_id(&"a".repeat(37)));

        // Whitespace and non-ASCII
        assert!(!User::validate_id("has space"));
        assert!(!User::validate_id("ünicode"));
    }
}
