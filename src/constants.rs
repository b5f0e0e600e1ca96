/// Home limit given to a user the first time they are seen
pub const DEFAULT_HOME_LIMIT: i32 = 3;

/// Maximum length of a home name
pub const MAX_HOME_NAME_LEN: usize = 32;

/// Maximum length of a user id (a hyphenated UUID fits exactly)
pub const MAX_USER_ID_LEN: usize = 36;

/// Home names shown per page of the list endpoint
/// Matches a 54-slot inventory: 45 entries + 9 navigation slots
pub const PAGE_CAPACITY: usize = 45;

/// Separator used when MySQL packs a name list into one string.
/// Valid home names never contain it.
pub const NAME_LIST_SEPARATOR: char = ',';

/// Subcommands offered as the first completion argument
pub const SUBCOMMANDS: [&str; 4] = ["set", "tp", "delete", "limit"];

/// Actions accepted by the limit endpoint
pub const LIMIT_ACTIONS: [&str; 2] = ["add", "minus"];

/// Amounts suggested when completing `limit <action> <player> <amount>`
pub const LIMIT_AMOUNT_SUGGESTIONS: [&str; 5] = ["1", "2", "3", "5", "10"];

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for invalid user ID format
pub const ERR_INVALID_USER_ID: &str = "User ID must be 1-36 visible ASCII characters";

/// Error message for invalid home names
pub const ERR_INVALID_HOME_NAME: &str =
    "Invalid home name. Use 1-32 letters, numbers, underscores, or dashes";

/// Error message for a non-positive limit adjustment
pub const ERR_AMOUNT_NOT_POSITIVE: &str = "Amount must be greater than zero";
