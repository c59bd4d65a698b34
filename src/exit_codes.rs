//! Stable exit codes for `ghgen` commands.

/// Command succeeded, or the user canceled at any confirmation stage.
pub const OK: i32 = 0;
/// Fatal error: bad config/credential, unusable response, failed external call.
pub const FATAL: i32 = 1;
