//! Stable exit codes for scaffold CLI commands.

/// Every entry was ensured (or the command completed).
pub const OK: i32 = 0;
/// Invalid entries, an unreadable manifest, or a fatal filesystem error.
pub const FAILURE: i32 = 1;
