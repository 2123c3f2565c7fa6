//! Stable exit codes for checklist CLI commands.

/// Command succeeded (including a successful toggle).
pub const OK: i32 = 0;
/// Invalid layout, config, or catalog, or any other error.
pub const INVALID: i32 = 1;
/// `checklist toggle` was rejected because prerequisites are missing.
pub const REJECTED: i32 = 2;
/// The course code is not in the catalog.
pub const UNKNOWN_COURSE: i32 = 3;
