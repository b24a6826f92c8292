//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// Success - operation completed without errors (including "nothing to delete")
pub const SUCCESS: i32 = 0;

/// General error - a registry call or deletion failed
pub const ERROR: i32 = 1;

/// Configuration error - no usable retention policy or a bad config file
pub const CONFIG_ERROR: i32 = 2;

/// Authentication error - no credential supplied
pub const AUTH_ERROR: i32 = 3;

/// Not found - the package does not exist in the repository
pub const NOT_FOUND: i32 = 4;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
