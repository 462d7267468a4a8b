/// Constants used throughout the ownhandle workspace
// Environment variable names
pub const OWNHANDLE_CLEANUP_POLICY_VAR: &str = "OWNHANDLE_CLEANUP_POLICY";

// Policy names as accepted by `CleanupPolicy::from_str`
pub const POLICY_LOG: &str = "log";
pub const POLICY_PANIC: &str = "panic";
pub const POLICY_ABORT: &str = "abort";
