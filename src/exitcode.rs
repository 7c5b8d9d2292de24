//! Process exit codes

/// Successful termination
pub const OK: i32 = 0;

/// Any fatal error: usage, I/O, malformed input or arithmetic fault
pub const FAILURE: i32 = 1;
