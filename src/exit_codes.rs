//! Exit code constants for the docvet CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or undecodable configuration)
//! - 2: Validation failure (the configuration violates the policy)
//! - 3: Policy error (the policy tree itself is malformed)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing or undecodable configuration file.
pub const USER_ERROR: i32 = 1;

/// Validation failure: the configuration violates the active policy.
pub const VALIDATION_FAILURE: i32 = 2;

/// Policy error: the policy tree is malformed (a programming error, not a
/// problem with the validated configuration).
pub const POLICY_FAILURE: i32 = 3;
