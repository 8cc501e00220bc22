//! Scalar aliases shared across the workspace.

/// Unix timestamp in whole seconds.
pub type UnixSeconds = i64;

/// Whole days elapsed since the reference instant (0 = reference day).
pub type DayOffset = u64;

/// Token amount in the chain's smallest denomination (micro-units).
pub type MicroUnit = u128;
