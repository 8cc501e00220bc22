//! Supplycast core types
//!
//! Fixed-point decimal arithmetic used for every token quantity and ratio,
//! plus the scalar aliases shared across the workspace.

pub mod decimal;
pub mod scalars;

pub use decimal::{Dec, DecError, DECIMAL_PLACES};
pub use scalars::{DayOffset, MicroUnit, UnixSeconds};

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
