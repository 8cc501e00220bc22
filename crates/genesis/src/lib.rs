//! Genesis snapshot access for Supplycast.
//!
//! Loads a chain genesis document into a generic JSON tree and extracts the
//! sections the projection engine consumes: the account registry, bank
//! balances, validator-creation stake, and the mint parameters and minter
//! state. Account records are handed out untyped; classifying them is the
//! projection engine's job.

pub mod error;
pub mod snapshot;

pub use error::GenesisError;
pub use snapshot::{Balance, MintGenesis, MintParamsGenesis, MinterGenesis, Snapshot};

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
