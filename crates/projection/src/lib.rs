//! Supply & inflation projection engine.
//!
//! Takes the typed sections of a genesis snapshot and projects, day by day
//! from a reference instant forward, how much of the token supply is locked
//! versus liquid and how inflation-driven issuance grows total and
//! circulating supply. The passes are strictly sequential: classification,
//! schedule construction, supply aggregation, then a stateful day loop whose
//! result depends on the previous day's minter state.

pub mod classify;
pub mod error;
pub mod mint;
pub mod report;
pub mod schedule;
pub mod simulate;
pub mod supply;

pub use classify::{classify_accounts, ContinuousGrant, DelayedGrant, VestingAccounts};
pub use error::ProjectionError;
pub use mint::{MintParams, Minter};
pub use report::{write_ledger, LEDGER_HEADER};
pub use schedule::{unlock_schedule, UnlockSchedule};
pub use simulate::{project, ProjectionRow};
pub use supply::{check_declared, circulating_at_start, total_supply, SupplyCheck};

/// Assumed fixed block interval in seconds. The snapshot's own
/// blocks-per-year figure may assume a different interval and is never used.
pub const SECONDS_PER_BLOCK: i64 = 5;

/// Seconds in one projected day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Block intervals in one projected day.
pub const BLOCKS_PER_DAY: u64 = (SECONDS_PER_DAY / SECONDS_PER_BLOCK) as u64;

/// Provision credits applied per simulated hour (one minute of blocks).
pub const BLOCKS_PER_MINUTE: u64 = (60 / SECONDS_PER_BLOCK) as u64;

/// Hourly minter advancements per simulated day. Hour 0 is never advanced
/// separately; a day opens with the state the previous day closed with.
pub const HOURLY_STEPS_PER_DAY: u32 = 23;

/// Blocks per notional year at the fixed block interval.
pub const fn blocks_per_year() -> u64 {
    BLOCKS_PER_DAY * 365
}

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
