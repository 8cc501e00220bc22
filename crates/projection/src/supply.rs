//! Supply aggregation.
//!
//! Total supply at the reference instant is every liquid balance plus every
//! vesting grant's full original amount — the grants already exist in supply
//! since genesis whether or not they have vested. Balances held by a vesting
//! address are excluded from the liquid side so a grant is never counted
//! twice.

use crate::classify::VestingAccounts;
use crate::schedule::UnlockSchedule;
use supplycast_genesis::Balance;
use supplycast_types::{Dec, MicroUnit};
use tracing::{info, warn};

/// Total token supply at the reference instant.
pub fn total_supply(balances: &[Balance], accounts: &VestingAccounts) -> Dec {
    let mut total = Dec::zero();

    for balance in balances {
        if accounts.contains(&balance.address) {
            continue;
        }
        total += &Dec::from_int(balance.amount);
    }

    for grant in accounts.continuous.values() {
        total += &Dec::from_int(grant.amount);
    }
    for grant in accounts.delayed.values() {
        total += &Dec::from_int(grant.amount);
    }

    total
}

/// Outcome of cross-checking the computed total against the snapshot's own
/// declared figure. A mismatch is a diagnostic, never a run failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyCheck {
    pub computed: Dec,
    pub declared: Option<MicroUnit>,
}

impl SupplyCheck {
    /// True when no declared figure exists or the figures agree.
    pub fn consistent(&self) -> bool {
        match self.declared {
            Some(declared) => self.computed == Dec::from_int(declared),
            None => true,
        }
    }
}

/// Compare the computed total supply with the snapshot's declared one,
/// logging the result.
pub fn check_declared(computed: &Dec, declared: Option<MicroUnit>) -> SupplyCheck {
    let check = SupplyCheck {
        computed: computed.clone(),
        declared,
    };
    match declared {
        Some(declared) if !check.consistent() => {
            warn!(%computed, declared, "computed total supply disagrees with the snapshot");
        }
        Some(_) => info!(%computed, "total supply matches the snapshot's declared figure"),
        None => info!(%computed, "snapshot declares no total supply to check against"),
    }
    check
}

/// Circulating supply on day 0: everything still scheduled to unlock is
/// excluded; grants that were already fully vested never entered the schedule
/// and are implicitly circulating.
pub fn circulating_at_start(total: &Dec, schedule: &UnlockSchedule) -> Dec {
    let locked = schedule.values().fold(Dec::zero(), |acc, v| acc + v);
    total.clone() - locked
}
