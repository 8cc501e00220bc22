//! Vesting unlock schedule.
//!
//! Buckets every grant into integer day offsets from the reference instant.
//! Delayed grants land whole on a single day; continuous grants contribute a
//! constant per-day rate derived from the grant's full span — the rate is not
//! decayed against the remaining principal, and the per-block amount is a
//! truncating integer division. Both are deliberate characteristics of the
//! projection, carried over unchanged.

use crate::classify::VestingAccounts;
use crate::error::ProjectionError;
use crate::{BLOCKS_PER_DAY, SECONDS_PER_BLOCK, SECONDS_PER_DAY};
use std::collections::BTreeMap;
use supplycast_types::{DayOffset, Dec, MicroUnit, UnixSeconds};
use tracing::debug;

/// Day offset → aggregate amount unlocking on that day. Sparse: only days on
/// which at least one grant unlocks are present.
pub type UnlockSchedule = BTreeMap<DayOffset, Dec>;

/// Build the per-day unlock schedule for all classified grants, relative to
/// the explicit reference instant `now`.
pub fn unlock_schedule(
    accounts: &VestingAccounts,
    now: UnixSeconds,
) -> Result<UnlockSchedule, ProjectionError> {
    let mut schedule = UnlockSchedule::new();

    for grant in accounts.continuous.values() {
        // A grant that has not begun vesting is omitted from the schedule
        // (while its original amount still counts toward total supply).
        if grant.start_time > now {
            debug!(address = %grant.address, "continuous grant not yet started, skipped");
            continue;
        }

        let duration = grant.end_time - grant.start_time;
        if duration <= 0 {
            return Err(ProjectionError::InvalidVestingDuration(grant.address.clone()));
        }
        let chunks = (duration / SECONDS_PER_BLOCK) as MicroUnit;
        if chunks == 0 {
            return Err(ProjectionError::InvalidVestingDuration(grant.address.clone()));
        }

        // Truncating division on the whole-unit amount; the remainder is
        // dropped, a small and accepted discrepancy.
        let per_block = grant.amount / chunks;
        let per_day = Dec::from_int(per_block * BLOCKS_PER_DAY as MicroUnit);

        let days_left = (grant.end_time - now).div_euclid(SECONDS_PER_DAY);
        if days_left < 0 {
            continue; // span already fully elapsed
        }
        for day in 0..=days_left as DayOffset {
            *schedule.entry(day).or_insert_with(Dec::zero) += &per_day;
        }
    }

    for grant in accounts.delayed.values() {
        if grant.end_time <= now {
            continue; // already fully vested
        }
        let day = ((grant.end_time - now) / SECONDS_PER_DAY) as DayOffset;
        *schedule.entry(day).or_insert_with(Dec::zero) += &Dec::from_int(grant.amount);
    }

    debug!(days = schedule.len(), "built unlock schedule");
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{ContinuousGrant, DelayedGrant};

    const NOW: UnixSeconds = 1_669_222_800;

    fn with_delayed(grant: DelayedGrant) -> VestingAccounts {
        let mut accounts = VestingAccounts::default();
        accounts.delayed.insert(grant.address.clone(), grant);
        accounts
    }

    fn with_continuous(grant: ContinuousGrant) -> VestingAccounts {
        let mut accounts = VestingAccounts::default();
        accounts.continuous.insert(grant.address.clone(), grant);
        accounts
    }

    #[test]
    fn delayed_grant_unlocks_whole_on_one_day() {
        let accounts = with_delayed(DelayedGrant {
            address: "del".into(),
            amount: 309_282_000_000,
            end_time: 1_676_480_400, // 84 days after NOW
        });
        let schedule = unlock_schedule(&accounts, NOW).unwrap();

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[&84], Dec::from_int(309_282_000_000u64));
    }

    #[test]
    fn delayed_grant_at_or_before_now_is_already_vested() {
        for end in [NOW, NOW - 1] {
            let accounts = with_delayed(DelayedGrant {
                address: "del".into(),
                amount: 1_000,
                end_time: end,
            });
            assert!(unlock_schedule(&accounts, NOW).unwrap().is_empty());
        }
    }

    #[test]
    fn continuous_grant_spreads_a_constant_daily_rate() {
        let accounts = with_continuous(ContinuousGrant {
            address: "con".into(),
            amount: 11_250_000_000_000,
            start_time: 1_660_582_800,
            end_time: 1_739_638_800, // 815 days after NOW
        });
        let schedule = unlock_schedule(&accounts, NOW).unwrap();

        // duration 79_056_000 s -> 15_811_200 blocks -> 711_520/block -> 17_280 blocks/day
        let per_day = Dec::from_int(12_295_065_600u64);
        assert_eq!(schedule.len(), 816);
        assert_eq!(schedule[&0], per_day);
        assert_eq!(schedule[&400], per_day);
        assert_eq!(schedule[&815], per_day);

        // Truncation keeps the scheduled total at or below the grant.
        let sum = schedule
            .values()
            .fold(Dec::zero(), |acc, v| acc + v);
        assert!(sum <= Dec::from_int(11_250_000_000_000u64));
    }

    #[test]
    fn continuous_grant_not_yet_started_is_skipped() {
        let accounts = with_continuous(ContinuousGrant {
            address: "con".into(),
            amount: 1_000_000,
            start_time: NOW + 10,
            end_time: NOW + 1_000_000,
        });
        assert!(unlock_schedule(&accounts, NOW).unwrap().is_empty());
    }

    #[test]
    fn continuous_grant_fully_elapsed_contributes_nothing() {
        let accounts = with_continuous(ContinuousGrant {
            address: "con".into(),
            amount: 1_000_000,
            start_time: NOW - 200_000,
            end_time: NOW - 100_000, // more than a day in the past
        });
        assert!(unlock_schedule(&accounts, NOW).unwrap().is_empty());
    }

    #[test]
    fn non_positive_duration_is_fatal() {
        // zero-length span, and an end before the start
        for end_offset in [0, -1_000] {
            let accounts = with_continuous(ContinuousGrant {
                address: "con".into(),
                amount: 1_000,
                start_time: NOW - 500_000,
                end_time: NOW - 500_000 + end_offset,
            });
            assert!(matches!(
                unlock_schedule(&accounts, NOW),
                Err(ProjectionError::InvalidVestingDuration(addr)) if addr == "con"
            ));
        }
    }

    #[test]
    fn overlapping_grants_accumulate_per_day() {
        let mut accounts = with_continuous(ContinuousGrant {
            address: "con".into(),
            amount: 17_280_000, // 100 units per block over 10 days
            start_time: NOW,
            end_time: NOW + 10 * SECONDS_PER_DAY,
        });
        accounts.delayed.insert(
            "del".into(),
            DelayedGrant {
                address: "del".into(),
                amount: 500,
                end_time: NOW + 2 * SECONDS_PER_DAY + 1,
            },
        );
        let schedule = unlock_schedule(&accounts, NOW).unwrap();

        let per_day = Dec::from_int(100u64 * 17_280);
        assert_eq!(schedule[&1], per_day);
        assert_eq!(schedule[&2], per_day.clone() + Dec::from_int(500u64));
        assert!(schedule.values().all(|v| !v.is_negative()));
    }
}
