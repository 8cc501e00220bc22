//! Day-by-day projection loop.
//!
//! Strictly sequential: each day's minter state and accumulators are a
//! function of the previous day's, so the loop must not be reordered or
//! parallelized. The simulated horizon is the schedule padded to a contiguous
//! range — gap days advance the policy state but emit no row.

use crate::error::ProjectionError;
use crate::mint::{MintParams, Minter};
use crate::schedule::UnlockSchedule;
use crate::supply::circulating_at_start;
use crate::{BLOCKS_PER_MINUTE, HOURLY_STEPS_PER_DAY};
use supplycast_types::{DayOffset, Dec, MicroUnit};
use tracing::info;

/// One emitted ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionRow {
    pub day: DayOffset,
    pub unlocked: Dec,
    pub inflation: Dec,
    pub staking_rewards: Dec,
    pub circulating_supply: Dec,
    pub total_supply: Dec,
}

/// Run the projection over the full horizon of `schedule`.
///
/// Row 0 is a snapshot of the opening state: the unadvanced inflation rate,
/// zero rewards, and circulating supply with every scheduled unlock excluded.
/// Day 0's own advancement and unlock are folded into the run but emit no
/// second row. Each later row is emitted after that day's 23 hourly policy
/// steps and its scheduled unlock.
pub fn project(
    schedule: &UnlockSchedule,
    total_supply: Dec,
    staked: MicroUnit,
    params: &MintParams,
    mut minter: Minter,
) -> Result<Vec<ProjectionRow>, ProjectionError> {
    let mut total = total_supply;
    let mut circulating = circulating_at_start(&total, schedule);
    let mut rewards = Dec::zero();
    let staked = Dec::from_int(staked);

    let mut rows = Vec::with_capacity(schedule.len() + 1);
    rows.push(ProjectionRow {
        day: 0,
        unlocked: Dec::zero(),
        inflation: minter.inflation.clone(),
        staking_rewards: rewards.clone(),
        circulating_supply: circulating.clone(),
        total_supply: total.clone(),
    });

    let Some(last_day) = schedule.keys().next_back().copied() else {
        return Ok(rows);
    };

    for day in 0..=last_day {
        if total.is_zero() {
            return Err(ProjectionError::ZeroTotalSupply);
        }
        // staked tokens are a fixed input; only the denominator moves
        let bonded_ratio = staked.div(&total)?;

        for _hour in 0..HOURLY_STEPS_PER_DAY {
            minter.inflation = minter.next_inflation_rate(params, &bonded_ratio)?;
            minter.annual_provisions = minter.next_annual_provisions(&total.round_int());
            let provision = Dec::from_int(minter.block_provision(params)?);

            for _block in 0..BLOCKS_PER_MINUTE {
                rewards += &provision;
                circulating += &provision;
                total += &provision;
            }
        }

        if let Some(unlocked) = schedule.get(&day) {
            circulating += unlocked;
            if day != 0 {
                rows.push(ProjectionRow {
                    day,
                    unlocked: unlocked.clone(),
                    inflation: minter.inflation.clone(),
                    staking_rewards: rewards.clone(),
                    circulating_supply: circulating.clone(),
                    total_supply: total.clone(),
                });
            }
        }
    }

    info!(
        rows = rows.len(),
        horizon = last_day,
        "projection complete"
    );
    Ok(rows)
}
