//! Monetary policy engine.
//!
//! A single-state machine: the current inflation rate and annual provisions,
//! advanced by a pure step that pulls the rate toward higher inflation while
//! the bonded ratio sits below its goal and toward lower inflation above it,
//! always clamped into `[inflation_min, inflation_max]`.

use crate::error::ProjectionError;
use crate::blocks_per_year;
use num_bigint::BigInt;
use supplycast_genesis::{MintParamsGenesis, MinterGenesis};
use supplycast_types::Dec;
use tracing::debug;

/// Policy parameters, immutable for a run.
#[derive(Debug, Clone)]
pub struct MintParams {
    pub mint_denom: String,
    pub inflation_rate_change: Dec,
    pub inflation_max: Dec,
    pub inflation_min: Dec,
    pub goal_bonded: Dec,
    pub blocks_per_year: u64,
}

impl MintParams {
    /// Adopt the snapshot's parameters, except `blocks_per_year`, which is
    /// always recomputed from the fixed block interval — the snapshot's own
    /// figure may assume a different interval.
    pub fn from_genesis(genesis: &MintParamsGenesis) -> Self {
        let recomputed = blocks_per_year();
        if genesis.blocks_per_year != recomputed {
            debug!(
                declared = genesis.blocks_per_year,
                recomputed, "overriding snapshot blocks_per_year"
            );
        }
        Self {
            mint_denom: genesis.mint_denom.clone(),
            inflation_rate_change: genesis.inflation_rate_change.clone(),
            inflation_max: genesis.inflation_max.clone(),
            inflation_min: genesis.inflation_min.clone(),
            goal_bonded: genesis.goal_bonded.clone(),
            blocks_per_year: recomputed,
        }
    }
}

/// Mutable minter state, owned by the simulator for the run's duration.
#[derive(Debug, Clone)]
pub struct Minter {
    pub inflation: Dec,
    pub annual_provisions: Dec,
}

impl Minter {
    pub fn from_genesis(genesis: &MinterGenesis) -> Self {
        Self {
            inflation: genesis.inflation.clone(),
            annual_provisions: genesis.annual_provisions.clone(),
        }
    }

    /// One step of the rate adjustment: the annual change
    /// `(1 − bonded_ratio / goal_bonded) × inflation_rate_change` is applied
    /// at per-block granularity and the result clamped into
    /// `[inflation_min, inflation_max]`.
    pub fn next_inflation_rate(
        &self,
        params: &MintParams,
        bonded_ratio: &Dec,
    ) -> Result<Dec, ProjectionError> {
        let change_per_year = (Dec::one() - bonded_ratio.div(&params.goal_bonded)?)
            .mul(&params.inflation_rate_change);
        let change = change_per_year.div(&Dec::from_int(params.blocks_per_year))?;

        Ok((self.inflation.clone() + change).clamp(&params.inflation_min, &params.inflation_max))
    }

    /// Provisions for a notional year at the current rate. `total_supply` is
    /// the whole-unit supply (rounded by the caller).
    pub fn next_annual_provisions(&self, total_supply: &BigInt) -> Dec {
        self.inflation.mul_int(total_supply)
    }

    /// Whole-unit issuance attributed to a single block: annual provisions
    /// divided across the year's blocks, truncated.
    pub fn block_provision(&self, params: &MintParams) -> Result<BigInt, ProjectionError> {
        let provision = self
            .annual_provisions
            .div_int(&BigInt::from(params.blocks_per_year))?;
        Ok(provision.truncate_int())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    fn fixture_params() -> MintParams {
        MintParams {
            mint_denom: "utok".into(),
            inflation_rate_change: dec("1.0"),
            inflation_max: dec("0.14"),
            inflation_min: dec("0.07"),
            goal_bonded: dec("0.33"),
            blocks_per_year: blocks_per_year(),
        }
    }

    fn fixture_minter() -> Minter {
        Minter {
            inflation: dec("0.13"),
            annual_provisions: Dec::zero(),
        }
    }

    #[test]
    fn rate_moves_up_below_goal_and_down_above() {
        let params = fixture_params();
        let minter = fixture_minter();

        let up = minter.next_inflation_rate(&params, &dec("0.1")).unwrap();
        assert!(up > minter.inflation);

        let down = minter.next_inflation_rate(&params, &dec("0.5")).unwrap();
        assert!(down < minter.inflation);
    }

    #[test]
    fn one_step_produces_the_expected_rate() {
        let params = fixture_params();
        let minter = fixture_minter();
        let ratio = dec("1000000")
            .div(&dec("11582258000000"))
            .unwrap();

        let next = minter.next_inflation_rate(&params, &ratio).unwrap();
        assert_eq!(next.to_string(), "0.130000158548918437");
    }

    #[test]
    fn rate_is_clamped_at_both_bounds() {
        // a one-block year makes the full annual adjustment land in one step
        let mut params = fixture_params();
        params.blocks_per_year = 1;
        let minter = fixture_minter();

        let at_max = minter.next_inflation_rate(&params, &Dec::zero()).unwrap();
        assert_eq!(at_max, params.inflation_max);

        let at_min = minter.next_inflation_rate(&params, &dec("3.3")).unwrap();
        assert_eq!(at_min, params.inflation_min);
    }

    #[test]
    fn zero_goal_bonded_is_a_division_error() {
        let mut params = fixture_params();
        params.goal_bonded = Dec::zero();
        let minter = fixture_minter();

        assert!(matches!(
            minter.next_inflation_rate(&params, &dec("0.1")),
            Err(ProjectionError::Arithmetic(_))
        ));
    }

    #[test]
    fn block_provision_truncates_to_whole_units() {
        let params = fixture_params();
        let mut minter = fixture_minter();
        minter.annual_provisions =
            minter.next_annual_provisions(&BigInt::from(11_582_258_000_000u64));

        assert_eq!(minter.annual_provisions.to_string(), "1505693540000.000000000000000000");
        assert_eq!(minter.block_provision(&params).unwrap(), BigInt::from(238_726));
    }

    #[test]
    fn blocks_per_year_is_always_recomputed() {
        let genesis = MintParamsGenesis {
            mint_denom: "utok".into(),
            inflation_rate_change: dec("1.0"),
            inflation_max: dec("0.14"),
            inflation_min: dec("0.07"),
            goal_bonded: dec("0.33"),
            blocks_per_year: 4_360_000, // snapshot assumes a different interval
        };
        let params = MintParams::from_genesis(&genesis);
        assert_eq!(params.blocks_per_year, 6_307_200);
    }

    proptest! {
        #[test]
        fn rate_stays_within_bounds_for_any_ratio(numer in 0u64..10_000_000, start in 70u64..140) {
            let params = fixture_params();
            let minter = Minter {
                // any starting rate already inside the band
                inflation: Dec::from_int(start).div(&Dec::from_int(1_000u64)).unwrap(),
                annual_provisions: Dec::zero(),
            };
            // bonded ratios from 0 up to 10_000x the goal
            let ratio = Dec::from_int(numer).div(&Dec::from_int(1_000u64)).unwrap();

            let next = minter.next_inflation_rate(&params, &ratio).unwrap();
            prop_assert!(next >= params.inflation_min);
            prop_assert!(next <= params.inflation_max);
        }
    }
}
