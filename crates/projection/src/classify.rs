//! Account classification.
//!
//! Partitions the snapshot's heterogeneous account records into the two
//! time-locked categories by their declared type tag. Plain accounts carry no
//! lock and are skipped here; their balances enter the projection through the
//! bank section instead. The vesting model is closed: a record that is
//! neither plain, delayed, nor continuous is rejected rather than folded into
//! a default bucket.

use crate::error::ProjectionError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;
use supplycast_types::{MicroUnit, UnixSeconds};

const BASE_ACCOUNT: &str = "/cosmos.auth.v1beta1.BaseAccount";
const CONTINUOUS_VESTING_ACCOUNT: &str = "/cosmos.vesting.v1beta1.ContinuousVestingAccount";
const DELAYED_VESTING_ACCOUNT: &str = "/cosmos.vesting.v1beta1.DelayedVestingAccount";

/// A grant that unlocks entirely and atomically at `end_time`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedGrant {
    pub address: String,
    pub amount: MicroUnit,
    pub end_time: UnixSeconds,
}

/// A grant that unlocks linearly between `start_time` and `end_time`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuousGrant {
    pub address: String,
    pub amount: MicroUnit,
    pub start_time: UnixSeconds,
    pub end_time: UnixSeconds,
}

/// The classified vesting accounts, keyed by address. The two maps are
/// disjoint by construction.
#[derive(Debug, Clone, Default)]
pub struct VestingAccounts {
    pub continuous: BTreeMap<String, ContinuousGrant>,
    pub delayed: BTreeMap<String, DelayedGrant>,
}

impl VestingAccounts {
    /// Whether any vesting grant is registered under `address`.
    pub fn contains(&self, address: &str) -> bool {
        self.continuous.contains_key(address) || self.delayed.contains_key(address)
    }

    /// Total number of classified vesting accounts.
    pub fn len(&self) -> usize {
        self.continuous.len() + self.delayed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.continuous.is_empty() && self.delayed.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CoinJson {
    #[allow(dead_code)]
    denom: String,
    #[serde(deserialize_with = "amount_str")]
    amount: MicroUnit,
}

#[derive(Debug, Deserialize)]
struct BaseAccountJson {
    address: String,
}

#[derive(Debug, Deserialize)]
struct BaseVestingJson {
    base_account: BaseAccountJson,
    original_vesting: Vec<CoinJson>,
    #[serde(deserialize_with = "unix_str")]
    end_time: UnixSeconds,
}

#[derive(Debug, Deserialize)]
struct DelayedAccountJson {
    base_vesting_account: BaseVestingJson,
}

#[derive(Debug, Deserialize)]
struct ContinuousAccountJson {
    base_vesting_account: BaseVestingJson,
    #[serde(deserialize_with = "unix_str")]
    start_time: UnixSeconds,
}

fn amount_str<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<MicroUnit, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

fn unix_str<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<UnixSeconds, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

/// Taking the first vesting coin mirrors the single-denomination assumption;
/// a grant with no coins at all is malformed.
fn original_amount(base: &BaseVestingJson) -> Result<MicroUnit, ProjectionError> {
    base.original_vesting
        .first()
        .map(|coin| coin.amount)
        .ok_or_else(|| ProjectionError::MissingVestingAmount(base.base_account.address.clone()))
}

fn record_address(record: &Value) -> String {
    record
        .pointer("/base_vesting_account/base_account/address")
        .or_else(|| record.pointer("/address"))
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string()
}

/// Partition the account-registry records into the delayed and continuous
/// maps. Any decoding failure is fatal; there is no partial mode.
pub fn classify_accounts(records: &[Value]) -> Result<VestingAccounts, ProjectionError> {
    let mut accounts = VestingAccounts::default();

    for record in records {
        let tag = record
            .get("@type")
            .and_then(Value::as_str)
            .ok_or(ProjectionError::MissingTypeTag)?;

        match tag {
            BASE_ACCOUNT => continue,
            CONTINUOUS_VESTING_ACCOUNT => {
                let decoded: ContinuousAccountJson = serde_json::from_value(record.clone())
                    .map_err(ProjectionError::MalformedAccount)?;
                let amount = original_amount(&decoded.base_vesting_account)?;
                let address = decoded.base_vesting_account.base_account.address;
                if accounts.contains(&address) {
                    return Err(ProjectionError::DuplicateAddress(address));
                }
                accounts.continuous.insert(
                    address.clone(),
                    ContinuousGrant {
                        address,
                        amount,
                        start_time: decoded.start_time,
                        end_time: decoded.base_vesting_account.end_time,
                    },
                );
            }
            DELAYED_VESTING_ACCOUNT => {
                let decoded: DelayedAccountJson = serde_json::from_value(record.clone())
                    .map_err(ProjectionError::MalformedAccount)?;
                let amount = original_amount(&decoded.base_vesting_account)?;
                let address = decoded.base_vesting_account.base_account.address;
                if accounts.contains(&address) {
                    return Err(ProjectionError::DuplicateAddress(address));
                }
                accounts.delayed.insert(
                    address.clone(),
                    DelayedGrant {
                        address,
                        amount,
                        end_time: decoded.base_vesting_account.end_time,
                    },
                );
            }
            other => {
                return Err(ProjectionError::UnsupportedAccountType {
                    address: record_address(record),
                    tag: other.to_string(),
                });
            }
        }
    }

    debug!(
        continuous = accounts.continuous.len(),
        delayed = accounts.delayed.len(),
        "classified vesting accounts"
    );
    Ok(accounts)
}
