//! Snapshot loading and per-section extraction.

use crate::error::GenesisError;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use supplycast_types::{Dec, MicroUnit};
use tracing::debug;

/// Message tag that carries a validator's self-delegated stake.
const MSG_CREATE_VALIDATOR: &str = "/cosmos.staking.v1beta1.MsgCreateValidator";

/// A liquid balance record from the bank section (first coin entry only;
/// multi-denomination balances are out of scope).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub address: String,
    pub amount: MicroUnit,
}

/// Monetary-policy parameters as declared in the snapshot. `blocks_per_year`
/// is carried through verbatim here; the projection engine recomputes it from
/// the fixed block interval rather than trusting this figure.
#[derive(Debug, Clone, Deserialize)]
pub struct MintParamsGenesis {
    pub mint_denom: String,
    pub inflation_rate_change: Dec,
    pub inflation_max: Dec,
    pub inflation_min: Dec,
    pub goal_bonded: Dec,
    #[serde(deserialize_with = "string_num::u64")]
    pub blocks_per_year: u64,
}

/// Opening minter state as declared in the snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct MinterGenesis {
    pub inflation: Dec,
    pub annual_provisions: Dec,
}

/// The full mint section: parameters plus opening minter state.
#[derive(Debug, Clone, Deserialize)]
pub struct MintGenesis {
    pub params: MintParamsGenesis,
    pub minter: MinterGenesis,
}

#[derive(Debug, Deserialize)]
struct BalanceJson {
    address: String,
    coins: Vec<CoinJson>,
}

#[derive(Debug, Deserialize)]
struct CoinJson {
    #[allow(dead_code)]
    denom: String,
    #[serde(deserialize_with = "string_num::u128")]
    amount: u128,
}

/// A parsed genesis document, rooted at its `app_state` object.
#[derive(Debug, Clone)]
pub struct Snapshot {
    app_state: Value,
}

impl Snapshot {
    /// Read and parse a genesis file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GenesisError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a genesis document from any reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, GenesisError> {
        let root: Value = serde_json::from_reader(reader)?;
        Self::from_value(root)
    }

    /// Wrap an already-parsed document. Accepts either a full genesis tree
    /// (with an `app_state` key) or a bare `app_state` object.
    pub fn from_value(root: Value) -> Result<Self, GenesisError> {
        let app_state = match root {
            Value::Object(mut map) => match map.remove("app_state") {
                Some(Value::Object(inner)) => Value::Object(inner),
                Some(_) => return Err(GenesisError::UnexpectedShape("app_state")),
                None => Value::Object(map),
            },
            _ => return Err(GenesisError::UnexpectedShape("app_state")),
        };
        Ok(Self { app_state })
    }

    fn section(&self, name: &'static str) -> Result<&Value, GenesisError> {
        self.app_state
            .get(name)
            .ok_or(GenesisError::MissingSection(name))
    }

    /// The raw account-registry records (`auth.accounts`). Classification of
    /// the heterogeneous record types lives in the projection engine.
    pub fn accounts(&self) -> Result<&[Value], GenesisError> {
        let accounts = self
            .section("auth")?
            .get("accounts")
            .ok_or(GenesisError::MissingField("auth.accounts"))?;
        accounts
            .as_array()
            .map(Vec::as_slice)
            .ok_or(GenesisError::UnexpectedShape("auth.accounts"))
    }

    /// All balance records from the bank section.
    pub fn balances(&self) -> Result<Vec<Balance>, GenesisError> {
        let raw = self
            .section("bank")?
            .get("balances")
            .ok_or(GenesisError::MissingField("bank.balances"))?;
        let records: Vec<BalanceJson> = serde_json::from_value(raw.clone())?;

        let mut balances = Vec::with_capacity(records.len());
        for record in records {
            let coin = record
                .coins
                .first()
                .ok_or(GenesisError::UnexpectedShape("bank.balances.coins"))?;
            balances.push(Balance {
                address: record.address,
                amount: coin.amount,
            });
        }
        debug!(count = balances.len(), "extracted bank balances");
        Ok(balances)
    }

    /// The snapshot's own declared total supply, if the bank section carries
    /// one. Used only as a cross-check against the computed figure.
    pub fn declared_supply(&self) -> Result<Option<MicroUnit>, GenesisError> {
        let Some(raw) = self.section("bank")?.get("supply") else {
            return Ok(None);
        };
        let coins: Vec<CoinJson> = serde_json::from_value(raw.clone())?;
        Ok(coins.first().map(|c| c.amount))
    }

    /// Sum of every validator-creation stake across the genesis transactions.
    pub fn staked_tokens(&self) -> Result<MicroUnit, GenesisError> {
        let gen_txs = self
            .section("genutil")?
            .get("gen_txs")
            .and_then(Value::as_array)
            .ok_or(GenesisError::MissingField("genutil.gen_txs"))?;

        let mut staked: MicroUnit = 0;
        for tx in gen_txs {
            let messages = tx
                .get("body")
                .and_then(|b| b.get("messages"))
                .and_then(Value::as_array)
                .ok_or(GenesisError::UnexpectedShape("gen_txs.body.messages"))?;

            for message in messages {
                if message.get("@type").and_then(Value::as_str) != Some(MSG_CREATE_VALIDATOR) {
                    continue;
                }
                let amount = message
                    .get("value")
                    .and_then(|v| v.get("amount"))
                    .and_then(Value::as_str)
                    .ok_or(GenesisError::MissingField("MsgCreateValidator.value.amount"))?;
                let amount: MicroUnit = amount
                    .parse()
                    .map_err(|_| GenesisError::InvalidAmount(amount.to_string()))?;
                staked += amount;
            }
        }
        debug!(staked, "extracted validator stake");
        Ok(staked)
    }

    /// Mint parameters and opening minter state.
    pub fn mint(&self) -> Result<MintGenesis, GenesisError> {
        let raw = self.section("mint")?;
        Ok(serde_json::from_value(raw.clone())?)
    }
}

/// Deserializers for the snapshot's string-encoded integers.
mod string_num {
    use serde::{de, Deserialize, Deserializer};

    pub fn u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }

    pub fn u128<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
