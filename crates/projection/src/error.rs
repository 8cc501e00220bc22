use supplycast_genesis::GenesisError;
use supplycast_types::DecError;
use thiserror::Error;

/// Errors raised while building or running a projection.
///
/// Structural and arithmetic failures are fatal and no partial ledger is
/// emitted. Supply-consistency findings are not errors; they are surfaced as
/// a [`crate::supply::SupplyCheck`] diagnostic.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Genesis(#[from] GenesisError),

    #[error("account record could not be decoded: {0}")]
    MalformedAccount(#[source] serde_json::Error),

    #[error("account record has no `@type` tag")]
    MissingTypeTag,

    #[error("account `{address}` has an unsupported type tag `{tag}`")]
    UnsupportedAccountType { address: String, tag: String },

    #[error("account `{0}` appears more than once in the registry")]
    DuplicateAddress(String),

    #[error("vesting account `{0}` declares no original vesting amount")]
    MissingVestingAmount(String),

    #[error("vesting account `{0}` has a non-positive vesting duration")]
    InvalidVestingDuration(String),

    #[error("total supply is zero; bonded ratio is undefined")]
    ZeroTotalSupply,

    #[error(transparent)]
    Arithmetic(#[from] DecError),
}
