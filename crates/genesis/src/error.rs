use thiserror::Error;

/// Structural failures while reading the genesis snapshot.
///
/// Every variant is fatal for the run: a snapshot that cannot be decoded in
/// full would produce a materially wrong projection, so there is no
/// best-effort mode.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("failed to read snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot has no `{0}` section")]
    MissingSection(&'static str),

    #[error("snapshot field `{0}` is missing")]
    MissingField(&'static str),

    #[error("snapshot field `{0}` has an unexpected shape")]
    UnexpectedShape(&'static str),

    #[error("invalid amount string `{0}`")]
    InvalidAmount(String),
}
