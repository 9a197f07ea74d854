use std::result::Result as StdResult;

use tally_config::ConfigError;
use tally_core::CoreError;
use tally_domain::ValidationError;
use thiserror::Error;

/// Unified error type returned by [`crate::SalesBook`].
#[derive(Error, Debug)]
pub enum TallyError {
    /// The input was rejected before touching the ledger.
    #[error(transparent)]
    Rejected(#[from] ValidationError),
    /// The in-memory ledger changed but the slot could not be written.
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, TallyError>;

impl TallyError {
    /// Human-readable reason to show to the user.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, TallyError::Rejected(_))
    }
}

impl From<CoreError> for TallyError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Storage(message) | CoreError::Serde(message) => {
                TallyError::Persistence(message)
            }
            CoreError::Io(err) => TallyError::Persistence(err.to_string()),
        }
    }
}

impl From<ConfigError> for TallyError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => TallyError::Config(io.to_string()),
            ConfigError::Serde(message) => TallyError::Config(message),
        }
    }
}
