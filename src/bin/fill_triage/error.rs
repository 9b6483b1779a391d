//! Error types for the fill triage CLI.

use fill_triage::error::TriageError;

use crate::config::ConfigError;

/// Main error type for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment configuration error: {0}")]
    EnvConfig(#[from] envy::Error),

    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(#[from] url::ParseError),

    #[error("Invalid hex argument: {0}")]
    InvalidHex(#[from] alloy::primitives::hex::FromHexError),

    #[error("Triage error: {0}")]
    Triage(#[from] TriageError),
}

pub type Result<T> = std::result::Result<T, Error>;
