//! Configuration for the fill triage CLI.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): connection details
//! - CLI arguments: what to analyze and rule tuning

use clap::{Parser, Subcommand};
use fill_triage::Chain;

/// Environment configuration (connection details).
#[derive(Debug, serde::Deserialize)]
pub struct EnvConfig {
    /// RPC URL for the node
    pub node_rpc_url: String,

    /// Chain ID (default: 137, Polygon mainnet)
    pub chain_id: Option<u64>,

    /// Order-book router address (default: Aggregation Router V6)
    pub router_address: Option<String>,

    /// Optional timeout per RPC stage (default: 30s)
    pub timeout_seconds: Option<u64>,

    /// Optional low-gas early-revert threshold (default: 50000)
    pub low_gas_threshold: Option<u64>,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Resolve the chain descriptor, defaulting to the Polygon deployment.
    pub fn chain(&self) -> Result<Chain, ConfigError> {
        let default = Chain::polygon();
        let router = match &self.router_address {
            Some(addr) => addr
                .parse()
                .map_err(|_| ConfigError::InvalidRouterAddress(addr.clone()))?,
            None => default.router(),
        };
        Ok(Chain::custom(
            self.chain_id.unwrap_or(default.chain_id()),
            router,
        ))
    }
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "fill-triage")]
#[command(about = "Diagnoses failed limit-order fill transactions")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Diagnose a fill transaction by hash.
    Tx {
        /// Transaction hash (0x-prefixed)
        hash: String,

        /// Override the low-gas early-revert threshold
        #[arg(long)]
        low_gas_threshold: Option<u64>,
    },

    /// Check whether a wallet shows any on-chain activity.
    Wallet {
        /// Wallet address (0x-prefixed)
        address: String,
    },
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid router address: {0}")]
    InvalidRouterAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_defaults_to_polygon() {
        let env = EnvConfig {
            node_rpc_url: "https://polygon-bor-rpc.publicnode.com".to_string(),
            chain_id: None,
            router_address: None,
            timeout_seconds: None,
            low_gas_threshold: None,
        };
        let chain = env.chain().unwrap();
        assert_eq!(chain.chain_id(), 137);
        assert_eq!(chain.router(), Chain::polygon().router());
    }

    #[test]
    fn test_invalid_router_address_rejected() {
        let env = EnvConfig {
            node_rpc_url: "https://polygon-bor-rpc.publicnode.com".to_string(),
            chain_id: Some(137),
            router_address: Some("not-an-address".to_string()),
            timeout_seconds: None,
            low_gas_threshold: None,
        };
        assert!(matches!(
            env.chain(),
            Err(ConfigError::InvalidRouterAddress(_))
        ));
    }
}
