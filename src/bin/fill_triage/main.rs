//! Fill triage CLI.
//!
//! Diagnoses failed limit-order fill transactions against an order-book
//! router: decodes the call data, captures maker state at the failing
//! block and reports ranked failure causes.

mod config;
mod error;

use alloy::{
    primitives::{Address, TxHash},
    providers::{DynProvider, ProviderBuilder},
    rpc::client::RpcClient,
};
use clap::Parser;
use fill_triage::{
    registry::AssetRegistry,
    state::RpcStateClient,
    triage::{Triage, TriageConfig},
};
use std::{process::exit, time::Duration};
use tracing::{error, info, warn};
use url::Url;

use config::{CliConfig, Command, EnvConfig};
use error::Result;

#[tokio::main]
async fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    // Parse environment configuration
    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    // Parse CLI arguments
    let cli_config = CliConfig::parse();

    // Set up logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(env_config, cli_config).await {
        error!(%e, "fill triage failed");
        exit(1);
    }
}

async fn run(env_config: EnvConfig, cli_config: CliConfig) -> Result<()> {
    let chain = env_config.chain()?;
    let node_url = Url::parse(&env_config.node_rpc_url)?;

    let rpc_client = RpcClient::new_http(node_url);
    let provider = DynProvider::new(ProviderBuilder::new().connect_client(rpc_client));

    let mut triage_config = TriageConfig {
        timeout: Duration::from_secs(env_config.timeout_seconds.unwrap_or(30)),
        ..TriageConfig::default()
    };
    if let Some(threshold) = env_config.low_gas_threshold {
        triage_config.diagnose.low_gas_threshold = threshold;
    }

    match cli_config.command {
        Command::Tx {
            hash,
            low_gas_threshold,
        } => {
            if let Some(threshold) = low_gas_threshold {
                triage_config.diagnose.low_gas_threshold = threshold;
            }
            let tx_hash: TxHash = hash.parse()?;
            let triage = Triage::new(
                RpcStateClient::new(provider),
                chain,
                AssetRegistry::polygon(),
                triage_config,
            );
            report(&triage.run(tx_hash).await?);
        }
        Command::Wallet { address } => {
            let wallet: Address = address.parse()?;
            let triage = Triage::new(
                RpcStateClient::new(provider),
                chain,
                AssetRegistry::polygon(),
                triage_config,
            );
            let activity = triage.wallet_activity(wallet).await?;
            info!(
                block = activity.block_number,
                transaction_count = activity.transaction_count,
                native_balance = %activity.native_balance,
                active = activity.is_active(),
                "wallet activity"
            );
        }
    }

    Ok(())
}

fn report(report: &fill_triage::triage::Report) {
    info!(
        tx_hash = %report.tx_hash,
        block = report.receipt.block_number,
        succeeded = report.receipt.succeeded,
        gas_used = report.receipt.gas_used,
        "transaction"
    );
    info!(
        maker = %report.order.maker(),
        making = %report.making,
        taking = %report.taking,
        salt = %report.order.salt(),
        "order"
    );
    info!(
        balance = %report.snapshot.balance(),
        allowance = %report.snapshot.allowance(),
        block = report.snapshot.block_number(),
        "maker state at failing block"
    );

    if report.making.is_unknown() || report.taking.is_unknown() {
        warn!("order touches assets missing from the registry; amounts shown raw");
    }

    if report.diagnosis.is_empty() {
        info!("transaction succeeded, nothing to diagnose");
        return;
    }
    for finding in &report.diagnosis {
        info!(confidence = %finding.confidence, "likely cause: {}", finding.cause);
    }
}
