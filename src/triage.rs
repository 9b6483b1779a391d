//! End-to-end triage runs.
//!
//! [`Triage`] wires the stages together: transaction fetch → calldata
//! decode → receipt fetch → snapshot capture pinned to the receipt's block →
//! amount normalization → correlation. Each RPC stage is bounded by the
//! configured timeout; a timed-out or failed stage aborts the whole run,
//! there is no best-effort partial report.
//!
//! Independent runs share no mutable state and may execute in parallel.

use std::{future::Future, time::Duration};

use alloy::{
    eips::BlockId,
    primitives::{Address, TxHash, U256},
};
use tracing::{debug, info, warn};

use crate::{
    Chain, calldata,
    diagnose::{DiagnoseConfig, diagnose},
    error::TriageError,
    registry::{AssetRegistry, NormalizedAmount},
    state::{self, ChainSnapshot, ChainState, ReceiptRecord},
    types::{Diagnosis, FillParams, Order},
};

/// Runner configuration.
#[derive(Clone, Copy, Debug)]
pub struct TriageConfig {
    /// Upper bound for each RPC stage. A stage exceeding it fails as
    /// [`TriageError::RpcUnavailable`] and aborts the run.
    pub timeout: Duration,
    pub diagnose: DiagnoseConfig,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            diagnose: DiagnoseConfig::default(),
        }
    }
}

/// Everything one triage run produced.
#[derive(Clone, Debug)]
pub struct Report {
    pub tx_hash: TxHash,
    pub order: Order,
    pub fill: FillParams,
    /// Maker side of the order in token units, or the unknown-asset marker.
    pub making: NormalizedAmount,
    /// Taker side of the order in token units, or the unknown-asset marker.
    pub taking: NormalizedAmount,
    pub receipt: ReceiptRecord,
    pub snapshot: ChainSnapshot,
    pub diagnosis: Diagnosis,
}

/// Chain-tip activity summary for a wallet.
#[derive(Clone, Copy, derive_more::Debug)]
pub struct WalletActivity {
    pub block_number: u64,
    pub transaction_count: u64,
    #[debug("{native_balance}")]
    pub native_balance: U256,
}

impl WalletActivity {
    /// A wallet counts as active once it has sent anything or holds funds.
    pub fn is_active(&self) -> bool {
        self.transaction_count > 0 || self.native_balance > U256::ZERO
    }
}

/// Failed-fill triage runner over an injected [`ChainState`] client.
#[derive(Clone, Debug)]
pub struct Triage<C> {
    client: C,
    chain: Chain,
    registry: AssetRegistry,
    config: TriageConfig,
}

impl<C: ChainState> Triage<C> {
    pub fn new(client: C, chain: Chain, registry: AssetRegistry, config: TriageConfig) -> Self {
        Self {
            client,
            chain,
            registry,
            config,
        }
    }

    /// Diagnoses the fill transaction `tx_hash`.
    ///
    /// The snapshot is captured for the order's maker against the maker
    /// asset and the router spender, pinned to the receipt's block.
    pub async fn run(&self, tx_hash: TxHash) -> Result<Report, TriageError> {
        info!(%tx_hash, chain_id = self.chain.chain_id(), "starting triage run");

        let tx = self
            .bounded("eth_getTransactionByHash", self.client.transaction_by_hash(tx_hash))
            .await?;
        if tx.to != Some(self.chain.router()) {
            warn!(
                to = ?tx.to,
                router = %self.chain.router(),
                "transaction target is not the configured router"
            );
        }

        let (order, fill) = calldata::decode_fill_order(&tx.input)?;
        debug!(
            maker = %order.maker(),
            maker_asset = %order.maker_asset(),
            taker_asset = %order.taker_asset(),
            "decoded fill order"
        );

        let receipt = self
            .bounded("eth_getTransactionReceipt", self.client.receipt_by_hash(tx_hash))
            .await?;
        if tx.block_number.is_some_and(|block| block != receipt.block_number) {
            // The receipt's block wins: the snapshot must match the state
            // the failing execution actually saw.
            warn!(
                tx_block = ?tx.block_number,
                receipt_block = receipt.block_number,
                "transaction and receipt disagree on inclusion block"
            );
        }

        let snapshot = self
            .bounded(
                "eth_call",
                state::capture(
                    &self.client,
                    order.maker(),
                    order.maker_asset(),
                    self.chain.router(),
                    receipt.block_number,
                ),
            )
            .await?;

        let making = self.registry.normalize(order.maker_asset(), order.making_amount());
        let taking = self.registry.normalize(order.taker_asset(), order.taking_amount());
        let diagnosis = diagnose(&order, &fill, &receipt, &snapshot, &self.config.diagnose);

        info!(
            succeeded = receipt.succeeded,
            gas_used = receipt.gas_used,
            block = receipt.block_number,
            findings = diagnosis.len(),
            "triage run complete"
        );

        Ok(Report {
            tx_hash,
            order,
            fill,
            making,
            taking,
            receipt,
            snapshot,
            diagnosis,
        })
    }

    /// Checks whether `wallet` shows any activity at the chain tip.
    pub async fn wallet_activity(&self, wallet: Address) -> Result<WalletActivity, TriageError> {
        let block_number = self
            .bounded("eth_blockNumber", self.client.block_number())
            .await?;
        let at = BlockId::number(block_number);
        let (transaction_count, native_balance) = self
            .bounded(
                "eth_getTransactionCount",
                async {
                    futures::try_join!(
                        self.client.transaction_count(wallet, at),
                        self.client.native_balance(wallet, at),
                    )
                },
            )
            .await?;
        Ok(WalletActivity {
            block_number,
            transaction_count,
            native_balance,
        })
    }

    async fn bounded<T>(
        &self,
        method: &'static str,
        fut: impl Future<Output = Result<T, TriageError>>,
    ) -> Result<T, TriageError> {
        tokio::time::timeout(self.config.timeout, fut)
            .await
            .map_err(|_| TriageError::timeout(method))?
    }
}
