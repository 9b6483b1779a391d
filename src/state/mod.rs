//! Point-in-time chain state access.
//!
//! Every state query carries an explicit [`BlockId`] pin; a caller asking
//! for a historical block never silently receives present-tense data. The
//! [`ChainState`] trait is the injectable capability the core consumes;
//! there is no ambient RPC session. [`RpcStateClient`] is the production
//! implementation, [`crate::testing::StaticChainState`] serves offline
//! tests.
//!
//! Responses are projected into [`TxRecord`] / [`ReceiptRecord`] by an
//! explicit typed decode step per method: a response missing a required
//! field fails with [`TriageError::MalformedRpcResponse`] instead of being
//! optimistically indexed.

mod client;
mod snapshot;

use std::future::Future;

use alloy::{
    eips::BlockId,
    primitives::{Address, Bytes, TxHash, U256},
};

pub use client::*;
pub use snapshot::*;

use crate::error::TriageError;

/// Typed projection of an `eth_getTransactionByHash` response.
#[derive(Clone, Debug)]
pub struct TxRecord {
    pub hash: TxHash,
    /// Call target, `None` for a contract creation.
    pub to: Option<Address>,
    /// Raw call input, selector included.
    pub input: Bytes,
    /// Inclusion block, `None` while pending.
    pub block_number: Option<u64>,
}

/// Typed projection of an `eth_getTransactionReceipt` response.
#[derive(Clone, Copy, Debug)]
pub struct ReceiptRecord {
    pub succeeded: bool,
    pub gas_used: u64,
    pub block_number: u64,
}

/// Read-only chain state, pinned per query.
///
/// One blocking request per call, no retries; retry/backoff and timeouts are
/// a caller concern (see [`crate::triage::Triage`]).
pub trait ChainState {
    /// ERC-20 `balanceOf(owner)` on `token` at the pinned block.
    fn erc20_balance(
        &self,
        token: Address,
        owner: Address,
        at: BlockId,
    ) -> impl Future<Output = Result<U256, TriageError>> + Send;

    /// ERC-20 `allowance(owner, spender)` on `token` at the pinned block.
    fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        at: BlockId,
    ) -> impl Future<Output = Result<U256, TriageError>> + Send;

    /// Native currency balance at the pinned block.
    fn native_balance(
        &self,
        owner: Address,
        at: BlockId,
    ) -> impl Future<Output = Result<U256, TriageError>> + Send;

    /// Outgoing transaction count (nonce) at the pinned block.
    fn transaction_count(
        &self,
        owner: Address,
        at: BlockId,
    ) -> impl Future<Output = Result<u64, TriageError>> + Send;

    /// Current chain tip number.
    fn block_number(&self) -> impl Future<Output = Result<u64, TriageError>> + Send;

    /// Transaction lookup; an unknown hash is a node-reported error.
    fn transaction_by_hash(
        &self,
        hash: TxHash,
    ) -> impl Future<Output = Result<TxRecord, TriageError>> + Send;

    /// Receipt lookup; an unknown or pending hash is a node-reported error.
    fn receipt_by_hash(
        &self,
        hash: TxHash,
    ) -> impl Future<Output = Result<ReceiptRecord, TriageError>> + Send;
}
