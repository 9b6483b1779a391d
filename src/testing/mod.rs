//! Offline testing support.
//!
//! [`StaticChainState`] is an in-memory [`ChainState`] serving canned
//! transactions, receipts and balances, so the full triage pipeline can run
//! in tests without a node. Values are served as-of whatever block a query
//! pins; populate the mock with the state you expect at the failing block.

use std::collections::HashMap;

use alloy::{
    eips::BlockId,
    primitives::{Address, TxHash, U256},
};

use crate::{
    error::TriageError,
    state::{ChainState, ReceiptRecord, TxRecord},
};

/// Simulated outage scope, see [`StaticChainState::with_outage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outage {
    None,
    /// Every `allowance` read fails as a transport error.
    Allowance,
    /// Every `balanceOf` read fails as a transport error.
    Balance,
    /// Every `balanceOf` read hangs forever, for exercising caller timeouts.
    Stall,
}

/// Canned chain state for tests.
#[derive(Clone, Debug)]
pub struct StaticChainState {
    tip: u64,
    transactions: HashMap<TxHash, TxRecord>,
    receipts: HashMap<TxHash, ReceiptRecord>,
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
    native_balances: HashMap<Address, U256>,
    transaction_counts: HashMap<Address, u64>,
    outage: Outage,
}

impl StaticChainState {
    pub fn new(tip: u64) -> Self {
        Self {
            tip,
            transactions: HashMap::new(),
            receipts: HashMap::new(),
            balances: HashMap::new(),
            allowances: HashMap::new(),
            native_balances: HashMap::new(),
            transaction_counts: HashMap::new(),
            outage: Outage::None,
        }
    }

    pub fn with_transaction(mut self, tx: TxRecord) -> Self {
        self.transactions.insert(tx.hash, tx);
        self
    }

    pub fn with_receipt(mut self, hash: TxHash, receipt: ReceiptRecord) -> Self {
        self.receipts.insert(hash, receipt);
        self
    }

    pub fn with_balance(mut self, token: Address, owner: Address, raw: U256) -> Self {
        self.balances.insert((token, owner), raw);
        self
    }

    pub fn with_allowance(
        mut self,
        token: Address,
        owner: Address,
        spender: Address,
        raw: U256,
    ) -> Self {
        self.allowances.insert((token, owner, spender), raw);
        self
    }

    pub fn with_native_balance(mut self, owner: Address, raw: U256) -> Self {
        self.native_balances.insert(owner, raw);
        self
    }

    pub fn with_transaction_count(mut self, owner: Address, count: u64) -> Self {
        self.transaction_counts.insert(owner, count);
        self
    }

    /// Makes one class of reads fail, for exercising abort paths.
    pub fn with_outage(mut self, outage: Outage) -> Self {
        self.outage = outage;
        self
    }

    fn unavailable(method: &'static str) -> TriageError {
        TriageError::RpcUnavailable {
            method,
            detail: "simulated outage".to_string(),
        }
    }
}

impl ChainState for StaticChainState {
    async fn erc20_balance(
        &self,
        token: Address,
        owner: Address,
        _at: BlockId,
    ) -> Result<U256, TriageError> {
        if self.outage == Outage::Balance {
            return Err(Self::unavailable("eth_call/balanceOf"));
        }
        if self.outage == Outage::Stall {
            std::future::pending::<()>().await;
        }
        // Absent entry reads as an empty wallet, as on-chain.
        Ok(self
            .balances
            .get(&(token, owner))
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        _at: BlockId,
    ) -> Result<U256, TriageError> {
        if self.outage == Outage::Allowance {
            return Err(Self::unavailable("eth_call/allowance"));
        }
        Ok(self
            .allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn native_balance(&self, owner: Address, _at: BlockId) -> Result<U256, TriageError> {
        Ok(self
            .native_balances
            .get(&owner)
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn transaction_count(&self, owner: Address, _at: BlockId) -> Result<u64, TriageError> {
        Ok(self.transaction_counts.get(&owner).copied().unwrap_or(0))
    }

    async fn block_number(&self) -> Result<u64, TriageError> {
        Ok(self.tip)
    }

    async fn transaction_by_hash(&self, hash: TxHash) -> Result<TxRecord, TriageError> {
        self.transactions
            .get(&hash)
            .cloned()
            .ok_or_else(|| TriageError::RpcError {
                method: "eth_getTransactionByHash",
                code: None,
                message: "transaction not found".to_string(),
            })
    }

    async fn receipt_by_hash(&self, hash: TxHash) -> Result<ReceiptRecord, TriageError> {
        self.receipts
            .get(&hash)
            .copied()
            .ok_or_else(|| TriageError::RpcError {
                method: "eth_getTransactionReceipt",
                code: None,
                message: "receipt not found".to_string(),
            })
    }
}
