use alloy::{
    consensus::Transaction as _,
    eips::BlockId,
    primitives::{Address, TxHash, U256},
    providers::Provider,
};

use super::{ChainState, ReceiptRecord, TxRecord};
use crate::{abi::erc20::IERC20, error::TriageError};

/// [`ChainState`] implementation over an alloy [`Provider`].
///
/// Explicitly constructed and passed to whatever needs chain access;
/// nothing in this crate holds a global session.
#[derive(Clone, Debug)]
pub struct RpcStateClient<P> {
    provider: P,
}

impl<P: Provider + Clone> RpcStateClient<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider + Clone> ChainState for RpcStateClient<P> {
    async fn erc20_balance(
        &self,
        token: Address,
        owner: Address,
        at: BlockId,
    ) -> Result<U256, TriageError> {
        IERC20::new(token, self.provider.clone())
            .balanceOf(owner)
            .block(at)
            .call()
            .await
            .map_err(|e| TriageError::from_contract("eth_call/balanceOf", e))
    }

    async fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        at: BlockId,
    ) -> Result<U256, TriageError> {
        IERC20::new(token, self.provider.clone())
            .allowance(owner, spender)
            .block(at)
            .call()
            .await
            .map_err(|e| TriageError::from_contract("eth_call/allowance", e))
    }

    async fn native_balance(&self, owner: Address, at: BlockId) -> Result<U256, TriageError> {
        self.provider
            .get_balance(owner)
            .block_id(at)
            .await
            .map_err(|e| TriageError::from_rpc("eth_getBalance", e))
    }

    async fn transaction_count(&self, owner: Address, at: BlockId) -> Result<u64, TriageError> {
        self.provider
            .get_transaction_count(owner)
            .block_id(at)
            .await
            .map_err(|e| TriageError::from_rpc("eth_getTransactionCount", e))
    }

    async fn block_number(&self) -> Result<u64, TriageError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| TriageError::from_rpc("eth_blockNumber", e))
    }

    async fn transaction_by_hash(&self, hash: TxHash) -> Result<TxRecord, TriageError> {
        const METHOD: &str = "eth_getTransactionByHash";
        let tx = self
            .provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(|e| TriageError::from_rpc(METHOD, e))?
            .ok_or_else(|| TriageError::not_found(METHOD, "transaction"))?;

        Ok(TxRecord {
            hash,
            to: tx.to(),
            input: tx.input().clone(),
            block_number: tx.block_number,
        })
    }

    async fn receipt_by_hash(&self, hash: TxHash) -> Result<ReceiptRecord, TriageError> {
        const METHOD: &str = "eth_getTransactionReceipt";
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| TriageError::from_rpc(METHOD, e))?
            .ok_or_else(|| TriageError::not_found(METHOD, "receipt"))?;

        // A mined receipt always names its block; anything else is a shape
        // violation, not a value to default.
        let block_number = receipt
            .block_number
            .ok_or_else(|| TriageError::MalformedRpcResponse {
                method: METHOD,
                detail: "receipt without block number".to_string(),
            })?;

        Ok(ReceiptRecord {
            succeeded: receipt.status(),
            gas_used: receipt.gas_used,
            block_number,
        })
    }
}
