use alloy::{
    eips::BlockId,
    primitives::{Address, U256},
};

use super::ChainState;
use crate::error::TriageError;

/// Maker-side account state at one historical block.
///
/// Captured once per triage run, pinned to the failing transaction's block,
/// and never refreshed to present state mid-run. A snapshot only exists in
/// full: if either constituent query fails, no snapshot is produced and the
/// run aborts (see [`capture`]).
#[derive(Clone, Copy, derive_more::Debug, PartialEq, Eq)]
pub struct ChainSnapshot {
    block_number: u64,
    #[debug("{balance}")]
    balance: U256,
    #[debug("{allowance}")]
    allowance: U256,
}

impl ChainSnapshot {
    pub fn new(block_number: u64, balance: U256, allowance: U256) -> Self {
        Self {
            block_number,
            balance,
            allowance,
        }
    }

    /// Block the snapshot is pinned to.
    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    /// Raw maker-asset balance of the wallet at the pinned block.
    pub fn balance(&self) -> U256 {
        self.balance
    }

    /// Raw maker-asset allowance granted to the spender at the pinned block.
    pub fn allowance(&self) -> U256 {
        self.allowance
    }
}

/// Captures the (wallet, asset, spender) snapshot at `block_number`.
///
/// Balance and allowance are fetched concurrently against the same pinned
/// block; either failure aborts the capture, so a partial snapshot can never
/// reach the correlator.
pub async fn capture<C: ChainState>(
    client: &C,
    wallet: Address,
    asset: Address,
    spender: Address,
    block_number: u64,
) -> Result<ChainSnapshot, TriageError> {
    let at = BlockId::number(block_number);
    let (balance, allowance) = futures::try_join!(
        client.erc20_balance(asset, wallet, at),
        client.erc20_allowance(asset, wallet, spender, at),
    )?;
    Ok(ChainSnapshot::new(block_number, balance, allowance))
}
