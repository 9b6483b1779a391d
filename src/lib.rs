//! Failed limit-order-fill triage.
//!
//! # Overview
//!
//! Post-mortem analysis of failed `fillOrder` transactions sent to an
//! on-chain order-book router.
//!
//! The pipeline decodes the transaction's packed call arguments offline
//! ([`calldata::decode_fill_order`]), scales the raw token amounts through a
//! static [`registry::AssetRegistry`], captures the maker's balance and
//! router allowance pinned to the failing block via a [`state::ChainState`]
//! client, and correlates all of it into a ranked [`types::Diagnosis`]
//! ([`diagnose::diagnose`]).
//!
//! Use [`triage::Triage`] for the end-to-end flow, or call the stages
//! directly: decoding and correlation are pure functions and need no
//! network access.
//!
//! See `./tests` for examples.
//!
//! # Limitations/follow-ups
//!
//! * Only the fixed 12-slot `fillOrder` calldata shape is decoded; other
//!   router entry points are reported as
//!   [`error::TriageError::UnrecognizedSelector`].
//!
//! * The low-gas early-revert rule is an empirical heuristic. Its threshold
//!   is contract-specific and must be tuned per deployment, see
//!   [`diagnose::DiagnoseConfig`].
//!
//! * Revert-reason extraction via `debug_traceTransaction` is not attempted;
//!   many public endpoints do not expose it.
//!
//! # Testing
//!
//! [`testing`] module provides an in-memory [`state::ChainState`]
//! implementation serving canned transactions, receipts and balances.

pub mod abi;
pub mod calldata;
pub mod diagnose;
pub mod error;
pub mod num;
pub mod registry;
pub mod state;
pub mod testing;
pub mod triage;
pub mod types;

use alloy::primitives::{Address, address};

/// Chain the order-book router is deployed on.
#[derive(Clone, Debug)]
pub struct Chain {
    chain_id: u64,
    router: Address,
}

impl Chain {
    /// Polygon mainnet with the Aggregation Router V6 deployment.
    pub fn polygon() -> Self {
        Self {
            chain_id: 137,
            router: address!("0x111111125421cA6dc452d289314280a0f8842A65"),
        }
    }

    pub fn custom(chain_id: u64, router: Address) -> Self {
        Self { chain_id, router }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Router contract the failed fill was submitted to.
    /// Acts as the allowance spender in snapshot capture.
    pub fn router(&self) -> Address {
        self.router
    }
}
