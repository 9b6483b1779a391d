//! Failure-cause correlation.
//!
//! [`diagnose`] is a pure function of the decoded order, the fill
//! parameters, the receipt outcome and the pinned-block snapshot. All chain
//! data must already reside in the supplied [`ChainSnapshot`]; no network
//! access happens here, which keeps every rule replayable from fixtures.

use crate::{
    state::{ChainSnapshot, ReceiptRecord},
    types::{Confidence, Diagnosis, FailureCause, FillParams, Order},
};

/// Correlation tuning.
#[derive(Clone, Copy, Debug)]
pub struct DiagnoseConfig {
    /// Gas usage below this is read as a revert in up-front validation,
    /// before any transfer logic ran. Empirical and contract-specific:
    /// the reference router rejects early at ~33k gas, while fills that
    /// reach token transfers burn well past 100k. Tune per deployment.
    pub low_gas_threshold: u64,
}

impl Default for DiagnoseConfig {
    fn default() -> Self {
        Self {
            low_gas_threshold: 50_000,
        }
    }
}

/// Ranks likely failure causes for one fill attempt.
///
/// Rules run in order and every applicable finding is collected:
///
/// 1. a successful receipt yields an empty diagnosis, nothing to explain;
/// 2. balance below the making amount → high confidence;
/// 3. allowance below the making amount → high confidence;
/// 4. gas usage under [`DiagnoseConfig::low_gas_threshold`] → medium
///    confidence (heuristic, not proof);
/// 5. only when none of 2–4 fired: the residual low-confidence trio
///    (price condition, expiry/replay, signature).
///
/// Deterministic: identical inputs produce an identical ordered diagnosis.
pub fn diagnose(
    order: &Order,
    fill: &FillParams,
    receipt: &ReceiptRecord,
    snapshot: &ChainSnapshot,
    config: &DiagnoseConfig,
) -> Diagnosis {
    let mut diagnosis = Diagnosis::default();
    if receipt.succeeded {
        return diagnosis;
    }

    tracing::debug!(
        making_amount = %order.making_amount(),
        fill_amount = %fill.fill_amount(),
        gas_used = receipt.gas_used,
        block = snapshot.block_number(),
        "correlating failed fill"
    );

    if snapshot.balance() < order.making_amount() {
        diagnosis.push(FailureCause::InsufficientBalance, Confidence::High);
    }
    if snapshot.allowance() < order.making_amount() {
        diagnosis.push(FailureCause::InsufficientAllowance, Confidence::High);
    }
    if receipt.gas_used < config.low_gas_threshold {
        diagnosis.push(FailureCause::EarlyRevert, Confidence::Medium);
    }

    if diagnosis.is_empty() {
        // Nothing measurable explains the revert; fall back to the causes
        // that cannot be checked from balance/allowance/gas alone.
        diagnosis.push(FailureCause::PriceConditionUnmet, Confidence::Low);
        diagnosis.push(FailureCause::OrderExpiredOrFilled, Confidence::Low);
        diagnosis.push(FailureCause::SignatureInvalid, Confidence::Low);
    }

    diagnosis
}
