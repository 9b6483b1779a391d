use std::fmt;

/// Likely reason a fill transaction reverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureCause {
    /// Maker's token balance at the failing block was below the making amount.
    InsufficientBalance,
    /// Maker's router allowance at the failing block was below the making amount.
    InsufficientAllowance,
    /// Gas usage below the configured threshold, consistent with a revert
    /// in up-front validation before any transfer logic ran.
    EarlyRevert,
    /// Limit price or slippage condition was not met at execution time.
    PriceConditionUnmet,
    /// Order expired, was cancelled, or its salt was already consumed.
    OrderExpiredOrFilled,
    /// Order signature did not recover to the maker.
    SignatureInvalid,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InsufficientBalance => "insufficient balance",
            Self::InsufficientAllowance => "insufficient allowance",
            Self::EarlyRevert => "early revert, likely validation failure",
            Self::PriceConditionUnmet => "price/slippage condition unmet",
            Self::OrderExpiredOrFilled => "order expired or already filled",
            Self::SignatureInvalid => "signature invalid",
        };
        f.write_str(text)
    }
}

/// How strongly the evidence supports a [`FailureCause`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

/// One ranked entry of a [`Diagnosis`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Finding {
    pub cause: FailureCause,
    pub confidence: Confidence,
}

/// Ordered failure findings for one transaction, strongest evidence first.
///
/// Empty exactly when the transaction succeeded on-chain. Produced once by
/// [`crate::diagnose::diagnose`] and immutable thereafter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnosis {
    findings: Vec<Finding>,
}

impl Diagnosis {
    pub(crate) fn push(&mut self, cause: FailureCause, confidence: Confidence) {
        self.findings.push(Finding { cause, confidence });
    }

    /// Findings in rank order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Strongest finding, `None` for a successful transaction.
    pub fn top(&self) -> Option<&Finding> {
        self.findings.first()
    }

    /// True when there is nothing to explain.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }
}

impl<'a> IntoIterator for &'a Diagnosis {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}
