//! Minimal contract surface the triage needs on-chain.
//!
//! Only the two ERC-20 view functions used for snapshot capture:
//! `balanceOf(address)` (selector `0x70a08231`) and
//! `allowance(address,address)` (selector `0xdd62ed3e`).

#[allow(clippy::too_many_arguments)]
pub mod erc20 {
    alloy::sol!(
        #[derive(Debug)]
        #[sol(rpc)]
        interface IERC20 {
            function balanceOf(address owner) external view returns (uint256);
            function allowance(address owner, address spender) external view returns (uint256);
        }
    );
}

/// 4-byte method selector at the head of EVM call data.
pub type Selector = [u8; 4];

/// Selector of the router's `fillOrder` entry point:
/// `fillOrder((uint256,address,address,address,address,uint256,uint256,bytes32),bytes32,bytes32,uint256,uint256)`.
pub const FILL_ORDER_SELECTOR: Selector = [0x9f, 0xda, 0x64, 0xbd];

#[cfg(test)]
mod tests {
    use alloy_sol_types::SolCall;

    use super::*;

    #[test]
    fn test_erc20_selectors() {
        assert_eq!(
            erc20::IERC20::balanceOfCall::SELECTOR,
            [0x70, 0xa0, 0x82, 0x31]
        );
        assert_eq!(
            erc20::IERC20::allowanceCall::SELECTOR,
            [0xdd, 0x62, 0xed, 0x3e]
        );
    }
}
