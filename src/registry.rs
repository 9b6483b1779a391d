//! Static asset registry and amount normalization.
//!
//! The registry is an immutable address → {symbol, decimals} table built at
//! startup and safely shared across concurrent triage runs. Lookups are
//! case-insensitive by construction: keys are 20-byte [`Address`] values, so
//! any hex casing of the same address resolves to the same entry.

use std::collections::HashMap;

use alloy::primitives::{Address, U256, address};
use fastnum::UD256;

use crate::num;

/// Registry entry for one known token.
#[derive(Clone, Debug)]
pub struct AssetDescriptor {
    address: Address,
    symbol: String,
    decimals: u8,
}

impl AssetDescriptor {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Decimal exponent the raw on-chain amount is scaled by.
    pub fn decimals(&self) -> u8 {
        self.decimals
    }
}

/// Raw token amount scaled by the asset's decimal exponent.
///
/// [`Self::Unknown`] marks an asset missing from the registry. It is not an
/// error and, critically, not a numeric zero: callers needing a decimal
/// comparison must treat it as non-comparable.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub enum NormalizedAmount {
    Known {
        symbol: String,
        #[debug("{value}")]
        value: UD256,
    },
    Unknown {
        asset: Address,
    },
}

impl NormalizedAmount {
    /// Decimal value, `None` for an unregistered asset.
    pub fn value(&self) -> Option<UD256> {
        match self {
            Self::Known { value, .. } => Some(*value),
            Self::Unknown { .. } => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }
}

impl std::fmt::Display for NormalizedAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known { symbol, value } => write!(f, "{value} {symbol}"),
            Self::Unknown { asset } => write!(f, "unknown asset {asset}"),
        }
    }
}

/// Immutable address → [`AssetDescriptor`] table.
#[derive(Clone, Debug, Default)]
pub struct AssetRegistry {
    assets: HashMap<Address, AssetDescriptor>,
}

impl AssetRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Polygon mainnet tokens the reference deployment trades.
    pub fn polygon() -> Self {
        Self::empty()
            .with_asset(
                address!("0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"),
                "WMATIC",
                18,
            )
            .with_asset(
                address!("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359"),
                "USDC",
                6,
            )
            .with_asset(
                address!("0xc2132D05D31c914a87C6611C10748AEb04B58e8F"),
                "USDT",
                6,
            )
            .with_asset(
                address!("0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063"),
                "DAI",
                18,
            )
    }

    /// Adds or replaces an entry.
    pub fn with_asset(mut self, address: Address, symbol: impl Into<String>, decimals: u8) -> Self {
        self.assets.insert(
            address,
            AssetDescriptor {
                address,
                symbol: symbol.into(),
                decimals,
            },
        );
        self
    }

    pub fn get(&self, asset: Address) -> Option<&AssetDescriptor> {
        self.assets.get(&asset)
    }

    /// Scales `raw` by the asset's decimal exponent.
    ///
    /// A registry miss yields the explicit [`NormalizedAmount::Unknown`]
    /// marker; there is no failure path.
    pub fn normalize(&self, asset: Address, raw: U256) -> NormalizedAmount {
        match self.get(asset) {
            Some(desc) => NormalizedAmount::Known {
                symbol: desc.symbol.clone(),
                value: num::Converter::new(desc.decimals).from_unsigned(raw),
            },
            None => NormalizedAmount::Unknown { asset },
        }
    }
}

#[cfg(test)]
mod tests {
    use fastnum::udec256;

    use super::*;

    const USDC: Address = address!("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359");
    const WMATIC: Address = address!("0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270");

    #[test]
    fn test_normalize_six_decimal_asset() {
        let amount = AssetRegistry::polygon().normalize(USDC, U256::from(1_000_000u64));
        assert_eq!(amount.value(), Some(udec256!(1)));
        assert!(!amount.is_unknown());
    }

    #[test]
    fn test_normalize_eighteen_decimal_asset() {
        let amount =
            AssetRegistry::polygon().normalize(WMATIC, U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(amount.value(), Some(udec256!(1)));
    }

    #[test]
    fn test_normalize_keeps_fractional_precision() {
        // 0.123456 USDC survives normalization exactly.
        let amount = AssetRegistry::polygon().normalize(USDC, U256::from(123_456u64));
        assert_eq!(amount.value(), Some(udec256!(0.123456)));
    }

    #[test]
    fn test_unknown_asset_is_not_zero() {
        let stranger = address!("0x00000000000000000000000000000000000000aa");
        let amount = AssetRegistry::polygon().normalize(stranger, U256::ZERO);
        assert!(amount.is_unknown());
        assert_eq!(amount.value(), None);
        assert_ne!(
            amount,
            NormalizedAmount::Known {
                symbol: "".to_string(),
                value: udec256!(0),
            }
        );
    }

    #[test]
    fn test_lookup_ignores_hex_casing() {
        // Same address, different source casing: one key after parsing.
        let lower: Address = "0x3c499c542cef5e3811e1192ce70d8cc03d5c3359"
            .parse()
            .unwrap();
        assert_eq!(lower, USDC);
        assert_eq!(
            AssetRegistry::polygon().get(lower).map(|d| d.symbol()),
            Some("USDC")
        );
    }
}
