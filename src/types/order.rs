use alloy::primitives::{Address, B256, U256};

/// Limit order recovered from `fillOrder` call data.
///
/// Field widths follow the wire encoding: addresses are the low 20 bytes of
/// their 32-byte slots (whatever occupies the high 12 bytes is discarded,
/// never validated), amounts are full-width 256-bit integers, and
/// [`maker_asset_data`] is carried verbatim as an opaque blob.
///
/// Built once per run by [`crate::calldata::decode_fill_order`] and
/// immutable thereafter.
///
/// [`maker_asset_data`]: Self::maker_asset_data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Order {
    salt: U256,
    maker: Address,
    receiver: Address,
    maker_asset: Address,
    taker_asset: Address,
    making_amount: U256,
    taking_amount: U256,
    maker_asset_data: B256,
}

impl Order {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        salt: U256,
        maker: Address,
        receiver: Address,
        maker_asset: Address,
        taker_asset: Address,
        making_amount: U256,
        taking_amount: U256,
        maker_asset_data: B256,
    ) -> Self {
        Self {
            salt,
            maker,
            receiver,
            maker_asset,
            taker_asset,
            making_amount,
            taking_amount,
            maker_asset_data,
        }
    }

    /// Order salt / nonce.
    pub fn salt(&self) -> U256 {
        self.salt
    }

    /// Wallet that signed the order and funds the maker side.
    pub fn maker(&self) -> Address {
        self.maker
    }

    /// Recipient of the taker asset.
    pub fn receiver(&self) -> Address {
        self.receiver
    }

    /// Token the maker is selling.
    pub fn maker_asset(&self) -> Address {
        self.maker_asset
    }

    /// Token the maker is buying.
    pub fn taker_asset(&self) -> Address {
        self.taker_asset
    }

    /// Raw amount of the maker asset offered.
    pub fn making_amount(&self) -> U256 {
        self.making_amount
    }

    /// Raw amount of the taker asset requested.
    pub fn taking_amount(&self) -> U256 {
        self.taking_amount
    }

    /// Opaque maker-asset extension slot, passed through undecoded.
    pub fn maker_asset_data(&self) -> B256 {
        self.maker_asset_data
    }
}

/// Taker-side parameters of the fill attempt, decoded alongside [`Order`].
///
/// The signature halves are raw 32-byte blobs, not integers; this crate
/// never validates them (see crate-level non-goals).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillParams {
    signature_r: B256,
    signature_vs: B256,
    fill_amount: U256,
    taker_traits: U256,
}

impl FillParams {
    pub(crate) fn new(
        signature_r: B256,
        signature_vs: B256,
        fill_amount: U256,
        taker_traits: U256,
    ) -> Self {
        Self {
            signature_r,
            signature_vs,
            fill_amount,
            taker_traits,
        }
    }

    /// `r` half of the maker's order signature.
    pub fn signature_r(&self) -> B256 {
        self.signature_r
    }

    /// Compact `vs` half of the maker's order signature.
    pub fn signature_vs(&self) -> B256 {
        self.signature_vs
    }

    /// Raw amount the taker attempted to fill.
    pub fn fill_amount(&self) -> U256 {
        self.fill_amount
    }

    /// Packed taker execution flags.
    pub fn taker_traits(&self) -> U256 {
        self.taker_traits
    }
}
