//! Fixed-layout `fillOrder` call-data decoder.
//!
//! No ABI introspection is available for this entry point, so the decoder
//! walks a fixed window of twelve 32-byte slots after the selector:
//!
//! | slot  | field                          |
//! |-------|--------------------------------|
//! | 0     | salt                           |
//! | 1–4   | maker, receiver, makerAsset, takerAsset (low 20 bytes) |
//! | 5–6   | makingAmount, takingAmount     |
//! | 7     | makerAssetData (opaque blob)   |
//! | 8–9   | signature r, vs (raw blobs)    |
//! | 10–11 | fillAmount, takerTraits        |
//!
//! Decoding is a pure function of the bytes: no network access, bit-identical
//! output for identical input. Short input is rejected, never zero-padded;
//! slots past the fixed window are not interpreted.

use alloy::primitives::{Address, B256, U256};

use crate::{
    abi::{FILL_ORDER_SELECTOR, Selector},
    error::TriageError,
    types::{FillParams, Order},
};

const SLOT: usize = 32;

/// Number of argument slots in the fixed `fillOrder` window.
const SLOT_COUNT: usize = 12;

/// Minimum argument bytes after the selector.
const ARGS_LEN: usize = SLOT * SLOT_COUNT;

/// Decodes raw transaction input into the order and fill parameters.
///
/// Fails with [`TriageError::UnrecognizedSelector`] when the leading 4 bytes
/// are not the `fillOrder` selector, and [`TriageError::TruncatedInput`] when
/// the remainder is shorter than twelve slots or not slot-aligned.
pub fn decode_fill_order(input: &[u8]) -> Result<(Order, FillParams), TriageError> {
    let Some((selector, args)) = input.split_at_checked(4) else {
        return Err(TriageError::TruncatedInput {
            offset: input.len(),
            expected: ARGS_LEN,
        });
    };
    if selector != FILL_ORDER_SELECTOR {
        let mut found = Selector::default();
        found.copy_from_slice(selector);
        return Err(TriageError::UnrecognizedSelector { found });
    }
    if args.len() < ARGS_LEN || args.len() % SLOT != 0 {
        return Err(TriageError::TruncatedInput {
            offset: input.len(),
            expected: ARGS_LEN,
        });
    }

    let slot = |i: usize| &args[i * SLOT..(i + 1) * SLOT];
    let word = |i: usize| U256::from_be_slice(slot(i));
    // Low 20 bytes of the slot; high-order garbage is discarded by design
    // of the encoding, not validated.
    let address = |i: usize| Address::from_slice(&slot(i)[12..]);
    let blob = |i: usize| B256::from_slice(slot(i));

    let order = Order::new(
        word(0),
        address(1),
        address(2),
        address(3),
        address(4),
        word(5),
        word(6),
        blob(7),
    );
    let fill = FillParams::new(blob(8), blob(9), word(10), word(11));
    Ok((order, fill))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const MAKER: Address = address!("0x3f847d1f000000000000000000000000deadbeef");
    const USDC: Address = address!("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359");
    const WMATIC: Address = address!("0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270");

    fn slot_u256(value: U256) -> [u8; 32] {
        value.to_be_bytes::<32>()
    }

    fn slot_address(addr: Address, high_garbage: u8) -> [u8; 32] {
        let mut slot = [high_garbage; 32];
        slot[12..].copy_from_slice(addr.as_slice());
        slot
    }

    /// Well-formed `fillOrder` input: 1 USDC for 3 WMATIC.
    fn fixture(high_garbage: u8) -> Vec<u8> {
        let mut input = FILL_ORDER_SELECTOR.to_vec();
        input.extend(slot_u256(U256::from(42u64))); // salt
        input.extend(slot_address(MAKER, high_garbage));
        input.extend(slot_address(MAKER, high_garbage)); // receiver = maker
        input.extend(slot_address(USDC, high_garbage));
        input.extend(slot_address(WMATIC, high_garbage));
        input.extend(slot_u256(U256::from(1_000_000u64))); // 1 USDC
        input.extend(slot_u256(U256::from(3_000_000_000_000_000_000u64))); // 3 WMATIC
        input.extend([0xab; 32]); // makerAssetData
        input.extend([0x11; 32]); // r
        input.extend([0x22; 32]); // vs
        input.extend(slot_u256(U256::from(1_000_000u64))); // fillAmount
        input.extend(slot_u256(U256::from(1u64) << 255)); // takerTraits
        input
    }

    #[test]
    fn test_decode_full_fixture() {
        let (order, fill) = decode_fill_order(&fixture(0)).unwrap();

        assert_eq!(order.salt(), U256::from(42u64));
        assert_eq!(order.maker(), MAKER);
        assert_eq!(order.receiver(), MAKER);
        assert_eq!(order.maker_asset(), USDC);
        assert_eq!(order.taker_asset(), WMATIC);
        assert_eq!(order.making_amount(), U256::from(1_000_000u64));
        assert_eq!(
            order.taking_amount(),
            U256::from(3_000_000_000_000_000_000u64)
        );
        assert_eq!(order.maker_asset_data(), B256::from([0xab; 32]));

        assert_eq!(fill.signature_r(), B256::from([0x11; 32]));
        assert_eq!(fill.signature_vs(), B256::from([0x22; 32]));
        assert_eq!(fill.fill_amount(), U256::from(1_000_000u64));
        assert_eq!(fill.taker_traits(), U256::from(1u64) << 255);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let input = fixture(0);
        assert_eq!(
            decode_fill_order(&input).unwrap(),
            decode_fill_order(&input).unwrap()
        );
    }

    #[test]
    fn test_address_slots_tolerate_high_garbage() {
        // Same low 20 bytes must decode to the same addresses regardless of
        // what occupies the high 12 bytes of the slot.
        let (clean, _) = decode_fill_order(&fixture(0)).unwrap();
        let (dirty, _) = decode_fill_order(&fixture(0xff)).unwrap();
        assert_eq!(dirty.maker(), clean.maker());
        assert_eq!(dirty.maker_asset(), clean.maker_asset());
        assert_eq!(dirty.taker_asset(), clean.taker_asset());
    }

    #[test]
    fn test_unknown_selector_rejected() {
        let mut input = fixture(0);
        input[0] = 0xa9; // transfer() prefix instead of fillOrder
        assert!(matches!(
            decode_fill_order(&input),
            Err(TriageError::UnrecognizedSelector { found }) if found[0] == 0xa9
        ));
    }

    #[test]
    fn test_input_shorter_than_selector_rejected() {
        assert!(matches!(
            decode_fill_order(&[0x9f, 0xda]),
            Err(TriageError::TruncatedInput { offset: 2, .. })
        ));
    }

    #[test]
    fn test_short_slot_window_rejected() {
        // 11 full slots: aligned but below the fixed window.
        let input = fixture(0);
        assert!(matches!(
            decode_fill_order(&input[..4 + 11 * 32]),
            Err(TriageError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_unaligned_input_rejected_not_padded() {
        let mut input = fixture(0);
        input.pop();
        assert!(matches!(
            decode_fill_order(&input),
            Err(TriageError::TruncatedInput { .. })
        ));

        // Over-long but unaligned input is just as invalid.
        let mut long = fixture(0);
        long.push(0x00);
        assert!(matches!(
            decode_fill_order(&long),
            Err(TriageError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_trailing_slots_ignored() {
        let mut input = fixture(0);
        input.extend([0xcd; 64]); // two extra slots past the fixed window
        assert_eq!(
            decode_fill_order(&input).unwrap(),
            decode_fill_order(&fixture(0)).unwrap()
        );
    }
}
