use alloy::primitives::U256;
use fastnum::{
    bint,
    decimal::{Context, RoundingMode, UnsignedDecimal},
};

/// Fixed-point to decimal converter.
///
/// Scales a raw on-chain integer down by the token's decimal exponent,
/// e.g. `1_000_000` with 6 decimals becomes `1.0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    decimals: i32,
}

impl Converter {
    pub(crate) fn new(decimals: u8) -> Self {
        Self {
            decimals: decimals as i32,
        }
    }

    pub fn from_unsigned<const N: usize>(&self, value: U256) -> UnsignedDecimal<N> {
        let unscaled = bint::UInt::<N>::from_le_slice(value.as_le_slice())
            .expect("Converter: U256 -> UInt::<N>");
        UnsignedDecimal::<N>::from_parts(
            unscaled,
            -self.decimals,
            Context::default().with_rounding_mode(RoundingMode::Floor),
        )
    }
}
