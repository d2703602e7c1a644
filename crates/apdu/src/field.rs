//! Typed values written into fixed-width frame fields

use crate::constants::length::{ETH_ADDRESS_SIZE, WORD_SIZE};
use crate::error::{InputError, InputResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn strip_hex_prefix(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

fn decode_exact<const N: usize>(field: &'static str, s: &str) -> InputResult<[u8; N]> {
    let bytes = hex::decode(strip_hex_prefix(s)).map_err(|e| InputError::InvalidHex {
        field,
        reason: e.to_string(),
    })?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| InputError::InvalidLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}

/// 20-byte Ethereum address (token contracts, conditional transfer targets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EthAddress(pub [u8; ETH_ADDRESS_SIZE]);

impl EthAddress {
    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; ETH_ADDRESS_SIZE] {
        &self.0
    }
}

impl FromStr for EthAddress {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_exact("address", s).map(Self)
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Exact 32-byte value (EIP-712 hashes, Stark public keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word(pub [u8; WORD_SIZE]);

impl Word {
    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; WORD_SIZE] {
        &self.0
    }
}

impl FromStr for Word {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_exact("word", s).map(Self)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Unsigned big-endian magnitude of arbitrary length.
///
/// Written into a fixed-width field by left-padding with zeros; a value whose
/// significant bytes exceed the field width is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<u8>")]
pub struct Quantity(Vec<u8>);

impl Quantity {
    /// Zero
    pub fn zero() -> Self {
        Self(Vec::new())
    }

    /// Magnitude from big-endian bytes; leading zeros are dropped
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        Self(bytes[first..].to_vec())
    }

    /// Parse a hex magnitude, `0x` optional, odd digit counts allowed
    pub fn from_hex(field: &'static str, s: &str) -> InputResult<Self> {
        let digits = strip_hex_prefix(s);
        let padded;
        let digits = if digits.len() % 2 == 1 {
            padded = format!("0{}", digits);
            padded.as_str()
        } else {
            digits
        };
        let bytes = hex::decode(digits).map_err(|e| InputError::InvalidHex {
            field,
            reason: e.to_string(),
        })?;
        Ok(Self::from_be_bytes(&bytes))
    }

    /// Significant bytes, no leading zeros
    pub fn significant_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the value is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Left-pad into a buffer of exactly `width` bytes
    pub fn to_padded(&self, field: &'static str, width: usize) -> InputResult<Vec<u8>> {
        if self.0.len() > width {
            return Err(InputError::FieldOverflow {
                field,
                width,
                actual: self.0.len(),
            });
        }
        let mut out = vec![0u8; width];
        out[width - self.0.len()..].copy_from_slice(&self.0);
        Ok(out)
    }
}

impl From<Vec<u8>> for Quantity {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_be_bytes(&bytes)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::from_be_bytes(&value.to_be_bytes())
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self::from_be_bytes(&value.to_be_bytes())
    }
}

impl From<u128> for Quantity {
    fn from(value: u128) -> Self {
        Self::from_be_bytes(&value.to_be_bytes())
    }
}

impl From<Word> for Quantity {
    fn from(value: Word) -> Self {
        Self::from_be_bytes(&value.0)
    }
}

impl FromStr for Quantity {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex("quantity", s)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("0x0")
        } else {
            write!(f, "0x{}", hex::encode(&self.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_pads_to_field_width() {
        let q = Quantity::from(0x0102_u64);
        assert_eq!(q.to_padded("amount", 8).unwrap(), vec![0, 0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(Quantity::zero().to_padded("amount", 4).unwrap(), vec![0; 4]);
    }

    #[test]
    fn quantity_rejects_overflow() {
        let q = Quantity::from_hex("quantum", "0x010000000000000000").unwrap();
        assert_eq!(
            q.to_padded("amount", 8),
            Err(InputError::FieldOverflow {
                field: "amount",
                width: 8,
                actual: 9
            })
        );
    }

    #[test]
    fn quantity_parses_odd_hex_and_leading_zeros() {
        let q: Quantity = "0x00abc".parse().unwrap();
        assert_eq!(q.significant_bytes(), &[0x0a, 0xbc]);
        assert_eq!(q.to_string(), "0x0abc");
        assert!("0x".parse::<Quantity>().unwrap().is_zero());
        assert!("0xzz".parse::<Quantity>().is_err());
    }

    #[test]
    fn deserialized_quantity_drops_leading_zeros() {
        let q: Quantity = serde_json::from_str("[0,1]").unwrap();
        assert_eq!(q, Quantity::from(1u32));
        assert_eq!(q.significant_bytes(), &[1]);
        assert_eq!(q.to_string(), "0x01");

        let mut wide = vec![0u8];
        wide.extend_from_slice(&[0xff; 32]);
        let q: Quantity = serde_json::from_value(serde_json::json!(wide)).unwrap();
        assert_eq!(q.to_padded("quantum", 32).unwrap(), vec![0xff; 32]);
        assert_eq!(serde_json::to_string(&q).unwrap(), serde_json::to_string(&[0xffu8; 32]).unwrap());
    }

    #[test]
    fn address_requires_twenty_bytes() {
        let addr: EthAddress = "0xe41d2489571d322189246dafa5ebde1f4699f498".parse().unwrap();
        assert_eq!(addr.0[0], 0xe4);
        assert_eq!(addr.to_string(), "0xe41d2489571d322189246dafa5ebde1f4699f498");
        assert!(matches!(
            "0xe41d".parse::<EthAddress>(),
            Err(InputError::InvalidLength { expected: 20, actual: 2, .. })
        ));
    }
}
