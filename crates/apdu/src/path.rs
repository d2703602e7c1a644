//! BIP 32 derivation paths and their APDU header encoding

use crate::constants::length::{BIP32_INDEX_SIZE, MAX_BIP32_PATH_DEPTH};
use crate::error::{InputError, InputResult};
use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hardened derivation flag
pub const HARDENED: u32 = 0x8000_0000;

/// Ordered list of derivation indexes, hardening bit included
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivationPath {
    components: Vec<u32>,
}

impl DerivationPath {
    /// Build a path from raw indexes
    pub fn from_components(components: Vec<u32>) -> InputResult<Self> {
        if components.is_empty() {
            return Err(InputError::invalid_path("", "path has no components"));
        }
        if components.len() > MAX_BIP32_PATH_DEPTH {
            return Err(InputError::invalid_path(
                &format_components(&components),
                format!("depth {} exceeds {}", components.len(), MAX_BIP32_PATH_DEPTH),
            ));
        }
        Ok(Self { components })
    }

    /// Raw indexes
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// Number of components
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// Length of the encoded header: count byte plus one u32 per component
    pub fn encoded_len(&self) -> usize {
        1 + BIP32_INDEX_SIZE * self.components.len()
    }

    /// Append the header (count byte, then big-endian indexes) to `out`
    pub fn write_header(&self, out: &mut Vec<u8>) {
        let start = out.len();
        out.resize(start + self.encoded_len(), 0);
        out[start] = self.components.len() as u8;
        let slots = out[start + 1..].chunks_exact_mut(BIP32_INDEX_SIZE);
        for (slot, &component) in slots.zip(&self.components) {
            BigEndian::write_u32(slot, component);
        }
    }

    /// Encoded header as a fresh buffer
    pub fn to_header(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_header(&mut out);
        out
    }

    /// Decode a header produced by [`DerivationPath::write_header`].
    ///
    /// Returns the path and the number of bytes consumed.
    pub fn decode_header(bytes: &[u8]) -> InputResult<(Self, usize)> {
        let (&count, rest) = bytes
            .split_first()
            .ok_or_else(|| InputError::invalid_path("", "empty header"))?;
        let count = count as usize;
        let needed = count * BIP32_INDEX_SIZE;
        if rest.len() < needed {
            return Err(InputError::InvalidLength {
                field: "path header",
                expected: 1 + needed,
                actual: bytes.len(),
            });
        }
        let components = rest[..needed]
            .chunks_exact(BIP32_INDEX_SIZE)
            .map(BigEndian::read_u32)
            .collect();
        Ok((Self::from_components(components)?, 1 + needed))
    }
}

impl FromStr for DerivationPath {
    type Err = InputError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let body = trimmed
            .strip_prefix("m/")
            .or_else(|| trimmed.strip_prefix("M/"))
            .unwrap_or(trimmed);

        if body.is_empty() {
            return Err(InputError::invalid_path(path, "path has no components"));
        }

        let mut components = Vec::new();
        for element in body.split('/') {
            components.push(parse_component(path, element)?);
        }

        if components.len() > MAX_BIP32_PATH_DEPTH {
            return Err(InputError::invalid_path(
                path,
                format!("depth {} exceeds {}", components.len(), MAX_BIP32_PATH_DEPTH),
            ));
        }

        Ok(Self { components })
    }
}

fn parse_component(path: &str, element: &str) -> InputResult<u32> {
    let (digits, hardened) = match element.strip_suffix('\'') {
        Some(digits) => (digits, true),
        None => (element, false),
    };

    if digits.is_empty() {
        return Err(InputError::invalid_path(path, "empty component"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::invalid_path(
            path,
            format!("component '{}' is not a number", element),
        ));
    }

    let value: u32 = digits.parse().map_err(|_| {
        InputError::invalid_path(path, format!("component '{}' is out of range", element))
    })?;
    if value >= HARDENED {
        return Err(InputError::invalid_path(
            path,
            format!("component '{}' is out of range", element),
        ));
    }

    Ok(if hardened { value | HARDENED } else { value })
}

fn format_components(components: &[u32]) -> String {
    components
        .iter()
        .map(|&c| {
            if c & HARDENED != 0 {
                format!("{}'", c & !HARDENED)
            } else {
                c.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_components(&self.components))
    }
}

impl TryFrom<&str> for DerivationPath {
    type Error = InputError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
