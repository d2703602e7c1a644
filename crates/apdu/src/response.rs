//! Fixed-offset decoding of response data (status word already removed)

use crate::constants::config_flags;
use crate::constants::length::{CHAIN_CODE_SIZE, SIGNATURE_COMPONENT_SIZE};
use crate::error::{ResponseError, ResponseResult};
use crate::status::Operation;
use serde::{Deserialize, Serialize};

const SIGNATURE_LEN: usize = 1 + 2 * SIGNATURE_COMPONENT_SIZE;

fn require(operation: Operation, data: &[u8], expected: usize) -> ResponseResult<()> {
    if data.len() < expected {
        return Err(ResponseError::too_short(operation, expected, data.len()));
    }
    Ok(())
}

fn components(data: &[u8]) -> ([u8; 32], [u8; 32]) {
    let mut r = [0u8; SIGNATURE_COMPONENT_SIZE];
    let mut s = [0u8; SIGNATURE_COMPONENT_SIZE];
    r.copy_from_slice(&data[1..1 + SIGNATURE_COMPONENT_SIZE]);
    s.copy_from_slice(&data[1 + SIGNATURE_COMPONENT_SIZE..SIGNATURE_LEN]);
    (r, s)
}

/// Public key, address and optional chain code for a derivation path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    /// Uncompressed secp256k1 public key
    pub public_key: Vec<u8>,
    /// `0x`-prefixed address as rendered by the device
    pub address: String,
    /// BIP 32 chain code, when requested
    pub chain_code: Option<[u8; CHAIN_CODE_SIZE]>,
}

impl AddressInfo {
    /// Decode `pkLen pk addrLen addr [chainCode]`
    pub fn parse(data: &[u8], with_chain_code: bool) -> ResponseResult<Self> {
        let op = Operation::GetAddress;
        require(op, data, 1)?;
        let pk_len = data[0] as usize;
        let addr_len_at = 1 + pk_len;
        require(op, data, addr_len_at + 1)?;
        let addr_len = data[addr_len_at] as usize;
        let addr_at = addr_len_at + 1;
        let chain_at = addr_at + addr_len;
        let total = if with_chain_code {
            chain_at + CHAIN_CODE_SIZE
        } else {
            chain_at
        };
        require(op, data, total)?;

        let address_text = String::from_utf8_lossy(&data[addr_at..chain_at]);
        let chain_code = if with_chain_code {
            let mut code = [0u8; CHAIN_CODE_SIZE];
            code.copy_from_slice(&data[chain_at..total]);
            Some(code)
        } else {
            None
        };

        Ok(Self {
            public_key: data[1..addr_len_at].to_vec(),
            address: format!("0x{}", address_text),
            chain_code,
        })
    }

    /// Public key as lowercase hex
    pub fn public_key_hex(&self) -> String {
        hex::encode(&self.public_key)
    }

    /// Chain code as lowercase hex
    pub fn chain_code_hex(&self) -> Option<String> {
        self.chain_code.map(hex::encode)
    }
}

/// ECDSA signature with recovery byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Recovery byte as returned by the device
    pub v: u8,
    /// Big-endian r
    pub r: [u8; 32],
    /// Big-endian s
    pub s: [u8; 32],
}

impl Signature {
    /// Decode `v(1) r(32) s(32)`
    pub fn parse(operation: Operation, data: &[u8]) -> ResponseResult<Self> {
        require(operation, data, SIGNATURE_LEN)?;
        let (r, s) = components(data);
        Ok(Self { v: data[0], r, s })
    }

    /// v as two hex digits
    pub fn v_hex(&self) -> String {
        format!("{:02x}", self.v)
    }

    /// r as 64 hex digits
    pub fn r_hex(&self) -> String {
        hex::encode(self.r)
    }

    /// s as 64 hex digits
    pub fn s_hex(&self) -> String {
        hex::encode(self.s)
    }
}

/// Stark ECDSA signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarkSignature {
    /// Big-endian r
    pub r: [u8; 32],
    /// Big-endian s
    pub s: [u8; 32],
}

impl StarkSignature {
    /// Decode `_(1) r(32) s(32)`; the leading byte carries no information
    pub fn parse(operation: Operation, data: &[u8]) -> ResponseResult<Self> {
        require(operation, data, SIGNATURE_LEN)?;
        let (r, s) = components(data);
        Ok(Self { r, s })
    }

    /// r as 64 hex digits
    pub fn r_hex(&self) -> String {
        hex::encode(self.r)
    }

    /// s as 64 hex digits
    pub fn s_hex(&self) -> String {
        hex::encode(self.s)
    }
}

/// Flags and version reported by the app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfiguration {
    /// Blind signing of contract data allowed
    pub arbitrary_data_enabled: bool,
    /// Token metadata must be provided before signing token transfers
    pub erc20_provisioning_necessary: bool,
    /// StarkEx commands available
    pub stark_enabled: bool,
    /// StarkEx v2 commands available
    pub stark_v2_supported: bool,
    /// `major.minor.patch`
    pub version: String,
}

impl AppConfiguration {
    /// Decode `flags major minor patch`
    pub fn parse(data: &[u8]) -> ResponseResult<Self> {
        require(Operation::GetAppConfiguration, data, 4)?;
        let flags = data[0];
        Ok(Self {
            arbitrary_data_enabled: flags & config_flags::ARBITRARY_DATA_SIGNATURE != 0,
            erc20_provisioning_necessary: flags & config_flags::ERC20_EXTERNAL_INFO != 0,
            stark_enabled: flags & config_flags::STARK_ENABLED != 0,
            stark_v2_supported: flags & config_flags::STARK_V2_SUPPORTED != 0,
            version: format!("{}.{}.{}", data[1], data[2], data[3]),
        })
    }
}

/// Raw public key bytes (Stark or Eth2); the whole data region
pub fn parse_public_key(operation: Operation, data: &[u8]) -> ResponseResult<Vec<u8>> {
    require(operation, data, 1)?;
    Ok(data.to_vec())
}
