//! StarkEx asset quantization descriptors

use crate::constants::length::{ETH_ADDRESS_SIZE, STARK_ASSET_SIZE, WORD_SIZE};
use crate::error::{InputError, InputResult};
use crate::field::{EthAddress, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asset encoding understood by the device
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantizationType {
    /// Native ether
    Eth = 1,
    /// Fungible token
    Erc20 = 2,
    /// Non-fungible token
    Erc721 = 3,
    /// Mintable fungible token
    Erc20Mintable = 4,
    /// Mintable non-fungible token
    Erc721Mintable = 5,
}

impl QuantizationType {
    /// Wire tag
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Name used by hosts
    pub fn name(self) -> &'static str {
        match self {
            QuantizationType::Eth => "eth",
            QuantizationType::Erc20 => "erc20",
            QuantizationType::Erc721 => "erc721",
            QuantizationType::Erc20Mintable => "erc20mintable",
            QuantizationType::Erc721Mintable => "erc721mintable",
        }
    }
}

impl TryFrom<u8> for QuantizationType {
    type Error = InputError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(QuantizationType::Eth),
            2 => Ok(QuantizationType::Erc20),
            3 => Ok(QuantizationType::Erc721),
            4 => Ok(QuantizationType::Erc20Mintable),
            5 => Ok(QuantizationType::Erc721Mintable),
            other => Err(InputError::InvalidQuantizationType(other.to_string())),
        }
    }
}

impl FromStr for QuantizationType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eth" => Ok(QuantizationType::Eth),
            "erc20" => Ok(QuantizationType::Erc20),
            "erc721" => Ok(QuantizationType::Erc721),
            "erc20mintable" => Ok(QuantizationType::Erc20Mintable),
            "erc721mintable" => Ok(QuantizationType::Erc721Mintable),
            other => Err(InputError::InvalidQuantizationType(other.to_string())),
        }
    }
}

impl fmt::Display for QuantizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Asset reference for the v2 StarkEx commands.
///
/// Each variant carries only the fields its encoding uses; the rest are
/// zero-filled on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StarkAsset {
    /// Native ether
    Eth {
        /// Quantization factor
        quantum: Quantity,
    },
    /// Fungible token
    Erc20 {
        /// Token contract
        contract: EthAddress,
        /// Quantization factor
        quantum: Quantity,
    },
    /// Non-fungible token
    Erc721 {
        /// Token contract
        contract: EthAddress,
        /// Token identifier
        token_id: Quantity,
    },
    /// Mintable fungible token
    #[serde(rename = "erc20mintable")]
    MintableErc20 {
        /// Token contract
        contract: EthAddress,
        /// Quantization factor
        quantum: Quantity,
        /// Minting blob
        minting_blob: Quantity,
    },
    /// Mintable non-fungible token
    #[serde(rename = "erc721mintable")]
    MintableErc721 {
        /// Token contract
        contract: EthAddress,
        /// Minting blob
        minting_blob: Quantity,
    },
}

impl StarkAsset {
    /// Build a descriptor from loosely typed host arguments.
    ///
    /// The tag decides which arguments are read; the others are ignored.
    /// A required argument that is missing counts as zero.
    pub fn from_parts(
        quantization_type: &str,
        contract: Option<EthAddress>,
        quantum: Option<Quantity>,
        blob_or_token_id: Option<Quantity>,
    ) -> InputResult<Self> {
        let kind: QuantizationType = quantization_type.parse()?;
        let contract = contract.unwrap_or(EthAddress([0u8; ETH_ADDRESS_SIZE]));
        let quantum = quantum.unwrap_or_default();
        let blob = blob_or_token_id.unwrap_or_default();
        Ok(match kind {
            QuantizationType::Eth => StarkAsset::Eth { quantum },
            QuantizationType::Erc20 => StarkAsset::Erc20 { contract, quantum },
            QuantizationType::Erc721 => StarkAsset::Erc721 {
                contract,
                token_id: blob,
            },
            QuantizationType::Erc20Mintable => StarkAsset::MintableErc20 {
                contract,
                quantum,
                minting_blob: blob,
            },
            QuantizationType::Erc721Mintable => StarkAsset::MintableErc721 {
                contract,
                minting_blob: blob,
            },
        })
    }

    /// Quantization tag of this descriptor
    pub fn quantization_type(&self) -> QuantizationType {
        match self {
            StarkAsset::Eth { .. } => QuantizationType::Eth,
            StarkAsset::Erc20 { .. } => QuantizationType::Erc20,
            StarkAsset::Erc721 { .. } => QuantizationType::Erc721,
            StarkAsset::MintableErc20 { .. } => QuantizationType::Erc20Mintable,
            StarkAsset::MintableErc721 { .. } => QuantizationType::Erc721Mintable,
        }
    }

    /// Contract, quantum and blob/token id slots; `None` means zero-filled
    pub fn slots(&self) -> (Option<&EthAddress>, Option<&Quantity>, Option<&Quantity>) {
        match self {
            StarkAsset::Eth { quantum } => (None, Some(quantum), None),
            StarkAsset::Erc20 { contract, quantum } => (Some(contract), Some(quantum), None),
            StarkAsset::Erc721 { contract, token_id } => (Some(contract), None, Some(token_id)),
            StarkAsset::MintableErc20 {
                contract,
                quantum,
                minting_blob,
            } => (Some(contract), Some(quantum), Some(minting_blob)),
            StarkAsset::MintableErc721 {
                contract,
                minting_blob,
            } => (Some(contract), None, Some(minting_blob)),
        }
    }

    /// Encoded size without the tag byte
    pub const BODY_SIZE: usize = ETH_ADDRESS_SIZE + WORD_SIZE + WORD_SIZE;

    /// Encoded size with the tag byte
    pub const ENCODED_SIZE: usize = STARK_ASSET_SIZE;
}
