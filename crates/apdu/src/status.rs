//! Device status words and their per-operation meaning

use serde::{Deserialize, Serialize};
use std::fmt;

/// 16-bit status word trailing every device response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusWord(pub u16);

impl StatusWord {
    /// Command executed
    pub const OK: StatusWord = StatusWord(0x9000);
    /// Device locked
    pub const LOCKED_DEVICE: StatusWord = StatusWord(0x5515);
    /// User refused on device
    pub const USER_REFUSED_ON_DEVICE: StatusWord = StatusWord(0x5501);
    /// Wrong length
    pub const INCORRECT_LENGTH: StatusWord = StatusWord(0x6700);
    /// Security status not satisfied
    pub const SECURITY_STATUS_NOT_SATISFIED: StatusWord = StatusWord(0x6982);
    /// Conditions of use not satisfied (user denial)
    pub const CONDITIONS_OF_USE_NOT_SATISFIED: StatusWord = StatusWord(0x6985);
    /// Invalid data
    pub const INCORRECT_DATA: StatusWord = StatusWord(0x6A80);
    /// Not enough memory space
    pub const NOT_ENOUGH_MEMORY_SPACE: StatusWord = StatusWord(0x6A84);
    /// Referenced data not found
    pub const REFERENCED_DATA_NOT_FOUND: StatusWord = StatusWord(0x6A88);
    /// Wrong p1 or p2
    pub const INCORRECT_P1_P2: StatusWord = StatusWord(0x6B00);
    /// Instruction not supported by the running app
    pub const INS_NOT_SUPPORTED: StatusWord = StatusWord(0x6D00);
    /// Class not supported, usually the app is not open
    pub const CLA_NOT_SUPPORTED: StatusWord = StatusWord(0x6E00);
    /// Technical problem
    pub const TECHNICAL_PROBLEM: StatusWord = StatusWord(0x6F00);

    /// Read the status word from the last two bytes of a response
    pub fn from_trailer(response: &[u8]) -> Option<(StatusWord, &[u8])> {
        let split = response.len().checked_sub(2)?;
        let (data, sw) = response.split_at(split);
        Some((StatusWord(u16::from_be_bytes([sw[0], sw[1]])), data))
    }

    /// Raw code
    pub fn code(self) -> u16 {
        self.0
    }

    /// Whether the command succeeded
    pub fn is_ok(self) -> bool {
        self == StatusWord::OK
    }

    /// Whether the user declined on the device
    pub fn is_user_rejection(self) -> bool {
        self == StatusWord::CONDITIONS_OF_USE_NOT_SATISFIED
            || self == StatusWord::USER_REFUSED_ON_DEVICE
    }

    /// Human-readable description of known codes
    pub fn description(self) -> Option<&'static str> {
        Some(match self.0 {
            0x9000 => "OK",
            0x5515 => "Locked device",
            0x5501 => "User refused on device",
            0x6700 => "Incorrect length",
            0x6982 => "Security status not satisfied",
            0x6985 => "Condition of use not satisfied (denied by the user?)",
            0x6A80 => "Invalid data received",
            0x6A84 => "Not enough memory space",
            0x6A88 => "Referenced data not found",
            0x6B00 => "Invalid parameter received",
            0x6D00 => "Instruction not supported",
            0x6E00 => "App does not seem to be open",
            0x6F00 => "Technical problem",
            _ => return None,
        })
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(text) => write!(f, "0x{:04X} ({})", self.0, text),
            None => write!(f, "0x{:04X}", self.0),
        }
    }
}

/// Logical operation a frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Public key and address retrieval
    GetAddress,
    /// ERC-20 token metadata provisioning
    ProvideErc20TokenInformation,
    /// Transaction signing
    SignTransaction,
    /// App flags and version
    GetAppConfiguration,
    /// Personal message signing
    SignPersonalMessage,
    /// EIP-712 signing from hashes
    SignEip712HashedMessage,
    /// Stark public key retrieval
    StarkGetPublicKey,
    /// Stark order signing, both layouts
    StarkSignOrder,
    /// Stark transfer signing, both layouts
    StarkSignTransfer,
    /// Stark quantum provisioning, both layouts
    StarkProvideQuantum,
    /// Stark raw hash signing
    StarkUnsafeSign,
    /// Eth2 public key retrieval
    Eth2GetPublicKey,
    /// Eth2 withdrawal index configuration
    Eth2SetWithdrawalIndex,
}

impl Operation {
    /// Stable name used in logs and errors
    pub fn name(self) -> &'static str {
        match self {
            Operation::GetAddress => "getAddress",
            Operation::ProvideErc20TokenInformation => "provideERC20TokenInformation",
            Operation::SignTransaction => "signTransaction",
            Operation::GetAppConfiguration => "getAppConfiguration",
            Operation::SignPersonalMessage => "signPersonalMessage",
            Operation::SignEip712HashedMessage => "signEIP712HashedMessage",
            Operation::StarkGetPublicKey => "starkGetPublicKey",
            Operation::StarkSignOrder => "starkSignOrder",
            Operation::StarkSignTransfer => "starkSignTransfer",
            Operation::StarkProvideQuantum => "starkProvideQuantum",
            Operation::StarkUnsafeSign => "starkUnsafeSign",
            Operation::Eth2GetPublicKey => "eth2GetPublicKey",
            Operation::Eth2SetWithdrawalIndex => "eth2SetWithdrawalIndex",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Meaning of a status word for a given operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// Command executed
    Success,
    /// Firmware predates this command; reported as `false`
    Unsupported,
    /// Contract data must be enabled in the app settings
    ContractDataDisabled,
    /// Any other refusal, carrying the raw status
    Refused(StatusWord),
}

/// Operation-specific remaps. Anything not listed here and not `0x9000`
/// is a refusal.
const REMAPS: &[(Operation, StatusWord, StatusOutcome)] = &[
    (
        Operation::ProvideErc20TokenInformation,
        StatusWord::INS_NOT_SUPPORTED,
        StatusOutcome::Unsupported,
    ),
    (
        Operation::StarkProvideQuantum,
        StatusWord::INS_NOT_SUPPORTED,
        StatusOutcome::Unsupported,
    ),
    (
        Operation::Eth2SetWithdrawalIndex,
        StatusWord::INS_NOT_SUPPORTED,
        StatusOutcome::Unsupported,
    ),
    (
        Operation::SignTransaction,
        StatusWord::INCORRECT_DATA,
        StatusOutcome::ContractDataDisabled,
    ),
];

/// Translate a status word returned while running `operation`
pub fn translate(operation: Operation, status: StatusWord) -> StatusOutcome {
    if status.is_ok() {
        return StatusOutcome::Success;
    }
    REMAPS
        .iter()
        .find(|(op, sw, _)| *op == operation && *sw == status)
        .map(|&(_, _, outcome)| outcome)
        .unwrap_or(StatusOutcome::Refused(status))
}
