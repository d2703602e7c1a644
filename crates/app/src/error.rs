//! Ethereum app error types

use eth_hw_apdu::{InputError, Operation, ResponseError, StatusWord};
use thiserror::Error;

/// Result type for app operations
pub type EthAppResult<T> = std::result::Result<T, EthAppError>;

/// Failure raised by a [`Transport`](crate::Transport) implementation
#[derive(Error, Debug)]
pub enum TransportError {
    /// Device went away mid-exchange
    #[error("Device disconnected: {0}")]
    Disconnected(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("Transport error: {0}")]
    Other(#[from] anyhow::Error),
}

/// App error types
#[derive(Error, Debug)]
pub enum EthAppError {
    /// Caller input rejected before anything was sent
    #[error(transparent)]
    Input(#[from] InputError),

    /// Transport failed; propagated unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Device refused the command
    #[error("Device refused {operation}: {status}")]
    DeviceRefusal {
        /// Operation in progress
        operation: Operation,
        /// Raw status word
        status: StatusWord,
    },

    /// Transaction needs blind signing enabled on the device
    #[error("Please enable Contract data on the Ethereum app Settings")]
    ContractDataDisabled,

    /// Response too short for the operation
    #[error(transparent)]
    UnexpectedResponse(#[from] ResponseError),

    /// Configuration could not be loaded or is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EthAppError {
    /// Status word of a device refusal
    pub fn status(&self) -> Option<StatusWord> {
        match self {
            EthAppError::DeviceRefusal { status, .. } => Some(*status),
            EthAppError::ContractDataDisabled => Some(StatusWord::INCORRECT_DATA),
            _ => None,
        }
    }

    /// Whether the user declined on the device
    pub fn is_user_rejection(&self) -> bool {
        self.status().is_some_and(StatusWord::is_user_rejection)
    }
}
