//! Transport abstraction consumed by the app client

use crate::error::TransportError;
use async_trait::async_trait;
use eth_hw_apdu::ApduCommand;
use std::sync::Arc;

/// One request/response exchange with the device.
///
/// Implementations send the command (HID, BLE, speculos, ...) and return the
/// raw response including the trailing two-byte status word. Status words
/// are interpreted by the caller, not by the transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `command` and wait for the complete response
    async fn exchange(&self, command: &ApduCommand) -> Result<Vec<u8>, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn exchange(&self, command: &ApduCommand) -> Result<Vec<u8>, TransportError> {
        (**self).exchange(command).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn exchange(&self, command: &ApduCommand) -> Result<Vec<u8>, TransportError> {
        (**self).exchange(command).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn exchange(&self, command: &ApduCommand) -> Result<Vec<u8>, TransportError> {
        (**self).exchange(command).await
    }
}
