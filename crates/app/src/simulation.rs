//! Scripted in-memory device for testing without hardware

use crate::error::TransportError;
use crate::transport::Transport;
use async_trait::async_trait;
use eth_hw_apdu::{ApduCommand, StatusWord};
use parking_lot::Mutex;
use std::collections::VecDeque;

enum Scripted {
    Response(Vec<u8>),
    Disconnect(String),
}

/// Transport that answers from a queue of scripted responses and records
/// every command it receives.
///
/// Running out of scripted responses is reported as a disconnect.
#[derive(Default)]
pub struct SimulatedDevice {
    script: Mutex<VecDeque<Scripted>>,
    sent: Mutex<Vec<ApduCommand>>,
}

impl SimulatedDevice {
    /// Device with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response of `data` followed by `status`
    pub fn respond(&self, data: &[u8], status: StatusWord) -> &Self {
        let mut response = data.to_vec();
        response.extend_from_slice(&status.code().to_be_bytes());
        self.script.lock().push_back(Scripted::Response(response));
        self
    }

    /// Queue a successful response carrying `data`
    pub fn respond_ok(&self, data: &[u8]) -> &Self {
        self.respond(data, StatusWord::OK)
    }

    /// Queue raw response bytes, status word included
    pub fn respond_raw(&self, response: &[u8]) -> &Self {
        self.script
            .lock()
            .push_back(Scripted::Response(response.to_vec()));
        self
    }

    /// Queue a transport failure
    pub fn disconnect(&self, reason: &str) -> &Self {
        self.script
            .lock()
            .push_back(Scripted::Disconnect(reason.to_string()));
        self
    }

    /// Commands received so far, in order
    pub fn sent(&self) -> Vec<ApduCommand> {
        self.sent.lock().clone()
    }

    /// Scripted entries not consumed yet
    pub fn pending(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl Transport for SimulatedDevice {
    async fn exchange(&self, command: &ApduCommand) -> Result<Vec<u8>, TransportError> {
        self.sent.lock().push(command.clone());
        let next = self.script.lock().pop_front();
        match next {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::Disconnect(reason)) => Err(TransportError::Disconnected(reason)),
            None => Err(TransportError::Disconnected(
                "no scripted response left".to_string(),
            )),
        }
    }
}
