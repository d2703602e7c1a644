//! Sequential frame dispatch and status interpretation

use crate::error::{EthAppError, EthAppResult};
use crate::transport::Transport;
use eth_hw_apdu::{translate, Request, ResponseError, StatusOutcome, StatusWord};

/// Final answer of a dispatched request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Data of the last frame's response, status word removed
    Data(Vec<u8>),
    /// Firmware does not implement the command
    Unsupported,
}

/// Send every frame of `request` in order, each awaited before the next.
///
/// The status word of each response goes through the translation table;
/// anything but success ends the sequence on that frame. Only the last
/// frame's data is returned.
pub async fn dispatch<T: Transport + ?Sized>(
    transport: &T,
    request: &Request,
) -> EthAppResult<Reply> {
    let operation = request.operation();
    let frames = request.frames();
    let total = frames.len();

    for (index, frame) in frames.iter().enumerate() {
        tracing::trace!(
            target: "eth_hw::dispatch",
            %operation,
            frame = index + 1,
            total,
            apdu = %hex::encode(frame.serialize()),
            "=>"
        );

        let response = transport.exchange(frame).await?;
        let (status, data) = StatusWord::from_trailer(&response).ok_or(
            ResponseError::UnexpectedResponse {
                operation,
                expected: 2,
                actual: response.len(),
            },
        )?;

        tracing::trace!(
            target: "eth_hw::dispatch",
            %operation,
            frame = index + 1,
            status = %format_args!("{:04x}", status.code()),
            data = %hex::encode(data),
            "<="
        );

        match translate(operation, status) {
            StatusOutcome::Success if index + 1 == total => {
                tracing::debug!(
                    target: "eth_hw::dispatch",
                    %operation,
                    frames = total,
                    "completed"
                );
                return Ok(Reply::Data(data.to_vec()));
            }
            StatusOutcome::Success => {}
            StatusOutcome::Unsupported => {
                tracing::info!(
                    target: "eth_hw::dispatch",
                    %operation,
                    "not supported by this app version"
                );
                return Ok(Reply::Unsupported);
            }
            StatusOutcome::ContractDataDisabled => {
                tracing::warn!(
                    target: "eth_hw::dispatch",
                    %operation,
                    frame = index + 1,
                    "contract data disabled on device"
                );
                return Err(EthAppError::ContractDataDisabled);
            }
            StatusOutcome::Refused(status) => {
                tracing::warn!(
                    target: "eth_hw::dispatch",
                    %operation,
                    frame = index + 1,
                    %status,
                    "device refused"
                );
                return Err(EthAppError::DeviceRefusal { operation, status });
            }
        }
    }

    // Requests always carry at least one frame
    Err(ResponseError::UnexpectedResponse {
        operation,
        expected: 2,
        actual: 0,
    }
    .into())
}
