//! Frame builders, one function per device operation

mod eth;
mod eth2;
mod stark;

pub use eth::{
    get_address, get_app_configuration, provide_erc20_token_information,
    sign_eip712_hashed_message, sign_personal_message, sign_transaction,
};
pub use eth2::{eth2_get_public_key, eth2_set_withdrawal_index};
pub use stark::{
    stark_get_public_key, stark_provide_quantum, stark_provide_quantum_v2, stark_sign_order,
    stark_sign_order_v2, stark_sign_transfer, stark_sign_transfer_v2, stark_unsafe_sign,
    ConditionalTransfer, StarkOrder, StarkOrderV2, StarkTransfer, StarkTransferV2,
};

use crate::frame::ApduCommand;
use crate::status::Operation;

/// Frames for one logical operation, in send order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    operation: Operation,
    frames: Vec<ApduCommand>,
}

impl Request {
    pub(crate) fn new(operation: Operation, frames: Vec<ApduCommand>) -> Self {
        debug_assert!(!frames.is_empty());
        Self { operation, frames }
    }

    pub(crate) fn single(operation: Operation, frame: ApduCommand) -> Self {
        Self::new(operation, vec![frame])
    }

    /// Operation these frames implement
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Frames in send order; never empty
    pub fn frames(&self) -> &[ApduCommand] {
        &self.frames
    }

    /// Consume into the frame list
    pub fn into_frames(self) -> Vec<ApduCommand> {
        self.frames
    }
}
