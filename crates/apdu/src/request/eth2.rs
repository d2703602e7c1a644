use super::Request;
use crate::constants::{ins, ETH_CLA};
use crate::error::InputResult;
use crate::frame::{ApduCommand, FrameWriter};
use crate::path::DerivationPath;
use crate::status::Operation;

/// BLS public key retrieval
pub fn eth2_get_public_key(path: &DerivationPath, display: bool) -> InputResult<Request> {
    let frame = ApduCommand::new(
        ETH_CLA,
        ins::GET_ETH2_PUBLIC_KEY,
        u8::from(display),
        0x00,
        path.to_header(),
    )?;
    Ok(Request::single(Operation::Eth2GetPublicKey, frame))
}

/// Index of the withdrawal key used for deposits
pub fn eth2_set_withdrawal_index(withdrawal_index: u32) -> InputResult<Request> {
    let mut writer = FrameWriter::new(4);
    writer.u32(withdrawal_index);
    let frame = ApduCommand::new(
        ETH_CLA,
        ins::SET_ETH2_WITHDRAWAL_INDEX,
        0x00,
        0x00,
        writer.finish(),
    )?;
    Ok(Request::single(Operation::Eth2SetWithdrawalIndex, frame))
}
