use super::Request;
use crate::chunk::chunk_frames;
use crate::constants::length::{MESSAGE_LENGTH_PREFIX_SIZE, WORD_SIZE};
use crate::constants::{ins, ETH_CLA};
use crate::error::{InputError, InputResult};
use crate::field::Word;
use crate::frame::{ApduCommand, FrameWriter};
use crate::path::DerivationPath;
use crate::rlp::signature_suffix_offset;
use crate::status::Operation;
use byteorder::{BigEndian, ByteOrder};

/// Address retrieval; p1 asks for on-screen confirmation, p2 for the chain code
pub fn get_address(
    path: &DerivationPath,
    display: bool,
    chain_code: bool,
) -> InputResult<Request> {
    let frame = ApduCommand::new(
        ETH_CLA,
        ins::GET_ETH_PUBLIC_ADDRESS,
        u8::from(display),
        u8::from(chain_code),
        path.to_header(),
    )?;
    Ok(Request::single(Operation::GetAddress, frame))
}

/// Signed token metadata blob, sent as is in one frame
pub fn provide_erc20_token_information(data: &[u8]) -> InputResult<Request> {
    let frame = ApduCommand::new(
        ETH_CLA,
        ins::PROVIDE_ERC20_TOKEN_INFO,
        0x00,
        0x00,
        data.to_vec(),
    )?;
    Ok(Request::single(Operation::ProvideErc20TokenInformation, frame))
}

/// App flags and version
pub fn get_app_configuration() -> InputResult<Request> {
    let frame = ApduCommand::new(ETH_CLA, ins::GET_APP_CONFIGURATION, 0x00, 0x00, Vec::new())?;
    Ok(Request::single(Operation::GetAppConfiguration, frame))
}

/// Raw transaction, chunked so that no frame ends on the EIP-155 suffix
pub fn sign_transaction(
    path: &DerivationPath,
    raw_tx: &[u8],
    chunk_size: usize,
) -> InputResult<Request> {
    let boundary = signature_suffix_offset(raw_tx);
    let frames = chunk_frames(
        ETH_CLA,
        ins::SIGN_ETH_TRANSACTION,
        &path.to_header(),
        raw_tx,
        chunk_size,
        boundary,
    )?;
    Ok(Request::new(Operation::SignTransaction, frames))
}

/// Personal message, chunked; the first frame carries the full message length
pub fn sign_personal_message(
    path: &DerivationPath,
    message: &[u8],
    chunk_size: usize,
) -> InputResult<Request> {
    let length = u32::try_from(message.len()).map_err(|_| InputError::PayloadTooLarge {
        max: u32::MAX as usize,
        actual: message.len(),
    })?;

    let mut header = Vec::with_capacity(path.encoded_len() + MESSAGE_LENGTH_PREFIX_SIZE);
    path.write_header(&mut header);
    let at = header.len();
    header.resize(at + MESSAGE_LENGTH_PREFIX_SIZE, 0);
    BigEndian::write_u32(&mut header[at..], length);

    let frames = chunk_frames(
        ETH_CLA,
        ins::SIGN_ETH_PERSONAL_MESSAGE,
        &header,
        message,
        chunk_size,
        None,
    )?;
    Ok(Request::new(Operation::SignPersonalMessage, frames))
}

/// EIP-712 signing from the domain separator and message struct hashes
pub fn sign_eip712_hashed_message(
    path: &DerivationPath,
    domain_separator: &Word,
    message_hash: &Word,
) -> InputResult<Request> {
    let mut writer = FrameWriter::new(path.encoded_len() + 2 * WORD_SIZE);
    writer.path(path).word(domain_separator).word(message_hash);
    let frame = ApduCommand::new(ETH_CLA, ins::SIGN_ETH_EIP712, 0x00, 0x00, writer.finish())?;
    Ok(Request::single(Operation::SignEip712HashedMessage, frame))
}
