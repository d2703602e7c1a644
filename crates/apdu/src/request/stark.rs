use super::Request;
use crate::constants::length::{AMOUNT_SIZE, ETH_ADDRESS_SIZE, STARK_ASSET_SIZE, WORD_SIZE};
use crate::constants::{p1_stark_sign, stark_ins, STARK_CLA};
use crate::error::InputResult;
use crate::field::{EthAddress, Quantity};
use crate::frame::{ApduCommand, FrameWriter};
use crate::path::DerivationPath;
use crate::quantization::StarkAsset;
use crate::status::Operation;
use serde::{Deserialize, Serialize};

/// Vault ids, amounts, nonce and expiry shared by orders and transfers
const VAULTS_SIZE: usize = 4 + 4;
const NONCE_TIMESTAMP_SIZE: usize = 4 + 4;

/// Limit order, fixed asset layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarkOrder {
    /// Token sold; `None` for ether
    pub sell_token: Option<EthAddress>,
    /// Quantum of the sold asset
    pub sell_quantization: Quantity,
    /// Token bought; `None` for ether
    pub buy_token: Option<EthAddress>,
    /// Quantum of the bought asset
    pub buy_quantization: Quantity,
    /// Vault the sold asset leaves
    pub source_vault: u32,
    /// Vault the bought asset enters
    pub destination_vault: u32,
    /// Quantized amount sold
    pub amount_sell: Quantity,
    /// Quantized amount bought
    pub amount_buy: Quantity,
    /// Order nonce
    pub nonce: u32,
    /// Expiration timestamp
    pub timestamp: u32,
}

/// Limit order, tagged asset layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarkOrderV2 {
    /// Asset sold
    pub sell: StarkAsset,
    /// Asset bought
    pub buy: StarkAsset,
    /// Vault the sold asset leaves
    pub source_vault: u32,
    /// Vault the bought asset enters
    pub destination_vault: u32,
    /// Quantized amount sold
    pub amount_sell: Quantity,
    /// Quantized amount bought
    pub amount_buy: Quantity,
    /// Order nonce
    pub nonce: u32,
    /// Expiration timestamp
    pub timestamp: u32,
}

/// Transfer, fixed asset layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarkTransfer {
    /// Token transferred; `None` for ether
    pub token: Option<EthAddress>,
    /// Quantum of the asset
    pub quantization: Quantity,
    /// Stark key of the receiver
    pub target_public_key: Quantity,
    /// Sender vault
    pub source_vault: u32,
    /// Receiver vault
    pub destination_vault: u32,
    /// Quantized amount
    pub amount: Quantity,
    /// Transfer nonce
    pub nonce: u32,
    /// Expiration timestamp
    pub timestamp: u32,
}

/// Fact registry condition attached to a transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalTransfer {
    /// Fact registry contract
    pub address: EthAddress,
    /// Fact that must be registered
    pub fact: Quantity,
}

/// Transfer, tagged asset layout with optional condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarkTransferV2 {
    /// Asset transferred
    pub asset: StarkAsset,
    /// Stark key of the receiver
    pub target_public_key: Quantity,
    /// Sender vault
    pub source_vault: u32,
    /// Receiver vault
    pub destination_vault: u32,
    /// Quantized amount
    pub amount: Quantity,
    /// Transfer nonce
    pub nonce: u32,
    /// Expiration timestamp
    pub timestamp: u32,
    /// Condition; selects the conditional transfer layout when set
    pub conditional: Option<ConditionalTransfer>,
}

fn write_asset(writer: &mut FrameWriter, asset: &StarkAsset) -> InputResult<()> {
    writer.u8(asset.quantization_type().tag());
    write_asset_body(writer, asset)
}

fn write_asset_body(writer: &mut FrameWriter, asset: &StarkAsset) -> InputResult<()> {
    let (contract, quantum, blob) = asset.slots();
    writer.address(contract);
    writer.quantity("quantization", quantum, WORD_SIZE)?;
    writer.quantity("mintable blob or token id", blob, WORD_SIZE)?;
    Ok(())
}

fn sign_frame(p1: u8, data: Vec<u8>) -> InputResult<ApduCommand> {
    ApduCommand::new(STARK_CLA, stark_ins::SIGN_MESSAGE, p1, 0x00, data)
}

/// Stark public key retrieval
pub fn stark_get_public_key(path: &DerivationPath, display: bool) -> InputResult<Request> {
    let frame = ApduCommand::new(
        STARK_CLA,
        stark_ins::GET_PUBLIC_KEY,
        u8::from(display),
        0x00,
        path.to_header(),
    )?;
    Ok(Request::single(Operation::StarkGetPublicKey, frame))
}

/// Order signing, fixed layout
pub fn stark_sign_order(path: &DerivationPath, order: &StarkOrder) -> InputResult<Request> {
    let len = path.encoded_len()
        + 2 * (ETH_ADDRESS_SIZE + WORD_SIZE)
        + VAULTS_SIZE
        + 2 * AMOUNT_SIZE
        + NONCE_TIMESTAMP_SIZE;
    let mut writer = FrameWriter::new(len);
    writer.path(path).address(order.sell_token.as_ref());
    writer.quantity("sell quantization", Some(&order.sell_quantization), WORD_SIZE)?;
    writer.address(order.buy_token.as_ref());
    writer.quantity("buy quantization", Some(&order.buy_quantization), WORD_SIZE)?;
    writer.u32(order.source_vault).u32(order.destination_vault);
    writer.quantity("amount sell", Some(&order.amount_sell), AMOUNT_SIZE)?;
    writer.quantity("amount buy", Some(&order.amount_buy), AMOUNT_SIZE)?;
    writer.u32(order.nonce).u32(order.timestamp);

    let frame = sign_frame(p1_stark_sign::ORDER, writer.finish())?;
    Ok(Request::single(Operation::StarkSignOrder, frame))
}

/// Order signing, tagged asset layout
pub fn stark_sign_order_v2(path: &DerivationPath, order: &StarkOrderV2) -> InputResult<Request> {
    let len = path.encoded_len()
        + 2 * STARK_ASSET_SIZE
        + VAULTS_SIZE
        + 2 * AMOUNT_SIZE
        + NONCE_TIMESTAMP_SIZE;
    let mut writer = FrameWriter::new(len);
    writer.path(path);
    write_asset(&mut writer, &order.sell)?;
    write_asset(&mut writer, &order.buy)?;
    writer.u32(order.source_vault).u32(order.destination_vault);
    writer.quantity("amount sell", Some(&order.amount_sell), AMOUNT_SIZE)?;
    writer.quantity("amount buy", Some(&order.amount_buy), AMOUNT_SIZE)?;
    writer.u32(order.nonce).u32(order.timestamp);

    let frame = sign_frame(p1_stark_sign::ORDER_V2, writer.finish())?;
    Ok(Request::single(Operation::StarkSignOrder, frame))
}

/// Transfer signing, fixed layout
pub fn stark_sign_transfer(
    path: &DerivationPath,
    transfer: &StarkTransfer,
) -> InputResult<Request> {
    let len = path.encoded_len()
        + ETH_ADDRESS_SIZE
        + 2 * WORD_SIZE
        + VAULTS_SIZE
        + AMOUNT_SIZE
        + NONCE_TIMESTAMP_SIZE;
    let mut writer = FrameWriter::new(len);
    writer.path(path).address(transfer.token.as_ref());
    writer.quantity("quantization", Some(&transfer.quantization), WORD_SIZE)?;
    writer.quantity("target public key", Some(&transfer.target_public_key), WORD_SIZE)?;
    writer.u32(transfer.source_vault).u32(transfer.destination_vault);
    writer.quantity("amount", Some(&transfer.amount), AMOUNT_SIZE)?;
    writer.u32(transfer.nonce).u32(transfer.timestamp);

    let frame = sign_frame(p1_stark_sign::TRANSFER, writer.finish())?;
    Ok(Request::single(Operation::StarkSignTransfer, frame))
}

/// Transfer signing, tagged asset layout.
///
/// A condition appends the fact and the fact registry address and switches
/// p1 to the conditional transfer value.
pub fn stark_sign_transfer_v2(
    path: &DerivationPath,
    transfer: &StarkTransferV2,
) -> InputResult<Request> {
    let (p1, condition_size) = match transfer.conditional {
        Some(_) => (p1_stark_sign::CONDITIONAL_TRANSFER, WORD_SIZE + ETH_ADDRESS_SIZE),
        None => (p1_stark_sign::TRANSFER_V2, 0),
    };
    let len = path.encoded_len()
        + STARK_ASSET_SIZE
        + WORD_SIZE
        + VAULTS_SIZE
        + AMOUNT_SIZE
        + NONCE_TIMESTAMP_SIZE
        + condition_size;
    let mut writer = FrameWriter::new(len);
    writer.path(path);
    write_asset(&mut writer, &transfer.asset)?;
    writer.quantity("target public key", Some(&transfer.target_public_key), WORD_SIZE)?;
    writer.u32(transfer.source_vault).u32(transfer.destination_vault);
    writer.quantity("amount", Some(&transfer.amount), AMOUNT_SIZE)?;
    writer.u32(transfer.nonce).u32(transfer.timestamp);
    if let Some(condition) = &transfer.conditional {
        writer.quantity("conditional transfer fact", Some(&condition.fact), WORD_SIZE)?;
        writer.address(Some(&condition.address));
    }

    let frame = sign_frame(p1, writer.finish())?;
    Ok(Request::single(Operation::StarkSignTransfer, frame))
}

/// Quantum of the asset used by the next transaction, fixed layout
pub fn stark_provide_quantum(
    contract: Option<&EthAddress>,
    quantization: &Quantity,
) -> InputResult<Request> {
    let mut writer = FrameWriter::new(ETH_ADDRESS_SIZE + WORD_SIZE);
    writer.address(contract);
    writer.quantity("quantization", Some(quantization), WORD_SIZE)?;
    let frame = ApduCommand::new(
        STARK_CLA,
        stark_ins::PROVIDE_QUANTUM,
        0x00,
        0x00,
        writer.finish(),
    )?;
    Ok(Request::single(Operation::StarkProvideQuantum, frame))
}

/// Quantum of the asset used by the next transaction, tag carried in p1
pub fn stark_provide_quantum_v2(asset: &StarkAsset) -> InputResult<Request> {
    let mut writer = FrameWriter::new(StarkAsset::BODY_SIZE);
    write_asset_body(&mut writer, asset)?;
    let frame = ApduCommand::new(
        STARK_CLA,
        stark_ins::PROVIDE_QUANTUM,
        asset.quantization_type().tag(),
        0x00,
        writer.finish(),
    )?;
    Ok(Request::single(Operation::StarkProvideQuantum, frame))
}

/// Signature over a raw 32-byte hash
pub fn stark_unsafe_sign(path: &DerivationPath, hash: &Quantity) -> InputResult<Request> {
    let mut writer = FrameWriter::new(path.encoded_len() + WORD_SIZE);
    writer.path(path);
    writer.quantity("hash", Some(hash), WORD_SIZE)?;
    let frame = ApduCommand::new(
        STARK_CLA,
        stark_ins::UNSAFE_SIGN,
        0x00,
        0x00,
        writer.finish(),
    )?;
    Ok(Request::single(Operation::StarkUnsafeSign, frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    fn stark_path() -> DerivationPath {
        "2645'/579218131'/211006541'/1234'/0'/0".parse().unwrap()
    }

    fn token() -> EthAddress {
        "0xe41d2489571d322189246dafa5ebde1f4699f498".parse().unwrap()
    }

    fn transfer_v2(conditional: Option<ConditionalTransfer>) -> StarkTransferV2 {
        StarkTransferV2 {
            asset: StarkAsset::Erc20 {
                contract: token(),
                quantum: Quantity::from(1_000_000u64),
            },
            target_public_key: "0x1234".parse().unwrap(),
            source_vault: 7,
            destination_vault: 9,
            amount: Quantity::from(10u64),
            nonce: 1,
            timestamp: 438_953,
            conditional,
        }
    }

    #[test]
    fn order_v1_layout() {
        let order = StarkOrder {
            sell_token: None,
            sell_quantization: Quantity::from(100_000_000u64),
            buy_token: Some(token()),
            buy_quantization: Quantity::from(1u64),
            source_vault: 0x11,
            destination_vault: 0x22,
            amount_sell: Quantity::from(0x33u64),
            amount_buy: Quantity::from(0x44u64),
            nonce: 0x55,
            timestamp: 0x66,
        };
        let request = stark_sign_order(&stark_path(), &order).unwrap();
        let frame = &request.frames()[0];
        assert_eq!((frame.cla(), frame.ins(), frame.p1()), (0xF0, 0x04, 0x01));

        let data = frame.data();
        let h = stark_path().encoded_len();
        assert_eq!(data.len(), h + 136);
        assert_eq!(&data[h..h + 20], &[0u8; 20]);
        assert_eq!(&data[h + 48..h + 52], &100_000_000u32.to_be_bytes());
        assert_eq!(&data[h + 52..h + 72], token().as_bytes());
        assert_eq!(data[h + 103], 1);
        assert_eq!(&data[h + 104..h + 108], &[0, 0, 0, 0x11]);
        assert_eq!(&data[h + 108..h + 112], &[0, 0, 0, 0x22]);
        assert_eq!(&data[h + 112..h + 120], &[0, 0, 0, 0, 0, 0, 0, 0x33]);
        assert_eq!(data[h + 127], 0x44);
        assert_eq!(&data[h + 128..], &[0, 0, 0, 0x55, 0, 0, 0, 0x66]);
    }

    #[test]
    fn order_v2_writes_tags_and_zero_fills() {
        let order = StarkOrderV2 {
            sell: StarkAsset::Eth {
                quantum: Quantity::from(1u64),
            },
            buy: StarkAsset::Erc721 {
                contract: token(),
                token_id: Quantity::from(0xABu64),
            },
            source_vault: 1,
            destination_vault: 2,
            amount_sell: Quantity::from(3u64),
            amount_buy: Quantity::from(1u64),
            nonce: 4,
            timestamp: 5,
        };
        let request = stark_sign_order_v2(&stark_path(), &order).unwrap();
        let frame = &request.frames()[0];
        assert_eq!(frame.p1(), 0x03);

        let data = frame.data();
        let h = stark_path().encoded_len();
        assert_eq!(data.len(), h + 202);
        assert_eq!(data[h], 1);
        assert_eq!(&data[h + 1..h + 21], &[0u8; 20]);
        assert_eq!(data[h + 52], 1);
        assert_eq!(&data[h + 53..h + 85], &[0u8; 32]);
        assert_eq!(data[h + 85], 3);
        assert_eq!(&data[h + 86..h + 106], token().as_bytes());
        assert_eq!(&data[h + 106..h + 138], &[0u8; 32]);
        assert_eq!(data[h + 169], 0xAB);
    }

    #[test]
    fn conditional_transfer_switches_p1_and_appends_fields() {
        let plain = stark_sign_transfer_v2(&stark_path(), &transfer_v2(None)).unwrap();
        let conditional = stark_sign_transfer_v2(
            &stark_path(),
            &transfer_v2(Some(ConditionalTransfer {
                address: token(),
                fact: Quantity::from(0xFFu64),
            })),
        )
        .unwrap();

        let plain = &plain.frames()[0];
        let conditional = &conditional.frames()[0];
        assert_eq!(plain.p1(), 0x04);
        assert_eq!(conditional.p1(), 0x05);
        assert_eq!(conditional.data().len(), plain.data().len() + 52);
        assert_eq!(&conditional.data()[..plain.data().len()], plain.data());

        let tail = &conditional.data()[plain.data().len()..];
        assert_eq!(tail[31], 0xFF);
        assert_eq!(&tail[32..], token().as_bytes());
    }

    #[test]
    fn transfer_v1_layout() {
        let transfer = StarkTransfer {
            token: Some(token()),
            quantization: Quantity::from(1u64),
            target_public_key: "0x0abc".parse().unwrap(),
            source_vault: 1,
            destination_vault: 2,
            amount: Quantity::from(3u64),
            nonce: 4,
            timestamp: 5,
        };
        let request = stark_sign_transfer(&stark_path(), &transfer).unwrap();
        let frame = &request.frames()[0];
        assert_eq!(frame.p1(), 0x02);
        let h = stark_path().encoded_len();
        assert_eq!(frame.data().len(), h + 108);
        assert_eq!(&frame.data()[h + 82..h + 84], &[0x0a, 0xbc]);
    }

    #[test]
    fn provide_quantum_layouts() {
        let v1 = stark_provide_quantum(None, &Quantity::from(1u64)).unwrap();
        assert_eq!(v1.frames()[0].data().len(), 52);
        assert_eq!(v1.frames()[0].p1(), 0x00);

        let asset = StarkAsset::MintableErc20 {
            contract: token(),
            quantum: Quantity::from(1u64),
            minting_blob: Quantity::from(2u64),
        };
        let v2 = stark_provide_quantum_v2(&asset).unwrap();
        let frame = &v2.frames()[0];
        assert_eq!((frame.ins(), frame.p1()), (0x08, 0x04));
        assert_eq!(frame.data().len(), 84);
        assert_eq!(frame.data()[51], 1);
        assert_eq!(frame.data()[83], 2);
    }

    #[test]
    fn oversized_amount_is_rejected() {
        let mut transfer = transfer_v2(None);
        transfer.amount = Quantity::from(u128::MAX);
        assert_eq!(
            stark_sign_transfer_v2(&stark_path(), &transfer),
            Err(InputError::FieldOverflow {
                field: "amount",
                width: 8,
                actual: 16
            })
        );
    }

    #[test]
    fn unsafe_sign_pads_short_hashes() {
        let hash: Quantity = "0x5f0b1e2d7ce4e3c0f7a1e1d14b8c2b3c2e9c3d9b9c5f2a0c5e8d1f2e3a4b5c6".parse().unwrap();
        let request = stark_unsafe_sign(&stark_path(), &hash).unwrap();
        let data = request.frames()[0].data();
        let h = stark_path().encoded_len();
        assert_eq!(data.len(), h + 32);
        assert_eq!(data[h], 0x05);
    }
}
