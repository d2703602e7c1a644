//! Frame ordering checks against a mocked transport

use async_trait::async_trait;
use eth_hw_apdu::request;
use eth_hw_apdu::{ApduCommand, DerivationPath, StatusWord};
use eth_hw_app::{dispatch, EthApp, EthAppError, Reply, Transport, TransportError};
use mockall::predicate::function;
use mockall::{mock, Sequence};

mock! {
    pub Device {}

    #[async_trait]
    impl Transport for Device {
        async fn exchange(&self, command: &ApduCommand) -> Result<Vec<u8>, TransportError>;
    }
}

fn ok(data: &[u8]) -> Vec<u8> {
    let mut response = data.to_vec();
    response.extend_from_slice(&[0x90, 0x00]);
    response
}

fn signature() -> Vec<u8> {
    let mut data = vec![0x25];
    data.extend_from_slice(&[0x33; 64]);
    data
}

#[tokio::test]
async fn chunked_transaction_is_sent_in_order() {
    let mut device = MockDevice::new();
    let mut seq = Sequence::new();
    // Typed envelope, no suffix boundary: 129 + 150 + 21 bytes of payload
    let mut tx = vec![0x02];
    tx.extend_from_slice(&[0x01; 299]);

    let expected_tx = tx.clone();
    device
        .expect_exchange()
        .with(function(move |c: &ApduCommand| {
            c.p1() == 0x00 && c.data().len() == 150 && c.data()[21..] == expected_tx[..129]
        }))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(ok(&[])));
    let expected_tx = tx.clone();
    device
        .expect_exchange()
        .with(function(move |c: &ApduCommand| {
            c.p1() == 0x80 && c.data() == &expected_tx[129..279]
        }))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(ok(&[])));
    let expected_tx = tx.clone();
    device
        .expect_exchange()
        .with(function(move |c: &ApduCommand| {
            c.p1() == 0x80 && c.data() == &expected_tx[279..]
        }))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(ok(&signature())));

    let mut app = EthApp::new(device);
    let sig = app.sign_transaction("44'/60'/0'/0/0", &tx).await.unwrap();
    assert_eq!(sig.v, 0x25);
}

#[tokio::test]
async fn contract_data_refusal_stops_remaining_frames() {
    let mut device = MockDevice::new();
    let mut seq = Sequence::new();
    device
        .expect_exchange()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(ok(&[])));
    device
        .expect_exchange()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(vec![0x6A, 0x80]));

    let path: DerivationPath = "44'/60'/0'/0/0".parse().unwrap();
    let request = request::sign_transaction(&path, &[0x02; 400], 150).unwrap();
    assert_eq!(request.frames().len(), 3);

    let err = dispatch(&device, &request).await.unwrap_err();
    assert!(matches!(err, EthAppError::ContractDataDisabled));
    assert_eq!(err.status(), Some(StatusWord::INCORRECT_DATA));
}

#[tokio::test]
async fn unsupported_answer_is_reported_not_raised() {
    let mut device = MockDevice::new();
    device
        .expect_exchange()
        .with(function(|c: &ApduCommand| c.cla() == 0xE0 && c.ins() == 0x10))
        .times(1)
        .returning(|_| Ok(vec![0x6D, 0x00]));

    let request = request::eth2_set_withdrawal_index(7).unwrap();
    assert_eq!(dispatch(&device, &request).await.unwrap(), Reply::Unsupported);
}

#[tokio::test]
async fn transport_error_is_not_translated() {
    let mut device = MockDevice::new();
    device
        .expect_exchange()
        .times(1)
        .returning(|_| Err(TransportError::Other(anyhow::anyhow!("hid write failed"))));

    let mut app = EthApp::new(device);
    let err = app.get_app_configuration().await.unwrap_err();
    assert!(matches!(err, EthAppError::Transport(TransportError::Other(_))));
    assert_eq!(err.status(), None);
}
