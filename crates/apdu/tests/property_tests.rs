//! Property-based tests for eth-hw-apdu
//!
//! These tests use proptest to verify:
//! - Path headers decode back to the parsed components
//! - Chunk ranges reconstruct the payload and avoid the suffix boundary
//! - Stark asset frames have a length fixed by the quantization tag

use eth_hw_apdu::{
    chunk::{chunk_frames, chunk_ranges},
    path::HARDENED,
    request::{self, StarkOrderV2},
    DerivationPath, EthAddress, Quantity, StarkAsset,
};
use proptest::prelude::*;

fn path_strategy() -> impl Strategy<Value = Vec<(u32, bool)>> {
    prop::collection::vec((0u32..HARDENED, any::<bool>()), 1..=10)
}

fn render(components: &[(u32, bool)]) -> String {
    components
        .iter()
        .map(|(value, hardened)| {
            if *hardened {
                format!("{}'", value)
            } else {
                value.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn asset_strategy() -> impl Strategy<Value = (String, Option<u64>, Option<u64>)> {
    (
        prop::sample::select(vec![
            "eth",
            "erc20",
            "erc721",
            "erc20mintable",
            "erc721mintable",
        ]),
        prop::option::of(any::<u64>()),
        prop::option::of(any::<u64>()),
    )
        .prop_map(|(tag, quantum, blob)| (tag.to_string(), quantum, blob))
}

proptest! {
    /// Parsed paths survive header encoding with hardening bits set
    #[test]
    fn test_path_header_round_trip(components in path_strategy()) {
        let path: DerivationPath = render(&components).parse().unwrap();
        let header = path.to_header();
        prop_assert_eq!(header.len(), 1 + 4 * components.len());

        let (decoded, consumed) = DerivationPath::decode_header(&header).unwrap();
        prop_assert_eq!(consumed, header.len());
        let expected: Vec<u32> = components
            .iter()
            .map(|(value, hardened)| if *hardened { value | HARDENED } else { *value })
            .collect();
        prop_assert_eq!(decoded.components(), expected.as_slice());
    }

    /// Concatenated ranges cover the payload exactly, in order
    #[test]
    fn test_chunk_ranges_reconstruct_payload(
        payload in prop::collection::vec(any::<u8>(), 0..2000),
        first in 1usize..255,
        rest in 2usize..255,
        boundary in prop::option::of(1usize..2000),
    ) {
        let ranges = chunk_ranges(payload.len(), first, rest, boundary);
        prop_assert!(!ranges.is_empty());
        let mut rebuilt = Vec::new();
        let mut expected_start = 0;
        for range in &ranges {
            prop_assert_eq!(range.start, expected_start);
            expected_start = range.end;
            rebuilt.extend_from_slice(&payload[range.clone()]);
        }
        prop_assert_eq!(rebuilt, payload);
    }

    /// No range ends on the suffix offset
    #[test]
    fn test_chunk_boundary_is_never_hit(
        len in 2usize..2000,
        first in 2usize..255,
        rest in 2usize..255,
        boundary_seed in any::<usize>(),
    ) {
        let boundary = 1 + boundary_seed % (len - 1);
        let ranges = chunk_ranges(len, first, rest, Some(boundary));
        prop_assert!(ranges.iter().all(|r| r.end != boundary));
    }

    /// Frame data regions rebuild the payload after stripping the header
    #[test]
    fn test_chunk_frames_reconstruct_payload(
        payload in prop::collection::vec(any::<u8>(), 0..1500),
        header_len in 0usize..60,
    ) {
        let header = vec![0xEE; header_len];
        let frames = chunk_frames(0xE0, 0x04, &header, &payload, 150, None).unwrap();
        prop_assert!(frames.iter().all(|f| f.data().len() <= 150));
        let mut rebuilt = frames[0].data()[header_len..].to_vec();
        for frame in &frames[1..] {
            rebuilt.extend_from_slice(frame.data());
        }
        prop_assert_eq!(rebuilt, payload);
    }

    /// Frame length depends on the tag only, not on which optional fields were given
    #[test]
    fn test_asset_frame_length_is_fixed(
        (tag, quantum, blob) in asset_strategy(),
        with_contract in any::<bool>(),
    ) {
        let contract = with_contract.then(|| EthAddress([0x42; 20]));
        let asset = StarkAsset::from_parts(
            &tag,
            contract,
            quantum.map(Quantity::from),
            blob.map(Quantity::from),
        )
        .unwrap();

        let provided = request::stark_provide_quantum_v2(&asset).unwrap();
        prop_assert_eq!(provided.frames()[0].data().len(), 84);
        prop_assert_eq!(provided.frames()[0].p1(), asset.quantization_type().tag());

        let path: DerivationPath = "2645'/579218131'/211006541'/0'".parse().unwrap();
        let order = StarkOrderV2 {
            sell: asset.clone(),
            buy: asset,
            source_vault: 1,
            destination_vault: 2,
            amount_sell: Quantity::from(1u64),
            amount_buy: Quantity::from(1u64),
            nonce: 0,
            timestamp: 0,
        };
        let signed = request::stark_sign_order_v2(&path, &order).unwrap();
        prop_assert_eq!(signed.frames()[0].data().len(), path.encoded_len() + 202);
    }
}
