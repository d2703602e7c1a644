//! Legacy transaction inspection for chunk boundary placement

use alloy_rlp::Header;

/// Item count above which a legacy transaction carries the EIP-155
/// `chainId, r, s` trailing group.
const UNPROTECTED_ITEM_COUNT: usize = 6;

/// Offset of the EIP-155 trailing group in a legacy RLP transaction.
///
/// Returns `None` for typed (EIP-2718) envelopes, for lists with six items
/// or fewer, and for anything that is not a well-formed RLP list.
pub fn signature_suffix_offset(raw_tx: &[u8]) -> Option<usize> {
    let first = *raw_tx.first()?;
    if first < alloy_rlp::EMPTY_LIST_CODE {
        return None;
    }

    let mut rest = raw_tx;
    let outer = Header::decode(&mut rest).ok()?;
    if !outer.list || outer.payload_length > rest.len() {
        return None;
    }
    let body_start = raw_tx.len() - rest.len();
    let body_len = outer.payload_length;
    let mut body = &rest[..body_len];

    let mut item_starts = Vec::new();
    while !body.is_empty() {
        item_starts.push(body_start + body_len - body.len());
        let mut cursor = body;
        let item = Header::decode(&mut cursor).ok()?;
        if item.payload_length > cursor.len() {
            return None;
        }
        body = &cursor[item.payload_length..];
    }

    if item_starts.len() > UNPROTECTED_ITEM_COUNT {
        item_starts.get(item_starts.len() - 3).copied()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // EIP-155 example: nonce 9, 20 gwei, 21000 gas, to 0x3535.., 1 ether, chain 1
    const EIP155_TX: &str = "ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080";

    #[test]
    fn finds_chain_id_offset() {
        let tx = hex::decode(EIP155_TX).unwrap();
        assert_eq!(tx.len(), 45);
        assert_eq!(signature_suffix_offset(&tx), Some(42));
        assert_eq!(tx[42], 0x01);
    }

    #[test]
    fn pre_eip155_transaction_has_no_suffix() {
        // Same transaction without the chainId, r, s items
        let tx = hex::decode(
            "e9098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080",
        )
        .unwrap();
        assert_eq!(signature_suffix_offset(&tx), None);
    }

    #[test]
    fn typed_envelope_has_no_suffix() {
        let mut tx = vec![0x02];
        tx.extend_from_slice(&hex::decode(EIP155_TX).unwrap());
        assert_eq!(signature_suffix_offset(&tx), None);
    }

    #[test]
    fn garbage_has_no_suffix() {
        assert_eq!(signature_suffix_offset(&[]), None);
        assert_eq!(signature_suffix_offset(&[0xf8, 0xff, 0x01]), None);
        assert_eq!(signature_suffix_offset(&[0xc3, 0x82, 0x01]), None);
    }

    #[test]
    fn long_list_header_is_accounted_for() {
        // Nine items with a 60-byte data field push the list past 55 bytes
        let mut body = hex::decode("098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a7640000").unwrap();
        body.push(0xb8);
        body.push(60);
        body.extend_from_slice(&[0xAB; 60]);
        body.extend_from_slice(&[0x01, 0x80, 0x80]);
        let mut tx = vec![0xf8, body.len() as u8];
        tx.extend_from_slice(&body);
        assert_eq!(signature_suffix_offset(&tx), Some(tx.len() - 3));
    }
}
