//! Boundary-aware splitting of oversized payloads into command frames

use crate::constants::length::APDU_MAX_PAYLOAD;
use crate::constants::p1_chunk::{FIRST_DATA_BLOCK, SUBSEQUENT_DATA_BLOCK};
use crate::error::{InputError, InputResult};
use crate::frame::ApduCommand;
use std::ops::Range;

/// Split `len` payload bytes into consecutive ranges.
///
/// The first range holds at most `first_capacity` bytes, the others at most
/// `capacity`. When `boundary` is set, no range ends exactly on it: a range
/// that would is shortened by one byte. An empty payload still yields a
/// single empty range so the header frame is always sent.
pub fn chunk_ranges(
    len: usize,
    first_capacity: usize,
    capacity: usize,
    boundary: Option<usize>,
) -> Vec<Range<usize>> {
    if len == 0 {
        return vec![0..0];
    }

    debug_assert!(first_capacity > 0 && capacity > 0);
    let first_capacity = first_capacity.max(1);
    let capacity = capacity.max(1);

    let mut ranges = Vec::with_capacity(1 + len / capacity);
    let mut offset = 0;
    while offset < len {
        let max = if offset == 0 { first_capacity } else { capacity };
        let mut size = max.min(len - offset);
        if size > 1 && boundary == Some(offset + size) {
            size -= 1;
        }
        ranges.push(offset..offset + size);
        offset += size;
    }
    ranges
}

/// Build the frame sequence for a chunked command.
///
/// `header` is prepended to the first frame's data; later frames carry
/// payload bytes only. p1 marks the first frame and continuation frames.
/// The header must leave room for payload, unless the payload is empty.
pub fn chunk_frames(
    cla: u8,
    ins: u8,
    header: &[u8],
    payload: &[u8],
    chunk_size: usize,
    boundary: Option<usize>,
) -> InputResult<Vec<ApduCommand>> {
    if chunk_size == 0 || chunk_size > APDU_MAX_PAYLOAD {
        return Err(InputError::InvalidChunkSize(chunk_size));
    }
    // A header-only frame may fill the whole chunk
    let overflow = if payload.is_empty() {
        header.len() > chunk_size
    } else {
        header.len() >= chunk_size
    };
    if overflow {
        return Err(InputError::HeaderOverflow {
            header: header.len(),
            chunk_size,
        });
    }

    let ranges = chunk_ranges(
        payload.len(),
        chunk_size - header.len(),
        chunk_size,
        boundary,
    );
    tracing::trace!(
        target: "eth_hw::chunk",
        payload_len = payload.len(),
        frames = ranges.len(),
        ?boundary,
        "split payload"
    );

    ranges
        .into_iter()
        .enumerate()
        .map(|(index, range)| {
            let (p1, data) = if index == 0 {
                let mut data = Vec::with_capacity(header.len() + range.len());
                data.extend_from_slice(header);
                data.extend_from_slice(&payload[range]);
                (FIRST_DATA_BLOCK, data)
            } else {
                (SUBSEQUENT_DATA_BLOCK, payload[range].to_vec())
            };
            ApduCommand::new(cla, ins, p1, 0x00, data)
        })
        .collect()
}
