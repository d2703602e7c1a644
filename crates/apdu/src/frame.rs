//! Command frames and the fixed-offset frame writer

use crate::constants::length::{APDU_MAX_PAYLOAD, ETH_ADDRESS_SIZE};
use crate::error::{InputError, InputResult};
use crate::field::{EthAddress, Quantity, Word};
use crate::path::DerivationPath;
use byteorder::{BigEndian, ByteOrder};
use std::fmt;

/// One APDU command: header quad plus data.
///
/// Fields are private; a frame never changes after construction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApduCommand {
    cla: u8,
    ins: u8,
    p1: u8,
    p2: u8,
    data: Vec<u8>,
}

impl ApduCommand {
    /// Build a command, rejecting data longer than one APDU can carry
    pub fn new(cla: u8, ins: u8, p1: u8, p2: u8, data: Vec<u8>) -> InputResult<Self> {
        if data.len() > APDU_MAX_PAYLOAD {
            return Err(InputError::PayloadTooLarge {
                max: APDU_MAX_PAYLOAD,
                actual: data.len(),
            });
        }
        Ok(Self {
            cla,
            ins,
            p1,
            p2,
            data,
        })
    }

    /// Class byte
    pub fn cla(&self) -> u8 {
        self.cla
    }

    /// Instruction byte
    pub fn ins(&self) -> u8 {
        self.ins
    }

    /// First parameter byte
    pub fn p1(&self) -> u8 {
        self.p1
    }

    /// Second parameter byte
    pub fn p2(&self) -> u8 {
        self.p2
    }

    /// Data field
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw APDU bytes: `cla ins p1 p2 lc data`
    pub fn serialize(&self) -> Vec<u8> {
        let mut apdu = Vec::with_capacity(5 + self.data.len());
        apdu.extend_from_slice(&[self.cla, self.ins, self.p1, self.p2]);
        apdu.push(self.data.len() as u8);
        apdu.extend_from_slice(&self.data);
        apdu
    }
}

impl fmt::Debug for ApduCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ApduCommand {{ {:02x} {:02x} {:02x} {:02x} [{}] {} }}",
            self.cla,
            self.ins,
            self.p1,
            self.p2,
            self.data.len(),
            hex::encode(&self.data)
        )
    }
}

/// Writes fields at consecutive fixed offsets into a zero-filled buffer
/// allocated once at its final size.
pub(crate) struct FrameWriter {
    buf: Vec<u8>,
    offset: usize,
}

impl FrameWriter {
    /// Zero-filled buffer of `len` bytes
    pub(crate) fn new(len: usize) -> Self {
        Self {
            buf: vec![0u8; len],
            offset: 0,
        }
    }

    fn slot(&mut self, len: usize) -> &mut [u8] {
        let start = self.offset;
        self.offset += len;
        &mut self.buf[start..start + len]
    }

    pub(crate) fn path(&mut self, path: &DerivationPath) -> &mut Self {
        let header = path.to_header();
        self.slot(header.len()).copy_from_slice(&header);
        self
    }

    pub(crate) fn u8(&mut self, value: u8) -> &mut Self {
        self.slot(1)[0] = value;
        self
    }

    pub(crate) fn u32(&mut self, value: u32) -> &mut Self {
        BigEndian::write_u32(self.slot(4), value);
        self
    }

    pub(crate) fn bytes(&mut self, value: &[u8]) -> &mut Self {
        self.slot(value.len()).copy_from_slice(value);
        self
    }

    /// Address, or zeros when absent
    pub(crate) fn address(&mut self, value: Option<&EthAddress>) -> &mut Self {
        match value {
            Some(address) => self.bytes(address.as_bytes()),
            None => self.skip(ETH_ADDRESS_SIZE),
        }
    }

    pub(crate) fn word(&mut self, value: &Word) -> &mut Self {
        self.bytes(value.as_bytes())
    }

    /// Left-padded magnitude, or zeros when absent
    pub(crate) fn quantity(
        &mut self,
        field: &'static str,
        value: Option<&Quantity>,
        width: usize,
    ) -> InputResult<&mut Self> {
        match value {
            Some(q) => {
                let padded = q.to_padded(field, width)?;
                Ok(self.bytes(&padded))
            }
            None => Ok(self.skip(width)),
        }
    }

    pub(crate) fn skip(&mut self, len: usize) -> &mut Self {
        self.offset += len;
        self
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        debug_assert_eq!(self.offset, self.buf.len(), "frame layout length mismatch");
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_length_byte() {
        let cmd = ApduCommand::new(0xE0, 0x02, 0x01, 0x00, vec![0xAA, 0xBB]).unwrap();
        assert_eq!(cmd.serialize(), vec![0xE0, 0x02, 0x01, 0x00, 0x02, 0xAA, 0xBB]);
    }

    #[test]
    fn rejects_oversized_data() {
        assert_eq!(
            ApduCommand::new(0xE0, 0x0A, 0, 0, vec![0; 256]),
            Err(InputError::PayloadTooLarge {
                max: 255,
                actual: 256
            })
        );
    }

    #[test]
    fn writer_zero_fills_skipped_regions() {
        let mut w = FrameWriter::new(10);
        w.u8(7).skip(3).u32(0x0102_0304);
        w.quantity("q", None, 2).unwrap();
        assert_eq!(w.finish(), vec![7, 0, 0, 0, 1, 2, 3, 4, 0, 0]);
    }
}
