// SPDX-License-Identifier: AGPL-3.0-or-later

//! `SendInit` / `ReceiveInit` (spec §4.1). Both directions share the exact
//! same wire layout — only the message type in the header prefix and the
//! role that is allowed to send it differ, so both are represented by the
//! one [`InitMessage`] here, the way the teacher shares a single BHS struct
//! across request/response pairs that only differ in which opcode they
//! carry.

use bytes::Bytes;

use crate::{
    error::CodecError,
    wire::{
        common::{
            read_length_prefixed, read_u8, read_u16, read_wide, write_length_prefixed,
            write_u8, write_u16, write_wide,
        },
        flags::{RawControlFlags, TransferControlFlags},
    },
};

/// The fixed part of the message runs: version(1) + ctl-flags(1) +
/// max_block_size(2).
const FIXED_PREFIX_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitMessage {
    pub version: u8,
    pub flags: TransferControlFlags,
    pub max_block_size: u16,
    /// Meaningful only when `flags` contains `START_OFFSET_PRESENT`; encoded
    /// as zero and never acted upon otherwise (spec §4.1).
    pub start_offset: u64,
    /// Zero means indefinite length (absence of `DEFINITE_LENGTH`).
    pub max_length: u64,
    pub file_designator: Bytes,
    pub metadata: Bytes,
}

impl InitMessage {
    pub fn encode(&self) -> Vec<u8> {
        let wide = self.flags.contains(TransferControlFlags::WIDE_RANGE);
        let mut out = Vec::with_capacity(
            FIXED_PREFIX_LEN + 2 * if wide { 8 } else { 4 } + 2 + self.file_designator.len()
                + self.metadata.len(),
        );
        write_u8(&mut out, self.version);
        write_u8(&mut out, self.flags.bits());
        write_u16(&mut out, self.max_block_size);
        write_wide(&mut out, self.start_offset, wide);
        write_wide(&mut out, self.max_length, wide);
        write_length_prefixed(&mut out, &self.file_designator);
        out.extend_from_slice(&self.metadata);
        out
    }

    pub fn decode(body: &Bytes) -> Result<Self, CodecError> {
        let buf: &[u8] = body;
        if buf.len() < FIXED_PREFIX_LEN {
            return Err(CodecError::Truncated {
                need: FIXED_PREFIX_LEN,
                have: buf.len(),
            });
        }
        let version = read_u8(buf, 0)?;
        let flags = RawControlFlags::from_raw(read_u8(buf, 1)?).decode()?;
        let max_block_size = read_u16(buf, 2)?;
        let wide = flags.contains(TransferControlFlags::WIDE_RANGE);
        let width = if wide { 8 } else { 4 };

        let (start_offset, _) = read_wide(buf, FIXED_PREFIX_LEN, wide)?;
        let (max_length, _) = read_wide(buf, FIXED_PREFIX_LEN + width, wide)?;

        let designator_offset = FIXED_PREFIX_LEN + 2 * width;
        let (designator_slice, consumed) = read_length_prefixed(buf, designator_offset)?;
        let designator_start = designator_offset + 2;
        let file_designator = body.slice(designator_start..designator_start + designator_slice.len());

        let metadata_offset = designator_offset + consumed;
        let metadata = if metadata_offset >= body.len() {
            Bytes::new()
        } else {
            body.slice(metadata_offset..)
        };

        Ok(Self {
            version,
            flags,
            max_block_size,
            start_offset,
            max_length,
            file_designator,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(wide: bool) -> InitMessage {
        let mut flags = TransferControlFlags::SENDER_DRIVE
            | TransferControlFlags::RECEIVER_DRIVE
            | TransferControlFlags::DEFINITE_LENGTH;
        if wide {
            flags |= TransferControlFlags::WIDE_RANGE;
        }
        InitMessage {
            version: 0,
            flags,
            max_block_size: 1024,
            start_offset: 0,
            max_length: 1500,
            file_designator: Bytes::from_static(b"gbl_trace.bin"),
            metadata: Bytes::from_static(b"vendor-metadata"),
        }
    }

    #[test]
    fn round_trips_narrow() {
        let msg = sample(false);
        let encoded = msg.encode();
        let decoded = InitMessage::decode(&Bytes::from(encoded)).expect("decode");
        assert_eq!(decoded, msg);
    }

    #[test]
    fn round_trips_wide() {
        let msg = sample(true);
        let encoded = msg.encode();
        let decoded = InitMessage::decode(&Bytes::from(encoded)).expect("decode");
        assert_eq!(decoded, msg);
    }

    #[test]
    fn round_trips_empty_metadata_and_designator() {
        let mut msg = sample(false);
        msg.file_designator = Bytes::new();
        msg.metadata = Bytes::new();
        let encoded = msg.encode();
        let decoded = InitMessage::decode(&Bytes::from(encoded)).expect("decode");
        assert_eq!(decoded, msg);
    }

    #[test]
    fn rejects_truncated_fixed_prefix() {
        let buf = Bytes::from_static(&[0, 0, 0]);
        assert!(matches!(
            InitMessage::decode(&buf),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn rejects_reserved_bits() {
        let mut encoded = sample(false).encode();
        encoded[1] |= 0b1000_0000;
        assert_eq!(
            InitMessage::decode(&Bytes::from(encoded)),
            Err(CodecError::ReservedBitsSet(
                (TransferControlFlags::SENDER_DRIVE
                    | TransferControlFlags::RECEIVER_DRIVE
                    | TransferControlFlags::DEFINITE_LENGTH)
                    .bits()
                    | 0b1000_0000
            ))
        );
    }

    #[test]
    fn rejects_truncated_file_designator() {
        let mut encoded = sample(false).encode();
        // Claim a designator far longer than what actually follows.
        let len_offset = FIXED_PREFIX_LEN + 8;
        encoded.truncate(len_offset + 2);
        encoded[len_offset] = 0xFF;
        encoded[len_offset + 1] = 0xFF;
        assert!(matches!(
            InitMessage::decode(&Bytes::from(encoded)),
            Err(CodecError::Truncated { .. })
        ));
    }
}
