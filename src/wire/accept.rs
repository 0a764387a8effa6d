// SPDX-License-Identifier: AGPL-3.0-or-later

//! `SendAccept` / `ReceiveAccept` (spec §4.1). Unlike `SendInit`/
//! `ReceiveInit`, the two directions have different wire layouts —
//! `ReceiveAccept` additionally carries the start offset and length the
//! receiver is committing to — so each gets its own struct.

use bytes::Bytes;

use crate::{
    error::CodecError,
    wire::{
        common::{read_u8, read_u16, read_wide, write_u8, write_u16, write_wide},
        flags::{ControlMode, RawControlFlags, TransferControlFlags},
    },
};

const SEND_ACCEPT_FIXED_LEN: usize = 4;
const RECEIVE_ACCEPT_FIXED_LEN: usize = 4;

fn decode_single_mode_flags(raw: u8) -> Result<(TransferControlFlags, ControlMode), CodecError> {
    let flags = RawControlFlags::from_raw(raw).decode()?;
    let mode = flags
        .single_mode()
        .ok_or(CodecError::InvalidDriveModeCount)?;
    Ok((flags, mode))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendAcceptMessage {
    pub mode: ControlMode,
    pub version: u8,
    pub max_block_size: u16,
    pub metadata: Bytes,
}

impl SendAcceptMessage {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SEND_ACCEPT_FIXED_LEN + self.metadata.len());
        write_u8(&mut out, self.mode.as_flag().bits());
        write_u8(&mut out, self.version);
        write_u16(&mut out, self.max_block_size);
        out.extend_from_slice(&self.metadata);
        out
    }

    pub fn decode(body: &Bytes) -> Result<Self, CodecError> {
        let buf: &[u8] = body;
        if buf.len() < SEND_ACCEPT_FIXED_LEN {
            return Err(CodecError::Truncated {
                need: SEND_ACCEPT_FIXED_LEN,
                have: buf.len(),
            });
        }
        let (_, mode) = decode_single_mode_flags(read_u8(buf, 0)?)?;
        let version = read_u8(buf, 1)?;
        let max_block_size = read_u16(buf, 2)?;
        let metadata = if SEND_ACCEPT_FIXED_LEN >= body.len() {
            Bytes::new()
        } else {
            body.slice(SEND_ACCEPT_FIXED_LEN..)
        };
        Ok(Self {
            mode,
            version,
            max_block_size,
            metadata,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveAcceptMessage {
    pub mode: ControlMode,
    pub version: u8,
    pub max_block_size: u16,
    pub start_offset: u64,
    /// Zero means indefinite length.
    pub length: u64,
    pub wide_range: bool,
    pub metadata: Bytes,
}

impl ReceiveAcceptMessage {
    pub fn encode(&self) -> Vec<u8> {
        let width = if self.wide_range { 8 } else { 4 };
        let mut out =
            Vec::with_capacity(RECEIVE_ACCEPT_FIXED_LEN + 2 * width + self.metadata.len());
        let mut flags = self.mode.as_flag();
        if self.wide_range {
            flags |= TransferControlFlags::WIDE_RANGE;
        }
        write_u8(&mut out, flags.bits());
        write_u8(&mut out, self.version);
        write_u16(&mut out, self.max_block_size);
        write_wide(&mut out, self.start_offset, self.wide_range);
        write_wide(&mut out, self.length, self.wide_range);
        out.extend_from_slice(&self.metadata);
        out
    }

    pub fn decode(body: &Bytes) -> Result<Self, CodecError> {
        let buf: &[u8] = body;
        if buf.len() < RECEIVE_ACCEPT_FIXED_LEN {
            return Err(CodecError::Truncated {
                need: RECEIVE_ACCEPT_FIXED_LEN,
                have: buf.len(),
            });
        }
        let raw_flags = read_u8(buf, 0)?;
        let (flags, mode) = decode_single_mode_flags(raw_flags)?;
        let wide_range = flags.contains(TransferControlFlags::WIDE_RANGE);
        let width = if wide_range { 8 } else { 4 };
        let version = read_u8(buf, 1)?;
        let max_block_size = read_u16(buf, 2)?;
        let (start_offset, _) = read_wide(buf, RECEIVE_ACCEPT_FIXED_LEN, wide_range)?;
        let (length, _) = read_wide(buf, RECEIVE_ACCEPT_FIXED_LEN + width, wide_range)?;
        let metadata_offset = RECEIVE_ACCEPT_FIXED_LEN + 2 * width;
        let metadata = if metadata_offset >= body.len() {
            Bytes::new()
        } else {
            body.slice(metadata_offset..)
        };
        Ok(Self {
            mode,
            version,
            max_block_size,
            start_offset,
            length,
            wide_range,
            metadata,
        })
    }
}
