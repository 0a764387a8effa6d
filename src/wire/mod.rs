// SPDX-License-Identifier: AGPL-3.0-or-later

//! BDX wire message codecs (spec §4.1, §6).
//!
//! Mirrors the teacher's `models/` layout: one module per message family,
//! each exposing plain encode/decode functions instead of I/O. The outer
//! CHIP payload-header (protocol ID + message type) is modeled here as the
//! two-byte [`HEADER_PREFIX_LEN`] prefix the core can reserve ahead of a
//! payload and strip on ingress; its own content beyond that is opaque to
//! the core per spec §1.

pub mod accept;
pub mod block;
pub mod common;
pub mod flags;
pub mod init;
pub mod status_report;

use crate::error::CodecError;

/// The protocol ID this core recognizes in the payload-header prefix.
/// Real deployments carry this inside a wider CHIP exchange header; the
/// core only needs to agree with its host on one byte's meaning.
pub const PROTOCOL_ID_BDX: u8 = 0x01;

/// Bytes reserved ahead of every BDX message: protocol ID (1) + message
/// type (1).
pub const HEADER_PREFIX_LEN: usize = 2;

/// The nine BDX message types plus the host-level `StatusReport` (spec §6).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    SendInit = 0x01,
    SendAccept = 0x02,
    ReceiveInit = 0x04,
    ReceiveAccept = 0x05,
    BlockQuery = 0x10,
    Block = 0x11,
    BlockEof = 0x12,
    BlockAck = 0x13,
    BlockAckEof = 0x14,
    StatusReport = 0xFF,
}

impl MessageType {
    pub const fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0x01 => Self::SendInit,
            0x02 => Self::SendAccept,
            0x04 => Self::ReceiveInit,
            0x05 => Self::ReceiveAccept,
            0x10 => Self::BlockQuery,
            0x11 => Self::Block,
            0x12 => Self::BlockEof,
            0x13 => Self::BlockAck,
            0x14 => Self::BlockAckEof,
            0xFF => Self::StatusReport,
            _ => return None,
        })
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Prepend the payload-header prefix to `body`, returning the full
/// on-wire buffer. The host's own outer framing, if any, wraps around
/// this.
pub fn with_header_prefix(msg_type: MessageType, mut body: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_PREFIX_LEN + body.len());
    out.push(PROTOCOL_ID_BDX);
    out.push(msg_type.as_u8());
    out.append(&mut body);
    out
}

/// Strip and validate the payload-header prefix, returning the message
/// type and the remaining body slice.
pub fn strip_header_prefix(buf: &[u8]) -> Result<(MessageType, &[u8]), CodecError> {
    let protocol_id = common::read_u8(buf, 0)?;
    if protocol_id != PROTOCOL_ID_BDX {
        return Err(CodecError::NotBdx);
    }
    let type_byte = common::read_u8(buf, 1)?;
    let msg_type =
        MessageType::from_u8(type_byte).ok_or(CodecError::UnknownMessageType(type_byte))?;
    Ok((msg_type, &buf[HEADER_PREFIX_LEN..]))
}
