// SPDX-License-Identifier: AGPL-3.0-or-later

//! The event surface `PollOutput` drains (spec §4.4).
//!
//! Design note 9 asks for decoded messages to borrow from the buffer that
//! owns them, with the session pinning that buffer until the event is
//! drained. This core uses `bytes::Bytes` instead: a ref-counted, already
//! owned slice handed out of the session directly, the way the teacher's
//! `PDUWithData<T, Body = Bytes>` hands a response body to its caller
//! without a borrow tying it to the connection. It gets the same
//! one-owner-at-a-time discipline (`pending_output` still gates new inbound
//! until drained) without a lifetime parameter threading through
//! `TransferSession` and every event variant.

use bytes::Bytes;

use crate::{
    error::StatusCode,
    wire::{flags::ControlMode, init::InitMessage},
};

/// The decoded, direction-agnostic contents of a `SendAccept`/`ReceiveAccept`
/// (spec §4.1). `start_offset`/`length` are `None` for `SendAccept`, which
/// carries neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptData {
    pub mode: ControlMode,
    pub version: u8,
    pub max_block_size: u16,
    pub start_offset: Option<u64>,
    pub length: Option<u64>,
    pub metadata: Bytes,
}

/// A received `Block` or `BlockEOF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEventData {
    pub block_counter: u32,
    pub data: Bytes,
    pub is_eof: bool,
}

/// A received or locally-staged status (spec §7): either the peer's own
/// `StatusReport`, or the status this side is about to report after an
/// internal protocol error. The body beyond `status_code` is opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusData {
    pub status_code: StatusCode,
    pub body: Bytes,
}

/// Exactly one of these is staged at a time; `PollOutput` hands it to the
/// host, who takes ownership of any embedded buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// An outbound message the host must transmit.
    MsgToSend { buffer: Bytes },
    /// A `SendInit`/`ReceiveInit` was accepted.
    InitReceived { request_data: InitMessage, buffer: Bytes },
    /// A `SendAccept`/`ReceiveAccept` was accepted.
    AcceptReceived { accept_data: AcceptData, buffer: Bytes },
    /// A `BlockQuery` was accepted (sender side).
    QueryReceived,
    /// A `Block`/`BlockEOF` was accepted (receiver side).
    BlockReceived { block_data: BlockEventData, buffer: Bytes },
    /// A `BlockAck` was accepted (sender side).
    AckReceived,
    /// A `BlockAckEOF` was accepted (sender side).
    AckEofReceived,
    /// A peer `StatusReport` was received; its body is opaque to this core.
    StatusReceived { status_data: StatusData },
    /// A precondition on an inbound message failed; the session has moved
    /// to `State::Error`.
    InternalError { status_data: StatusData },
    /// `awaiting_response` held past the configured timeout.
    TransferTimeout,
}
