// SPDX-License-Identifier: AGPL-3.0-or-later

//! The two small enums that tag a [`super::TransferSession`]: which end of
//! the exchange it is, and which step of the handshake/streaming sequence
//! it currently occupies (spec §3, §4.3).

/// Which side of the transfer this session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Sender,
    Receiver,
}

/// The session's position in the handshake/streaming sequence (spec §4.3's
/// state diagram).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    AwaitingInit,
    AwaitingAccept,
    NegotiateParams,
    InProgress,
    AwaitingEofAck,
    ReceivedEof,
    Done,
    Error,
}
