// SPDX-License-Identifier: AGPL-3.0-or-later

//! Status codes and error types shared by the wire codecs and the state
//! machine.
//!
//! Follows the decode-with-fallback idiom used throughout the teacher's
//! `models::login::status` / `models::reject::reject_description`: a
//! `#[repr(u16)]` enum with an infallible `from_u16`/`as_u16` pair, so an
//! unrecognized wire value round-trips instead of becoming a decode error.

use thiserror::Error;

use crate::session::{Role, State};

/// BDX status codes (spec §6). Used both to surface a protocol error
/// locally (`Event::InternalError`) and as the (currently opaque) body of a
/// future `StatusReport`.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Overflow = 0x0011,
    LengthTooLarge = 0x0012,
    LengthTooShort = 0x0013,
    LengthMismatch = 0x0014,
    LengthRequired = 0x0015,
    BadMessageContents = 0x0016,
    BadBlockCounter = 0x0017,
    TransferFailedUnknownError = 0x001F,
    ServerBadState = 0x0020,
    FailureToSend = 0x0021,
    TransferMethodNotSupported = 0x0050,
    FileDesignatorUnknown = 0x0051,
    StartOffsetNotSupported = 0x0052,
    VersionNotSupported = 0x0053,
    Unknown = 0x005F,
}

impl StatusCode {
    /// Decode a raw wire value, folding anything unrecognized into
    /// `Unknown` rather than failing.
    #[inline]
    pub const fn from_u16(v: u16) -> Self {
        match v {
            0x0011 => Self::Overflow,
            0x0012 => Self::LengthTooLarge,
            0x0013 => Self::LengthTooShort,
            0x0014 => Self::LengthMismatch,
            0x0015 => Self::LengthRequired,
            0x0016 => Self::BadMessageContents,
            0x0017 => Self::BadBlockCounter,
            0x001F => Self::TransferFailedUnknownError,
            0x0020 => Self::ServerBadState,
            0x0021 => Self::FailureToSend,
            0x0050 => Self::TransferMethodNotSupported,
            0x0051 => Self::FileDesignatorUnknown,
            0x0052 => Self::StartOffsetNotSupported,
            0x0053 => Self::VersionNotSupported,
            _ => Self::Unknown,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

impl From<u16> for StatusCode {
    #[inline]
    fn from(v: u16) -> Self {
        Self::from_u16(v)
    }
}

/// Failures raised while encoding or decoding a single BDX message.
///
/// Every variant maps onto a [`StatusCode`] via [`CodecError::status_code`]
/// so callers that need to stage a protocol-level error (rather than
/// propagate a Rust error) don't have to re-derive the right wire value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("truncated message: need at least {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },

    #[error("reserved bits set in control-flags byte: {0:#04x}")]
    ReservedBitsSet(u8),

    #[error("length prefix inconsistent with remaining buffer")]
    LengthMismatch,

    #[error("unknown BDX message type: {0:#04x}")]
    UnknownMessageType(u8),

    #[error("payload-header prefix does not identify a BDX message")]
    NotBdx,

    #[error("control-flags byte carries zero or more than one drive mode")]
    InvalidDriveModeCount,
}

impl CodecError {
    /// The [`StatusCode`] this decode failure should be reported as, per
    /// spec §4.3's per-message validation table.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Truncated { .. } => StatusCode::BadMessageContents,
            Self::ReservedBitsSet(_) => StatusCode::BadMessageContents,
            Self::LengthMismatch => StatusCode::LengthMismatch,
            Self::UnknownMessageType(_) => StatusCode::BadMessageContents,
            Self::NotBdx => StatusCode::BadMessageContents,
            // Only ever raised decoding a SendAccept/ReceiveAccept, whose
            // validation-table row restricts failures to ServerBadState/
            // BadMessageContents.
            Self::InvalidDriveModeCount => StatusCode::BadMessageContents,
        }
    }
}

/// Operational errors: a precondition on a host-initiated call failed.
/// Per spec §7, the session's state is left unchanged when one of these is
/// returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("operation requires state {expected:?}, session is in {actual:?}")]
    WrongState { expected: State, actual: State },

    #[error("operation requires role {expected:?}, session has role {actual:?}")]
    WrongRole { expected: Role, actual: Role },

    #[error(
        "pending output must be drained via poll_output before the next call"
    )]
    OutputPending,

    #[error("operation requires awaiting_response to be true")]
    UnexpectedAwaitingResponse,

    #[error("block data length {got} exceeds negotiated block size {max}")]
    DataTooLarge { max: usize, got: usize },

    #[error("block data is empty but is_eof is false")]
    EmptyNonEofBlock,

    #[error("no drive mode is common to the proposed and supported sets")]
    NoCommonMode,

    #[error("chosen drive mode was not present in the proposed set")]
    ModeNotOffered,

    #[error("chosen drive mode's max_block_size exceeds the proposed value")]
    BlockSizeNotOffered,

    #[error("async drive mode is recognized but not implemented")]
    NotImplementedAsync,

    #[error(transparent)]
    Codec(#[from] CodecError),
}

pub type Result<T> = core::result::Result<T, SessionError>;
