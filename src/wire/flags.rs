// SPDX-License-Identifier: AGPL-3.0-or-later

//! The control-flags byte shared by `SendInit`/`ReceiveInit`,
//! `SendAccept`, and `ReceiveAccept` (spec §4.1).
//!
//! Layout:
//!
//! ```text
//!  7   6   5   4   3   2   1   0      bit position
//! +---+---+---+---+---+---+---+---+
//! | . | . | W | S | D | A | R | S |
//! +---+---+---+---+---+---+---+---+
//! ```
//!
//! * bits 0-2: drive mode proposal/selection — `SenderDrive`, `ReceiverDrive`,
//!   `Async`.
//! * bit 3: `DefiniteLength` — the transfer declares a total length.
//! * bit 4: `StartOffsetPresent` — a non-zero start offset follows.
//! * bit 5: `WideRange` — offset/length fields are 8 bytes, not 4.
//! * bits 6-7: reserved, MUST be zero.
//!
//! Follows the `RawLoginFlags`/`LoginFlags` split in the teacher's
//! `models::login::common`: a `bitflags!` set for ergonomic access plus a
//! `#[repr(transparent)]`, zerocopy wire wrapper.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::CodecError;

impl serde::Serialize for TransferControlFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> serde::Deserialize<'de> for TransferControlFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        Ok(TransferControlFlags::from_bits_truncate(bits))
    }
}

bitflags::bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct TransferControlFlags: u8 {
        const SENDER_DRIVE         = 0b0000_0001;
        const RECEIVER_DRIVE       = 0b0000_0010;
        const ASYNC                = 0b0000_0100;
        const DEFINITE_LENGTH       = 0b0000_1000;
        const START_OFFSET_PRESENT = 0b0001_0000;
        const WIDE_RANGE           = 0b0010_0000;
    }
}

impl TransferControlFlags {
    const RESERVED_MASK: u8 = 0b1100_0000;
    const MODE_MASK: u8 = 0b0000_0111;

    /// Just the drive-mode bits (ignores the range bits).
    #[inline]
    pub const fn modes(self) -> TransferControlFlags {
        TransferControlFlags::from_bits_truncate(self.bits() & Self::MODE_MASK)
    }

    /// `Some(mode)` iff exactly one drive-mode bit is set.
    pub fn single_mode(self) -> Option<ControlMode> {
        let modes = self.modes();
        if modes == TransferControlFlags::SENDER_DRIVE {
            Some(ControlMode::SenderDrive)
        } else if modes == TransferControlFlags::RECEIVER_DRIVE {
            Some(ControlMode::ReceiverDrive)
        } else if modes == TransferControlFlags::ASYNC {
            Some(ControlMode::Async)
        } else {
            None
        }
    }
}

/// The resolved drive mode for a transfer (spec §4.2, GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    SenderDrive,
    ReceiverDrive,
    Async,
}

impl ControlMode {
    #[inline]
    pub const fn as_flag(self) -> TransferControlFlags {
        match self {
            Self::SenderDrive => TransferControlFlags::SENDER_DRIVE,
            Self::ReceiverDrive => TransferControlFlags::RECEIVER_DRIVE,
            Self::Async => TransferControlFlags::ASYNC,
        }
    }
}

/// Wire-safe, zero-copy wrapper for the one-byte control-flags field.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Default, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct RawControlFlags(u8);

impl RawControlFlags {
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn from_raw(v: u8) -> Self {
        Self(v)
    }

    /// Decode, rejecting reserved bits per spec §4.1.
    pub fn decode(self) -> Result<TransferControlFlags, CodecError> {
        if self.0 & TransferControlFlags::RESERVED_MASK != 0 {
            return Err(CodecError::ReservedBitsSet(self.0));
        }
        Ok(TransferControlFlags::from_bits_truncate(self.0))
    }

    #[inline]
    pub fn encode(&mut self, flags: TransferControlFlags) {
        self.0 = flags.bits();
    }
}

impl core::fmt::Debug for RawControlFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.decode() {
            Ok(flags) => write!(f, "RawControlFlags({flags:?})"),
            Err(_) => write!(f, "RawControlFlags(0x{:02x}, reserved-bits-set)", self.0),
        }
    }
}
