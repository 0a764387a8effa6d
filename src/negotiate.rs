// SPDX-License-Identifier: AGPL-3.0-or-later

//! Drive-mode negotiation (spec §4.2).
//!
//! Pure functions, no session state: the responder narrows a peer's proposed
//! modes down against what it locally supports, and the initiator later
//! confirms the peer's chosen mode was legitimate.

use crate::{
    error::SessionError,
    wire::flags::{ControlMode, TransferControlFlags},
};

/// Narrow `proposed` against `supported`, the way a responder does when
/// building its Accept. `Async` is excluded unless it is the only common
/// mode, since async-mode transport is recognized but not implemented
/// (spec §1 Non-goals); both sides must still agree to offer a synchronous
/// mode for the transfer to proceed.
///
/// Returns the set of common modes. When more than one bit remains, the
/// caller (an application driving `AcceptTransfer`) picks among them; when
/// exactly one remains, resolution is unambiguous.
pub fn resolve(
    proposed: TransferControlFlags,
    supported: TransferControlFlags,
) -> Result<TransferControlFlags, SessionError> {
    let sync_modes = TransferControlFlags::SENDER_DRIVE | TransferControlFlags::RECEIVER_DRIVE;
    // Step 1: at least one synchronous mode must be proposed, independent of
    // what the responder supports.
    if !proposed.modes().intersects(sync_modes) {
        return Err(SessionError::NoCommonMode);
    }

    let common = proposed.modes() & supported.modes();
    if common.is_empty() {
        return Err(SessionError::NoCommonMode);
    }
    let sync_only = common & sync_modes;
    if sync_only.is_empty() && !common.contains(TransferControlFlags::ASYNC) {
        return Err(SessionError::NoCommonMode);
    }
    Ok(common)
}

/// When exactly one synchronous mode is common, resolve it directly;
/// `Async` only wins when it is the sole common bit, since no synchronous
/// alternative exists to prefer over it.
pub fn resolve_single(
    proposed: TransferControlFlags,
    supported: TransferControlFlags,
) -> Result<ControlMode, SessionError> {
    let common = resolve(proposed, supported)?;
    if let Some(mode) = common.single_mode() {
        return Ok(mode);
    }
    if common.contains(TransferControlFlags::ASYNC) {
        return Ok(ControlMode::Async);
    }
    if common.contains(TransferControlFlags::RECEIVER_DRIVE) {
        return Ok(ControlMode::ReceiverDrive);
    }
    Ok(ControlMode::SenderDrive)
}

/// Confirm, on the initiator side, that the peer's chosen `mode` was
/// actually among the modes we proposed.
pub fn verify(mode: ControlMode, proposed: TransferControlFlags) -> Result<(), SessionError> {
    if proposed.modes().contains(mode.as_flag()) {
        Ok(())
    } else {
        Err(SessionError::ModeNotOffered)
    }
}
