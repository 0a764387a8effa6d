// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shared helpers for the end-to-end scenario tests (spec §8), the way the
//! teacher's `tests/integration_tests/common.rs` holds setup shared across
//! its own scenario files.

use bdx_session::{
    config::SessionLimits,
    session::{Event, InitRequest, TransferSession},
    wire::flags::TransferControlFlags,
};
use bytes::Bytes;

pub fn limits(supported_opts: TransferControlFlags, max_block_size: u16) -> SessionLimits {
    SessionLimits {
        supported_opts,
        max_block_size,
        timeout_ms: 1_000,
        local_version: 0,
    }
}

pub fn init_request(transfer_length: u64) -> InitRequest {
    InitRequest {
        start_offset: 0,
        transfer_length,
        wide_range: false,
        file_designator: Bytes::from_static(b"scenario.bin"),
        metadata: Bytes::new(),
    }
}

pub fn take_wire_bytes(session: &mut TransferSession, now: u64) -> Bytes {
    match session.poll_output(now) {
        Event::MsgToSend { buffer } => buffer,
        other => panic!("expected MsgToSend, got {other:?}"),
    }
}
