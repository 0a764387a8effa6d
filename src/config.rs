// SPDX-License-Identifier: AGPL-3.0-or-later

//! Host-supplied, non-wire session configuration.
//!
//! Mirrors the struct-of-struct, `serde`-deserializable layout of the
//! teacher's `cfg::config::Config`, minus any notion of a filesystem —
//! this core never loads its own configuration; the host decides how
//! `SessionLimits` gets built and hands it to [`crate::session::TransferSession`].

use serde::{Deserialize, Serialize};

use crate::wire::flags::TransferControlFlags;

/// Locally-configured limits and capabilities a host supplies when opening
/// a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLimits {
    /// Drive modes this end is willing to use, independent of what a peer
    /// proposes (spec §4.2).
    #[serde(rename = "supported-transfer-modes")]
    pub supported_opts: TransferControlFlags,

    /// The largest block size this end will accept or send.
    #[serde(rename = "max-block-size")]
    pub max_block_size: u16,

    /// How long the host will wait for a response before surfacing a
    /// timeout to `HandleTransferTimeout` (spec §3, §4.3). Advisory only —
    /// the core never starts its own timer.
    #[serde(rename = "response-timeout-ms")]
    pub timeout_ms: u32,

    /// The BDX protocol version this end reports in its own `Init`/`Accept`
    /// messages.
    #[serde(rename = "local-version")]
    pub local_version: u8,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            supported_opts: TransferControlFlags::SENDER_DRIVE
                | TransferControlFlags::RECEIVER_DRIVE,
            max_block_size: 1024,
            timeout_ms: 5_000,
            local_version: 0,
        }
    }
}
