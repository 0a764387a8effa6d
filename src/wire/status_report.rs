// SPDX-License-Identifier: AGPL-3.0-or-later

//! `StatusReport` (spec §4.1, §7).
//!
//! The wider CHIP status-report frame carries a general code, a protocol ID,
//! and protocol-specific data beyond the two-byte BDX status code; per spec
//! §1 that surrounding envelope and any protocol-specific body are out of
//! scope and modeled here only as an opaque trailing blob the core never
//! inspects.

use bytes::Bytes;

use crate::{
    error::{CodecError, StatusCode},
    wire::common::{read_u16, write_u16},
};

const STATUS_CODE_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReportMessage {
    pub status_code: StatusCode,
    /// Opaque bytes beyond the status code; never parsed by this core.
    pub body: Bytes,
}

impl StatusReportMessage {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            body: Bytes::new(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(STATUS_CODE_LEN + self.body.len());
        write_u16(&mut out, self.status_code.as_u16());
        out.extend_from_slice(&self.body);
        out
    }

    pub fn decode(body: &Bytes) -> Result<Self, CodecError> {
        let status_code = StatusCode::from_u16(read_u16(body, 0)?);
        let rest = if body.len() <= STATUS_CODE_LEN {
            Bytes::new()
        } else {
            body.slice(STATUS_CODE_LEN..)
        };
        Ok(Self {
            status_code,
            body: rest,
        })
    }
}
