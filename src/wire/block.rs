// SPDX-License-Identifier: AGPL-3.0-or-later

//! `BlockQuery`, `Block`/`BlockEOF`, `BlockAck`/`BlockAckEOF` (spec §4.1).
//!
//! All five share a leading 4-byte block counter; `Block`/`BlockEOF` append
//! the raw block payload, which runs to the end of the message the same way
//! the teacher's `nop::request` treats its trailing ping data.

use bytes::Bytes;

use crate::{
    error::CodecError,
    wire::common::{read_u32, write_u32},
};

const COUNTER_LEN: usize = 4;

/// `BlockQuery`, `BlockAck`, and `BlockAckEOF` carry nothing but the block
/// counter they refer to, so one struct represents all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterMessage {
    pub block_counter: u32,
}

impl CounterMessage {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(COUNTER_LEN);
        write_u32(&mut out, self.block_counter);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            block_counter: read_u32(body, 0)?,
        })
    }
}

/// `Block` and `BlockEOF` share this layout: a block counter followed by the
/// raw block payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMessage {
    pub block_counter: u32,
    pub data: Bytes,
}

impl BlockMessage {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(COUNTER_LEN + self.data.len());
        write_u32(&mut out, self.block_counter);
        out.extend_from_slice(&self.data);
        out
    }

    pub fn decode(body: &Bytes) -> Result<Self, CodecError> {
        let block_counter = read_u32(body, 0)?;
        let data = if body.len() <= COUNTER_LEN {
            Bytes::new()
        } else {
            body.slice(COUNTER_LEN..)
        };
        Ok(Self {
            block_counter,
            data,
        })
    }
}
