// SPDX-License-Identifier: AGPL-3.0-or-later

//! Fixture-driven round-trip tests over hand-built wire captures, the way
//! the teacher's `tests/unit_tests/test_nop.rs` decodes fixed hex blobs
//! instead of only round-tripping freshly-constructed structs.

use std::fs;

use bdx_session::wire::{flags::TransferControlFlags, init::InitMessage, strip_header_prefix, MessageType};
use bytes::Bytes;
use hex::FromHex;

fn load_fixture(name: &str) -> Vec<u8> {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path}: {e}"));
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    Vec::from_hex(cleaned).expect("valid hex fixture")
}

#[test]
fn send_init_narrow_fixture_decodes() {
    let raw = load_fixture("send_init_narrow.hex");
    let (msg_type, body) = strip_header_prefix(&raw).expect("header prefix");
    assert_eq!(msg_type, MessageType::SendInit);

    let decoded = InitMessage::decode(&Bytes::copy_from_slice(body)).expect("decode init");
    assert_eq!(decoded.version, 0);
    assert!(decoded.flags.contains(TransferControlFlags::SENDER_DRIVE));
    assert!(decoded.flags.contains(TransferControlFlags::DEFINITE_LENGTH));
    assert!(!decoded.flags.contains(TransferControlFlags::WIDE_RANGE));
    assert_eq!(decoded.max_block_size, 1024);
    assert_eq!(decoded.start_offset, 0);
    assert_eq!(decoded.max_length, 1500);
    assert_eq!(&decoded.file_designator[..], b"test.bin");
    assert!(decoded.metadata.is_empty());
}
