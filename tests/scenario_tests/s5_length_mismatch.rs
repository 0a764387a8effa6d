// SPDX-License-Identifier: AGPL-3.0-or-later

//! S5: a definite-length transfer rejects a block that would overrun the
//! declared length (spec §8).

use bdx_session::{
    error::StatusCode,
    session::{AcceptRequest, Event, Role, State, TransferSession},
    wire::flags::{ControlMode, TransferControlFlags},
};
use bytes::Bytes;

use crate::scenario_tests::common::{init_request, limits, take_wire_bytes};

#[test]
fn block_exceeding_declared_length_is_length_mismatch() {
    let mut sender = TransferSession::new(limits(TransferControlFlags::SENDER_DRIVE, 1000));
    let mut receiver = TransferSession::new(limits(
        TransferControlFlags::SENDER_DRIVE | TransferControlFlags::RECEIVER_DRIVE,
        1000,
    ));

    receiver
        .wait_for_transfer(
            Role::Receiver,
            TransferControlFlags::SENDER_DRIVE | TransferControlFlags::RECEIVER_DRIVE,
            1000,
            1_000,
        )
        .unwrap();
    sender
        .start_transfer(Role::Sender, init_request(1000), 1_000, 0)
        .unwrap();
    receiver
        .handle_message_received(take_wire_bytes(&mut sender, 0), 0)
        .unwrap();
    receiver.poll_output(0);

    receiver
        .accept_transfer(AcceptRequest {
            mode: ControlMode::SenderDrive,
            max_block_size: 1000,
            metadata: Bytes::new(),
        })
        .unwrap();
    sender
        .handle_message_received(take_wire_bytes(&mut receiver, 0), 0)
        .unwrap();
    sender.poll_output(0);

    sender
        .prepare_block(Bytes::from(vec![0u8; 900]), false)
        .unwrap();
    receiver
        .handle_message_received(take_wire_bytes(&mut sender, 0), 0)
        .unwrap();
    assert!(matches!(
        receiver.poll_output(0),
        Event::BlockReceived { .. }
    ));
    assert_eq!(receiver.num_bytes_processed(), 900);

    receiver.prepare_block_ack().unwrap();
    sender
        .handle_message_received(take_wire_bytes(&mut receiver, 0), 0)
        .unwrap();
    sender.poll_output(0);

    sender
        .prepare_block(Bytes::from(vec![0u8; 200]), false)
        .unwrap();
    receiver
        .handle_message_received(take_wire_bytes(&mut sender, 0), 0)
        .unwrap();
    assert_eq!(receiver.state(), State::Error);
    match receiver.poll_output(0) {
        Event::InternalError { status_data } => {
            assert_eq!(status_data.status_code, StatusCode::LengthMismatch);
        }
        other => panic!("expected InternalError, got {other:?}"),
    }
}
