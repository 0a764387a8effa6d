// SPDX-License-Identifier: AGPL-3.0-or-later

//! S2: receiver-drive, initiator = receiver, indefinite length (spec §8).

use bdx_session::{
    session::{AcceptRequest, Event, Role, State, TransferSession},
    wire::flags::{ControlMode, TransferControlFlags},
};
use bytes::Bytes;

use crate::scenario_tests::common::{init_request, limits, take_wire_bytes};

#[test]
fn receiver_drive_pulls_two_blocks_to_done() {
    let mut receiver = TransferSession::new(limits(TransferControlFlags::RECEIVER_DRIVE, 512));
    let mut sender = TransferSession::new(limits(
        TransferControlFlags::SENDER_DRIVE | TransferControlFlags::RECEIVER_DRIVE,
        1024,
    ));

    sender
        .wait_for_transfer(
            Role::Sender,
            TransferControlFlags::SENDER_DRIVE | TransferControlFlags::RECEIVER_DRIVE,
            1024,
            1_000,
        )
        .unwrap();
    receiver
        .start_transfer(Role::Receiver, init_request(0), 1_000, 0)
        .unwrap();
    sender
        .handle_message_received(take_wire_bytes(&mut receiver, 0), 0)
        .unwrap();
    assert!(matches!(sender.poll_output(0), Event::InitReceived { .. }));

    sender
        .accept_transfer(AcceptRequest {
            mode: ControlMode::ReceiverDrive,
            max_block_size: 512,
            metadata: Bytes::new(),
        })
        .unwrap();
    receiver
        .handle_message_received(take_wire_bytes(&mut sender, 0), 0)
        .unwrap();
    assert!(matches!(
        receiver.poll_output(0),
        Event::AcceptReceived { .. }
    ));
    assert_eq!(receiver.control_mode(), Some(ControlMode::ReceiverDrive));

    receiver.prepare_block_query().unwrap();
    sender
        .handle_message_received(take_wire_bytes(&mut receiver, 0), 0)
        .unwrap();
    assert!(matches!(sender.poll_output(0), Event::QueryReceived));

    sender
        .prepare_block(Bytes::from(vec![1u8; 512]), false)
        .unwrap();
    receiver
        .handle_message_received(take_wire_bytes(&mut sender, 0), 0)
        .unwrap();
    assert!(matches!(
        receiver.poll_output(0),
        Event::BlockReceived { .. }
    ));

    receiver.prepare_block_ack().unwrap();
    sender
        .handle_message_received(take_wire_bytes(&mut receiver, 0), 0)
        .unwrap();
    assert!(matches!(sender.poll_output(0), Event::AckReceived));

    receiver.prepare_block_query().unwrap();
    sender
        .handle_message_received(take_wire_bytes(&mut receiver, 0), 0)
        .unwrap();
    sender.poll_output(0);

    sender
        .prepare_block(Bytes::from(vec![2u8; 100]), true)
        .unwrap();
    receiver
        .handle_message_received(take_wire_bytes(&mut sender, 0), 0)
        .unwrap();
    assert_eq!(receiver.state(), State::ReceivedEof);
    receiver.poll_output(0);

    receiver.prepare_block_ack().unwrap();
    assert_eq!(receiver.state(), State::Done);
    sender
        .handle_message_received(take_wire_bytes(&mut receiver, 0), 0)
        .unwrap();
    assert!(matches!(sender.poll_output(0), Event::AckEofReceived));
    assert_eq!(sender.state(), State::Done);
    assert_eq!(receiver.num_bytes_processed(), 612);
}
