// SPDX-License-Identifier: AGPL-3.0-or-later

//! S1: sender-drive, initiator = sender, two blocks (spec §8).

use bdx_session::{
    session::{AcceptRequest, Event, Role, State, TransferSession},
    wire::flags::{ControlMode, TransferControlFlags},
};
use bytes::Bytes;

use crate::scenario_tests::common::{init_request, limits, take_wire_bytes};

#[test]
fn sender_drive_two_block_transfer_reaches_done() {
    let mut sender = TransferSession::new(limits(TransferControlFlags::SENDER_DRIVE, 1024));
    let mut receiver = TransferSession::new(limits(
        TransferControlFlags::SENDER_DRIVE | TransferControlFlags::RECEIVER_DRIVE,
        1024,
    ));

    receiver
        .wait_for_transfer(
            Role::Receiver,
            TransferControlFlags::SENDER_DRIVE | TransferControlFlags::RECEIVER_DRIVE,
            1024,
            1_000,
        )
        .unwrap();
    sender
        .start_transfer(Role::Sender, init_request(1500), 1_000, 0)
        .unwrap();
    let init_wire = take_wire_bytes(&mut sender, 0);
    receiver.handle_message_received(init_wire, 0).unwrap();
    assert!(matches!(
        receiver.poll_output(0),
        Event::InitReceived { .. }
    ));

    receiver
        .accept_transfer(AcceptRequest {
            mode: ControlMode::SenderDrive,
            max_block_size: 1024,
            metadata: Bytes::new(),
        })
        .unwrap();
    let accept_wire = take_wire_bytes(&mut receiver, 0);
    sender.handle_message_received(accept_wire, 0).unwrap();
    assert!(matches!(
        sender.poll_output(0),
        Event::AcceptReceived { .. }
    ));
    assert_eq!(sender.control_mode(), Some(ControlMode::SenderDrive));

    sender
        .prepare_block(Bytes::from(vec![7u8; 1024]), false)
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

    sender
        .prepare_block(Bytes::from(vec![7u8; 476]), true)
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
    assert_eq!(receiver.num_bytes_processed(), 1500);
}
