// SPDX-License-Identifier: AGPL-3.0-or-later

//! S6: initiator and responder share no drive mode at all (spec §8).

use bdx_session::{
    error::StatusCode,
    session::{Event, Role, State, TransferSession},
    wire::flags::TransferControlFlags,
};

use crate::scenario_tests::common::{init_request, limits, take_wire_bytes};

#[test]
fn disjoint_drive_modes_reject_with_transfer_method_not_supported() {
    let mut initiator = TransferSession::new(limits(TransferControlFlags::SENDER_DRIVE, 1024));
    let mut responder = TransferSession::new(limits(TransferControlFlags::RECEIVER_DRIVE, 1024));

    responder
        .wait_for_transfer(Role::Receiver, TransferControlFlags::RECEIVER_DRIVE, 1024, 1_000)
        .unwrap();
    initiator
        .start_transfer(Role::Sender, init_request(0), 1_000, 0)
        .unwrap();

    responder
        .handle_message_received(take_wire_bytes(&mut initiator, 0), 0)
        .unwrap();

    assert_eq!(responder.state(), State::Error);
    match responder.poll_output(0) {
        Event::InternalError { status_data } => {
            assert_eq!(
                status_data.status_code,
                StatusCode::TransferMethodNotSupported
            );
        }
        other => panic!("expected InternalError, got {other:?}"),
    }
}
