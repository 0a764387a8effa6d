// SPDX-License-Identifier: AGPL-3.0-or-later

//! The BDX session state machine (spec §3, §4.3) — the ~55% of the core
//! that holds per-transfer state, validates every inbound message against
//! (role, state, counter, length, await-response), performs transitions,
//! and stages at most one outbound message or event at a time.
//!
//! Mirrors the shape of the teacher's `state_machine::login_states`: a
//! struct holding mutable session state plus an impl block of the public
//! operations that drive it, except here the driver is synchronous and
//! sans-I/O rather than an `async` `StateMachine` trait over a live
//! connection — this core never awaits anything, it only computes.

pub mod event;
pub mod state;

pub use event::{AcceptData, BlockEventData, Event, StatusData};
pub use state::{Role, State};

use bytes::Bytes;
use tracing::{debug, error, warn};

use crate::{
    config::SessionLimits,
    error::{Result, SessionError, StatusCode},
    negotiate,
    wire::{
        self,
        accept::{ReceiveAcceptMessage, SendAcceptMessage},
        block::{BlockMessage, CounterMessage},
        flags::{ControlMode, TransferControlFlags},
        init::InitMessage,
        status_report::StatusReportMessage,
        with_header_prefix, MessageType,
    },
};

/// Host-supplied contents for the `Init` message a session stages when it
/// is the initiator (spec §4.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    pub start_offset: u64,
    /// Zero means indefinite.
    pub transfer_length: u64,
    pub wide_range: bool,
    pub file_designator: Bytes,
    pub metadata: Bytes,
}

/// The application's choice of drive mode and block size when responding
/// to a negotiated `Init` (spec §4.2, §4.3's `AcceptTransfer`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptRequest {
    pub mode: ControlMode,
    pub max_block_size: u16,
    pub metadata: Bytes,
}

/// One BDX transfer session (spec §3). Owns no sockets, timers, or files;
/// every entry point is bounded-time and purely computational.
#[derive(Debug)]
pub struct TransferSession {
    role: Role,
    state: State,
    is_initiator: bool,

    supported_opts: TransferControlFlags,
    peer_proposed_opts: TransferControlFlags,
    resolved_modes: TransferControlFlags,
    control_mode: Option<ControlMode>,

    max_supported_block_size: u16,
    peer_max_block_size: u16,
    negotiated_block_size: u16,

    start_offset: u64,
    /// Zero means indefinite.
    transfer_length: u64,
    wide_range: bool,
    num_bytes_processed: u64,

    next_block_num: u32,
    last_block_num: u32,
    next_query_num: u32,
    last_query_num: u32,

    awaiting_response: bool,
    timeout_ms: u32,
    timeout_start_ms: u64,

    local_version: u8,
    peer_version: u8,

    pending_output: Option<Event>,
}

impl TransferSession {
    /// A fresh, `Idle` session using `limits` as the starting configuration.
    /// `WaitForTransfer` may still override `supported_opts`/`max_block_size`/
    /// `timeout_ms` per call.
    pub fn new(limits: SessionLimits) -> Self {
        Self {
            role: Role::Sender,
            state: State::Idle,
            is_initiator: false,
            supported_opts: limits.supported_opts,
            peer_proposed_opts: TransferControlFlags::empty(),
            resolved_modes: TransferControlFlags::empty(),
            control_mode: None,
            max_supported_block_size: limits.max_block_size,
            peer_max_block_size: 0,
            negotiated_block_size: 0,
            start_offset: 0,
            transfer_length: 0,
            wide_range: false,
            num_bytes_processed: 0,
            next_block_num: 0,
            last_block_num: 0,
            next_query_num: 0,
            last_query_num: 0,
            awaiting_response: false,
            timeout_ms: limits.timeout_ms,
            timeout_start_ms: 0,
            local_version: limits.local_version,
            peer_version: 0,
            pending_output: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn control_mode(&self) -> Option<ControlMode> {
        self.control_mode
    }

    pub fn num_bytes_processed(&self) -> u64 {
        self.num_bytes_processed
    }

    pub fn awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    /// `SendInit`/`SendAccept` are the messages a `Sender`-role session
    /// emits when it is acting as the initiator, or the messages a
    /// `Receiver`-role session emits when it is acting as the responder
    /// (spec §4.1, §4.3's validation table — `SendInit` is required role
    /// `Receiver` on the inbound side, meaning it is sent by whichever
    /// session is `Sender`-or-initiating-as-the-opposite-role).
    fn is_send_family(&self) -> bool {
        (self.role == Role::Sender) == self.is_initiator
    }

    fn is_passive_side(&self, mode: ControlMode) -> bool {
        matches!(
            (self.role, mode),
            (Role::Receiver, ControlMode::SenderDrive) | (Role::Sender, ControlMode::ReceiverDrive)
        )
    }

    fn stage(&mut self, event: Event) {
        self.pending_output = Some(event);
    }

    fn internal_error(&mut self, status_code: StatusCode) {
        warn!(?status_code, state = ?self.state, role = ?self.role, "rejecting inbound BDX message");
        self.state = State::Error;
        self.awaiting_response = false;
        self.stage(Event::InternalError {
            status_data: StatusData {
                status_code,
                body: Bytes::new(),
            },
        });
    }

    fn require_idle(&self) -> Result<()> {
        if self.state != State::Idle {
            return Err(SessionError::WrongState {
                expected: State::Idle,
                actual: self.state,
            });
        }
        if self.pending_output.is_some() {
            return Err(SessionError::OutputPending);
        }
        Ok(())
    }

    /// Begin a transfer as the initiator: stage a `SendInit`/`ReceiveInit`
    /// and move to `AwaitingAccept` (spec §4.3).
    pub fn start_transfer(
        &mut self,
        role: Role,
        request: InitRequest,
        timeout_ms: u32,
        now: u64,
    ) -> Result<()> {
        self.require_idle()?;
        self.role = role;
        self.is_initiator = true;
        self.timeout_ms = timeout_ms;
        self.start_offset = request.start_offset;
        self.transfer_length = request.transfer_length;
        self.wide_range = request.wide_range;

        let mut flags = self.supported_opts.modes();
        if request.wide_range {
            flags |= TransferControlFlags::WIDE_RANGE;
        }
        if request.transfer_length > 0 {
            flags |= TransferControlFlags::DEFINITE_LENGTH;
        }
        if request.start_offset > 0 {
            flags |= TransferControlFlags::START_OFFSET_PRESENT;
        }

        let init = InitMessage {
            version: self.local_version,
            flags,
            max_block_size: self.max_supported_block_size,
            start_offset: request.start_offset,
            max_length: request.transfer_length,
            file_designator: request.file_designator,
            metadata: request.metadata,
        };
        let msg_type = if self.is_send_family() {
            MessageType::SendInit
        } else {
            MessageType::ReceiveInit
        };
        let buffer = Bytes::from(with_header_prefix(msg_type, init.encode()));

        self.state = State::AwaitingAccept;
        self.awaiting_response = true;
        self.timeout_start_ms = now;
        debug!(role = ?self.role, "StartTransfer -> AwaitingAccept");
        self.stage(Event::MsgToSend { buffer });
        Ok(())
    }

    /// Begin a transfer as the responder: no outbound, just moves to
    /// `AwaitingInit` and (re-)establishes the local limits for this
    /// transfer (spec §4.3).
    pub fn wait_for_transfer(
        &mut self,
        role: Role,
        supported_opts: TransferControlFlags,
        max_block_size: u16,
        timeout_ms: u32,
    ) -> Result<()> {
        self.require_idle()?;
        self.role = role;
        self.is_initiator = false;
        self.supported_opts = supported_opts;
        self.max_supported_block_size = max_block_size;
        self.timeout_ms = timeout_ms;
        self.state = State::AwaitingInit;
        Ok(())
    }

    /// Respond to a negotiated `Init` by staging a `SendAccept`/
    /// `ReceiveAccept` and moving to `InProgress` (spec §4.2, §4.3).
    pub fn accept_transfer(&mut self, request: AcceptRequest) -> Result<()> {
        if self.state != State::NegotiateParams {
            return Err(SessionError::WrongState {
                expected: State::NegotiateParams,
                actual: self.state,
            });
        }
        if self.pending_output.is_some() {
            return Err(SessionError::OutputPending);
        }
        if request.mode == ControlMode::Async {
            return Err(SessionError::NotImplementedAsync);
        }
        if !self.resolved_modes.contains(request.mode.as_flag()) {
            return Err(SessionError::ModeNotOffered);
        }
        if request.max_block_size > self.peer_max_block_size {
            return Err(SessionError::BlockSizeNotOffered);
        }

        let negotiated_block_size = request.max_block_size.min(self.max_supported_block_size);
        let version = self.local_version.min(self.peer_version);

        let buffer = if self.is_send_family() {
            let msg = SendAcceptMessage {
                mode: request.mode,
                version,
                max_block_size: negotiated_block_size,
                metadata: request.metadata,
            };
            with_header_prefix(MessageType::SendAccept, msg.encode())
        } else {
            let msg = ReceiveAcceptMessage {
                mode: request.mode,
                version,
                max_block_size: negotiated_block_size,
                start_offset: self.start_offset,
                length: self.transfer_length,
                wide_range: self.wide_range,
                metadata: request.metadata,
            };
            with_header_prefix(MessageType::ReceiveAccept, msg.encode())
        };

        self.negotiated_block_size = negotiated_block_size;
        self.control_mode = Some(request.mode);
        self.state = State::InProgress;
        self.awaiting_response = self.is_passive_side(request.mode);
        debug!(mode = ?request.mode, negotiated_block_size, "AcceptTransfer -> InProgress");
        self.stage(Event::MsgToSend {
            buffer: Bytes::from(buffer),
        });
        Ok(())
    }

    /// Receiver-only: stage a `BlockQuery` for the next block (spec §4.3).
    pub fn prepare_block_query(&mut self) -> Result<()> {
        if self.role != Role::Receiver {
            return Err(SessionError::WrongRole {
                expected: Role::Receiver,
                actual: self.role,
            });
        }
        if self.state != State::InProgress {
            return Err(SessionError::WrongState {
                expected: State::InProgress,
                actual: self.state,
            });
        }
        if self.pending_output.is_some() {
            return Err(SessionError::OutputPending);
        }
        if self.awaiting_response {
            return Err(SessionError::UnexpectedAwaitingResponse);
        }

        let counter = self.next_query_num;
        let msg = CounterMessage {
            block_counter: counter,
        };
        let buffer = with_header_prefix(MessageType::BlockQuery, msg.encode());
        self.last_query_num = counter;
        self.next_query_num = counter.wrapping_add(1);
        self.awaiting_response = true;
        self.stage(Event::MsgToSend {
            buffer: Bytes::from(buffer),
        });
        Ok(())
    }

    /// Sender-only: stage a `Block`/`BlockEOF` carrying `data` (spec §4.3).
    pub fn prepare_block(&mut self, data: Bytes, is_eof: bool) -> Result<()> {
        if self.role != Role::Sender {
            return Err(SessionError::WrongRole {
                expected: Role::Sender,
                actual: self.role,
            });
        }
        if self.state != State::InProgress {
            return Err(SessionError::WrongState {
                expected: State::InProgress,
                actual: self.state,
            });
        }
        if self.pending_output.is_some() {
            return Err(SessionError::OutputPending);
        }
        if self.awaiting_response {
            return Err(SessionError::UnexpectedAwaitingResponse);
        }
        if data.len() > self.negotiated_block_size as usize {
            return Err(SessionError::DataTooLarge {
                max: self.negotiated_block_size as usize,
                got: data.len(),
            });
        }
        if data.is_empty() && !is_eof {
            return Err(SessionError::EmptyNonEofBlock);
        }

        let counter = self.next_block_num;
        let msg = BlockMessage {
            block_counter: counter,
            data,
        };
        let msg_type = if is_eof {
            MessageType::BlockEof
        } else {
            MessageType::Block
        };
        let buffer = with_header_prefix(msg_type, msg.encode());
        self.last_block_num = counter;
        self.next_block_num = counter.wrapping_add(1);
        self.awaiting_response = true;
        if is_eof {
            self.state = State::AwaitingEofAck;
        }
        self.stage(Event::MsgToSend {
            buffer: Bytes::from(buffer),
        });
        Ok(())
    }

    /// Receiver-only: stage a `BlockAck` (from `InProgress`) or a
    /// `BlockAckEOF` (from `ReceivedEOF`, entering `Done`) (spec §4.3).
    pub fn prepare_block_ack(&mut self) -> Result<()> {
        if self.role != Role::Receiver {
            return Err(SessionError::WrongRole {
                expected: Role::Receiver,
                actual: self.role,
            });
        }
        if self.pending_output.is_some() {
            return Err(SessionError::OutputPending);
        }

        match self.state {
            State::InProgress => {
                let counter = self.last_block_num;
                let msg = CounterMessage {
                    block_counter: counter,
                };
                let buffer = with_header_prefix(MessageType::BlockAck, msg.encode());
                // Under SenderDrive there is no separate BlockQuery; the ack
                // itself re-arms the wait the way a query would (spec §4.3).
                if self.control_mode == Some(ControlMode::SenderDrive) {
                    self.last_query_num = counter.wrapping_add(1);
                    self.next_query_num = self.last_query_num;
                    self.awaiting_response = true;
                }
                self.stage(Event::MsgToSend {
                    buffer: Bytes::from(buffer),
                });
                Ok(())
            }
            State::ReceivedEof => {
                let counter = self.last_block_num;
                let msg = CounterMessage {
                    block_counter: counter,
                };
                let buffer = with_header_prefix(MessageType::BlockAckEof, msg.encode());
                self.state = State::Done;
                self.awaiting_response = false;
                self.stage(Event::MsgToSend {
                    buffer: Bytes::from(buffer),
                });
                Ok(())
            }
            other => Err(SessionError::WrongState {
                expected: State::InProgress,
                actual: other,
            }),
        }
    }

    /// Decode and dispatch one inbound datagram (spec §4.3). Envelope-level
    /// failures (drain discipline, non-BDX protocol ID, unknown message
    /// type) are operational errors returned to the caller with the
    /// session unchanged; everything past that — a known message type that
    /// fails its role/state/counter/length checks — is a protocol error
    /// staged as `Event::InternalError`, with this call still returning
    /// `Ok(())` (spec §7).
    pub fn handle_message_received(&mut self, buffer: Bytes, now: u64) -> Result<()> {
        if self.pending_output.is_some() {
            return Err(SessionError::OutputPending);
        }
        let (msg_type, _) = wire::strip_header_prefix(&buffer)?;
        let body = buffer.slice(wire::HEADER_PREFIX_LEN..);
        self.timeout_start_ms = now;

        match msg_type {
            MessageType::SendInit | MessageType::ReceiveInit => self.handle_init(msg_type, body),
            MessageType::SendAccept | MessageType::ReceiveAccept => {
                self.handle_accept(msg_type, body)
            }
            MessageType::BlockQuery => self.handle_block_query(body),
            MessageType::Block => self.handle_block(body, false),
            MessageType::BlockEof => self.handle_block(body, true),
            MessageType::BlockAck => self.handle_block_ack(body),
            MessageType::BlockAckEof => self.handle_block_ack_eof(body),
            MessageType::StatusReport => self.handle_status_report(body),
        }
        Ok(())
    }

    fn handle_init(&mut self, msg_type: MessageType, body: Bytes) {
        let expected_role = if msg_type == MessageType::SendInit {
            Role::Receiver
        } else {
            Role::Sender
        };
        if self.role != expected_role || self.state != State::AwaitingInit {
            self.internal_error(StatusCode::ServerBadState);
            return;
        }
        let init = match InitMessage::decode(&body) {
            Ok(init) => init,
            Err(err) => {
                self.internal_error(err.status_code());
                return;
            }
        };
        let common = match negotiate::resolve(init.flags, self.supported_opts) {
            Ok(common) => common,
            Err(_) => {
                self.internal_error(StatusCode::TransferMethodNotSupported);
                return;
            }
        };

        self.peer_proposed_opts = init.flags.modes();
        self.resolved_modes = common;
        self.peer_max_block_size = init.max_block_size;
        self.start_offset = init.start_offset;
        self.transfer_length = init.max_length;
        self.wide_range = init.flags.contains(TransferControlFlags::WIDE_RANGE);
        self.peer_version = init.version;
        if let Some(mode) = common.single_mode() {
            self.control_mode = Some(mode);
        }
        self.state = State::NegotiateParams;
        debug!(common = ?common, "Init accepted -> NegotiateParams");
        self.stage(Event::InitReceived {
            request_data: init,
            buffer: body,
        });
    }

    fn handle_accept(&mut self, msg_type: MessageType, body: Bytes) {
        let expected_role = if msg_type == MessageType::SendAccept {
            Role::Sender
        } else {
            Role::Receiver
        };
        if self.role != expected_role || self.state != State::AwaitingAccept {
            self.internal_error(StatusCode::ServerBadState);
            return;
        }

        let (mode, version, max_block_size, start_offset, length, metadata) =
            if msg_type == MessageType::SendAccept {
                match SendAcceptMessage::decode(&body) {
                    Ok(m) => (m.mode, m.version, m.max_block_size, None, None, m.metadata),
                    Err(err) => {
                        self.internal_error(err.status_code());
                        return;
                    }
                }
            } else {
                match ReceiveAcceptMessage::decode(&body) {
                    Ok(m) => (
                        m.mode,
                        m.version,
                        m.max_block_size,
                        Some(m.start_offset),
                        Some(m.length),
                        m.metadata,
                    ),
                    Err(err) => {
                        self.internal_error(err.status_code());
                        return;
                    }
                }
            };

        if negotiate::verify(mode, self.supported_opts).is_err() || mode == ControlMode::Async {
            // SendAccept/ReceiveAccept failures are restricted to
            // ServerBadState/BadMessageContents (spec §4.3's validation
            // table) — TransferMethodNotSupported is only ever staged for
            // SendInit/ReceiveInit.
            self.internal_error(StatusCode::BadMessageContents);
            return;
        }
        if max_block_size > self.max_supported_block_size {
            self.internal_error(StatusCode::BadMessageContents);
            return;
        }

        self.negotiated_block_size = max_block_size;
        self.control_mode = Some(mode);
        self.peer_version = version;
        if let Some(so) = start_offset {
            self.start_offset = so;
        }
        if let Some(len) = length {
            self.transfer_length = len;
        }
        self.state = State::InProgress;
        self.awaiting_response = self.is_passive_side(mode);
        debug!(?mode, "Accept received -> InProgress");
        self.stage(Event::AcceptReceived {
            accept_data: AcceptData {
                mode,
                version,
                max_block_size,
                start_offset,
                length,
                metadata,
            },
            buffer: body,
        });
    }

    fn handle_block_query(&mut self, body: Bytes) {
        if self.role != Role::Sender || self.state != State::InProgress || !self.awaiting_response
        {
            self.internal_error(StatusCode::ServerBadState);
            return;
        }
        let counter = match CounterMessage::decode(&body) {
            Ok(m) => m.block_counter,
            Err(err) => {
                self.internal_error(err.status_code());
                return;
            }
        };
        if counter != self.next_block_num {
            self.internal_error(StatusCode::BadBlockCounter);
            return;
        }
        self.awaiting_response = false;
        self.stage(Event::QueryReceived);
    }

    fn handle_block(&mut self, body: Bytes, is_eof: bool) {
        if self.role != Role::Receiver
            || self.state != State::InProgress
            || !self.awaiting_response
        {
            self.internal_error(StatusCode::ServerBadState);
            return;
        }
        let block = match BlockMessage::decode(&body) {
            Ok(block) => block,
            Err(err) => {
                self.internal_error(err.status_code());
                return;
            }
        };
        if block.block_counter != self.last_query_num {
            self.internal_error(StatusCode::BadBlockCounter);
            return;
        }
        let len = block.data.len();
        if len == 0 && !is_eof {
            self.internal_error(StatusCode::BadMessageContents);
            return;
        }
        if len > self.negotiated_block_size as usize {
            self.internal_error(StatusCode::BadMessageContents);
            return;
        }
        if self.transfer_length > 0
            && self.num_bytes_processed + len as u64 > self.transfer_length
        {
            self.internal_error(StatusCode::LengthMismatch);
            return;
        }

        self.last_block_num = block.block_counter;
        self.num_bytes_processed += len as u64;
        self.awaiting_response = false;
        if is_eof {
            self.state = State::ReceivedEof;
        }
        self.stage(Event::BlockReceived {
            block_data: BlockEventData {
                block_counter: block.block_counter,
                data: block.data,
                is_eof,
            },
            buffer: body,
        });
    }

    fn handle_block_ack(&mut self, body: Bytes) {
        if self.role != Role::Sender || self.state != State::InProgress || !self.awaiting_response
        {
            self.internal_error(StatusCode::ServerBadState);
            return;
        }
        let counter = match CounterMessage::decode(&body) {
            Ok(m) => m.block_counter,
            Err(err) => {
                self.internal_error(err.status_code());
                return;
            }
        };
        if counter != self.last_block_num {
            self.internal_error(StatusCode::BadBlockCounter);
            return;
        }
        match self.control_mode {
            // A BlockQuery must still follow under ReceiverDrive; this ack
            // only confirms receipt.
            Some(ControlMode::ReceiverDrive) => {
                self.stage(Event::AckReceived);
            }
            // Open question (unresolved in the source this was distilled
            // from): a BlockAck while driving under SenderDrive is treated
            // here as unexpected, per the validation table rather than the
            // `PrepareBlockAck` prose's "implicit query" description.
            _ => {
                self.internal_error(StatusCode::ServerBadState);
            }
        }
    }

    fn handle_block_ack_eof(&mut self, body: Bytes) {
        if self.role != Role::Sender
            || self.state != State::AwaitingEofAck
            || !self.awaiting_response
        {
            self.internal_error(StatusCode::ServerBadState);
            return;
        }
        let counter = match CounterMessage::decode(&body) {
            Ok(m) => m.block_counter,
            Err(err) => {
                self.internal_error(err.status_code());
                return;
            }
        };
        if counter != self.last_block_num {
            self.internal_error(StatusCode::BadBlockCounter);
            return;
        }
        self.state = State::Done;
        self.awaiting_response = false;
        self.stage(Event::AckEofReceived);
    }

    /// Parsing of the peer's `StatusReport` body is out of scope (spec
    /// §1, §7); the raw bytes beyond the status code are surfaced as-is.
    fn handle_status_report(&mut self, body: Bytes) {
        match StatusReportMessage::decode(&body) {
            Ok(report) => self.stage(Event::StatusReceived {
                status_data: StatusData {
                    status_code: report.status_code,
                    body: report.body,
                },
            }),
            Err(err) => self.internal_error(err.status_code()),
        }
    }

    /// Transition to `Error`, staging an outbound `StatusReport` carrying
    /// `status_code` (spec §4.3; the exact `StatusReport` wire content
    /// beyond the status code itself is left undefined upstream — see
    /// `DESIGN.md`).
    pub fn abort_transfer(&mut self, status_code: StatusCode) -> Result<()> {
        if self.pending_output.is_some() {
            return Err(SessionError::OutputPending);
        }
        let msg = StatusReportMessage::new(status_code);
        let buffer = with_header_prefix(MessageType::StatusReport, msg.encode());
        self.state = State::Error;
        self.awaiting_response = false;
        self.stage(Event::MsgToSend {
            buffer: Bytes::from(buffer),
        });
        Ok(())
    }

    /// Consume at most one staged item; if nothing is staged and the
    /// session has been `awaiting_response` past its timeout, emit
    /// `TransferTimeout` and move to `Error` (spec §4.3, §5).
    pub fn poll_output(&mut self, now: u64) -> Event {
        if let Some(event) = self.pending_output.take() {
            if matches!(event, Event::MsgToSend { .. }) {
                self.timeout_start_ms = now;
            }
            return event;
        }
        if self.awaiting_response
            && now.saturating_sub(self.timeout_start_ms) >= u64::from(self.timeout_ms)
        {
            error!(now, timeout_start_ms = self.timeout_start_ms, timeout_ms = self.timeout_ms, "transfer timed out");
            self.state = State::Error;
            self.awaiting_response = false;
            return Event::TransferTimeout;
        }
        Event::None
    }

    /// Return the session to `Idle` with every counter, flag, and buffer
    /// cleared — a left identity: `reset(); op` behaves like `op` on a
    /// freshly constructed session (spec §8).
    pub fn reset(&mut self) {
        let limits = SessionLimits {
            supported_opts: self.supported_opts,
            max_block_size: self.max_supported_block_size,
            timeout_ms: self.timeout_ms,
            local_version: self.local_version,
        };
        *self = Self::new(limits);
    }
}
