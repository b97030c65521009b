//! `RobotLink` — the bidirectional channel to the physical or simulated
//! robot, and [`FakeLink`], a deterministic in-memory test double.

use std::collections::VecDeque;

use wheelly_core::{Message, Millis};

use crate::codec;
use crate::queue::TelemetryQueue;
use crate::{LinkError, LinkResult};

/// Bidirectional message channel to the robot.
///
/// Implementors own the line-oriented encoding; callers never see raw wire
/// text. `messages()` is a drain, not a blocking read — telemetry arrives
/// asynchronously and is buffered by the implementation until collected at
/// the top of a reaction tick.
pub trait RobotLink: Send {
    fn connect(&mut self) -> LinkResult<()>;

    fn close(&mut self);

    /// `left`/`right` are clamped to `[-255, 255]` by the codec. `valid_to`
    /// is the absolute deadline, not a duration — the link transmits it as
    /// such.
    fn send_motors(&mut self, left: i32, right: i32, valid_to: Millis) -> LinkResult<()>;

    fn send_scan(&mut self, deg: i32) -> LinkResult<()>;

    fn send_halt(&mut self, valid_to: Millis) -> LinkResult<()> {
        self.send_motors(0, 0, valid_to)
    }

    fn send_query_status(&mut self) -> LinkResult<()>;

    fn clock_sync(&mut self, token: u32) -> LinkResult<()>;

    /// Drain every telemetry message received since the last call, in
    /// arrival order. Clock-sync replies are consumed internally and are
    /// not returned here — see [`RobotLink::take_clock_ack`].
    fn drain_messages(&mut self) -> Vec<Message>;

    /// Take the most recent clock-sync reply, if one has arrived since the
    /// last call.
    fn take_clock_ack(&mut self) -> Option<(u32, Millis, Millis)>;

    /// Number of telemetry messages dropped for queue overflow since the
    /// last call. Implementations backed by an unbounded buffer (or none at
    /// all) can leave the default, which always reports zero.
    fn take_overflow_count(&mut self) -> u32 {
        0
    }
}

/// A deterministic in-memory [`RobotLink`] for tests and the demo binary.
///
/// Outbound command lines are recorded verbatim in [`FakeLink::sent`];
/// inbound telemetry is injected with [`FakeLink::push_line`] /
/// [`FakeLink::push_message`] and drained the same way a real serial link
/// would be.
pub struct FakeLink {
    connected: bool,
    pub sent: Vec<String>,
    inbound: VecDeque<String>,
    pending_messages: TelemetryQueue,
    pending_ack: Option<(u32, Millis, Millis)>,
    /// If set, the next N send attempts fail with this error instead of
    /// succeeding — lets tests exercise retry/degraded-link behavior.
    pub fail_next_sends: u32,
    pub fail_with: LinkError,
}

impl Default for FakeLink {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeLink {
    pub fn new() -> Self {
        Self {
            connected: false,
            sent: Vec::new(),
            inbound: VecDeque::new(),
            pending_messages: TelemetryQueue::default(),
            pending_ack: None,
            fail_next_sends: 0,
            fail_with: LinkError::Timeout,
        }
    }

    /// Build a `FakeLink` whose inbound telemetry queue holds at most
    /// `capacity` messages before it starts dropping the oldest.
    pub fn with_queue_capacity(capacity: usize) -> Self {
        Self { pending_messages: TelemetryQueue::new(capacity), ..Self::new() }
    }

    /// Queue a raw wire line to be parsed and surfaced on the next
    /// [`RobotLink::drain_messages`] / [`RobotLink::take_clock_ack`] call.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.inbound.push_back(line.into());
    }

    pub fn push_message(&mut self, message: Message) {
        self.pending_messages.push(message);
    }

    fn maybe_fail(&mut self) -> LinkResult<()> {
        if self.fail_next_sends > 0 {
            self.fail_next_sends -= 1;
            return Err(clone_error(&self.fail_with));
        }
        Ok(())
    }

    fn parse_inbound(&mut self) {
        while let Some(line) = self.inbound.pop_front() {
            match codec::decode_line(&line) {
                Ok(codec::Frame::Telemetry(m)) => self.pending_messages.push(m),
                Ok(codec::Frame::ClockAck { token, t0, t1 }) => {
                    self.pending_ack = Some((token, t0, t1))
                }
                Err(err) => tracing::warn!(line = %line, error = %err, "dropping malformed inbound line"),
            }
        }
    }
}

fn clone_error(e: &LinkError) -> LinkError {
    match e {
        LinkError::Timeout => LinkError::Timeout,
        LinkError::TransportClosed => LinkError::TransportClosed,
        LinkError::Protocol(s) => LinkError::Protocol(s.clone()),
        LinkError::Io(io) => LinkError::Io(std::io::Error::new(io.kind(), io.to_string())),
    }
}

impl RobotLink for FakeLink {
    fn connect(&mut self) -> LinkResult<()> {
        self.connected = true;
        tracing::info!("link connected");
        Ok(())
    }

    fn close(&mut self) {
        self.connected = false;
        tracing::info!("link closed");
    }

    fn send_motors(&mut self, left: i32, right: i32, valid_to: Millis) -> LinkResult<()> {
        if !self.connected {
            return Err(LinkError::TransportClosed);
        }
        self.maybe_fail()?;
        self.sent.push(codec::encode_motors(left, right, valid_to));
        Ok(())
    }

    fn send_scan(&mut self, deg: i32) -> LinkResult<()> {
        if !self.connected {
            return Err(LinkError::TransportClosed);
        }
        self.maybe_fail()?;
        self.sent.push(codec::encode_scan(deg));
        Ok(())
    }

    fn send_query_status(&mut self) -> LinkResult<()> {
        if !self.connected {
            return Err(LinkError::TransportClosed);
        }
        self.maybe_fail()?;
        self.sent.push(codec::encode_query_status());
        Ok(())
    }

    fn clock_sync(&mut self, token: u32) -> LinkResult<()> {
        if !self.connected {
            return Err(LinkError::TransportClosed);
        }
        self.maybe_fail()?;
        self.sent.push(codec::encode_clock(token));
        Ok(())
    }

    fn drain_messages(&mut self) -> Vec<Message> {
        self.parse_inbound();
        self.pending_messages.drain()
    }

    fn take_clock_ack(&mut self) -> Option<(u32, Millis, Millis)> {
        self.parse_inbound();
        self.pending_ack.take()
    }

    fn take_overflow_count(&mut self) -> u32 {
        self.pending_messages.take_overflow_count()
    }
}
