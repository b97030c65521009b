//! `TelemetryQueue` — the bounded lock-free hand-off between a link's
//! inbound parsing and the reactor's tick-top drain.
//!
//! A dedicated I/O thread (or, for [`FakeLink`](crate::FakeLink), the test
//! itself) pushes parsed telemetry as it arrives; the reactor drains
//! whatever has accumulated once per tick. If the producer outruns the
//! consumer the queue drops the oldest entry rather than blocking or
//! growing unbounded, and counts the drop so the caller can surface it.

use std::sync::atomic::{AtomicU32, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use wheelly_core::Message;

/// Default capacity: generous for the ~3-5 messages a reaction tick
/// typically drains, while still bounding memory if the link starves the
/// reactor for a few ticks.
pub const DEFAULT_CAPACITY: usize = 64;

pub struct TelemetryQueue {
    tx: Sender<Message>,
    rx: Receiver<Message>,
    overflowed: AtomicU32,
}

impl TelemetryQueue {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity.max(1));
        Self { tx, rx, overflowed: AtomicU32::new(0) }
    }

    /// Push one message, dropping the oldest queued one if at capacity.
    pub fn push(&self, message: Message) {
        match self.tx.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(message)) => {
                let _ = self.rx.try_recv();
                let _ = self.tx.try_send(message);
                self.overflowed.fetch_add(1, Ordering::Relaxed);
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }

    /// Drain everything currently queued, oldest first.
    pub fn drain(&self) -> Vec<Message> {
        self.rx.try_iter().collect()
    }

    /// Number of messages dropped for overflow since the last call, reset
    /// to zero as a side effect.
    pub fn take_overflow_count(&self) -> u32 {
        self.overflowed.swap(0, Ordering::Relaxed)
    }
}

impl Default for TelemetryQueue {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
