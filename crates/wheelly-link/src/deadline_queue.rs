//! `DeadlineQueue` — sparse expiry tracking for outstanding motor commands.
//!
//! # Why this exists
//!
//! A `sendMotors` command is valid only until its `validToMs` deadline; if no
//! refresh arrives first the robot auto-halts. The controller needs to know,
//! cheaply, whether the command it last sent is about to expire so it can
//! refresh or replace it — without scanning unrelated state every tick.
//!
//! This mirrors a wake-queue: most ticks nothing expires, so the queue is
//! keyed by deadline and only the entries due by `now` are drained.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) insert/drain where W is the number of distinct
//! outstanding deadlines — for one robot with one outstanding command at a
//! time, W is 0 or 1 in steady state; the structure exists mainly to make
//! "is anything due" a cheap `next_deadline()` peek rather than to handle
//! scale.

use std::collections::BTreeMap;

use wheelly_core::Millis;

/// A priority queue mapping absolute deadlines to tokens due at that time.
#[derive(Default)]
pub struct DeadlineQueue<T> {
    inner: BTreeMap<Millis, Vec<T>>,
    total: usize,
}

impl<T> DeadlineQueue<T> {
    pub fn new() -> Self {
        Self { inner: BTreeMap::new(), total: 0 }
    }

    /// Schedule `token` to be reported as due once `now >= deadline`.
    pub fn push(&mut self, deadline: Millis, token: T) {
        self.inner.entry(deadline).or_default().push(token);
        self.total += 1;
    }

    /// Remove and return every token whose deadline has passed (`<= now`),
    /// earliest first.
    pub fn drain_due(&mut self, now: Millis) -> Vec<T> {
        let still_future = self.inner.split_off(&Millis(now.0 + 1));
        let due: Vec<T> = std::mem::replace(&mut self.inner, still_future)
            .into_values()
            .flatten()
            .collect();
        self.total -= due.len();
        due
    }

    /// The earliest outstanding deadline, or `None` if the queue is empty.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Drop every outstanding deadline — used when a fresh command
    /// supersedes whatever was previously in flight.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}
