//! Monotonic wall-clock time model.
//!
//! # Design
//!
//! Time is a signed 64-bit millisecond count (`Millis`).  All persistence
//! windows, decay timers, and command-validity deadlines are expressed as
//! **absolute deadlines** in this domain rather than durations — a cell is
//! "hindered" while `echo_ts + echo_persistence > now`, not while some
//! separately-ticking countdown is nonzero.  This keeps `clean(now)` and
//! `state_of(now)` pure functions of `now` and the stored timestamps, with no
//! hidden mutable countdown state to drift out of sync.
//!
//! `i64` (not `u64`) because deadlines computed as `now - persistence` must be
//! able to go negative before the process has been up long enough, and that
//! must compare as "in the past", not wrap around.

use std::fmt;
use std::time::Instant;

// ── Millis ────────────────────────────────────────────────────────────────────

/// An absolute point in monotonic time, in milliseconds.
///
/// Arithmetic saturates nowhere — callers are expected to reason in a window
/// where overflow cannot occur (a `Millis` built from `Instant::elapsed` never
/// approaches `i64::MAX`).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub i64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// `self` plus `n` milliseconds.
    #[inline]
    pub fn plus(self, n: i64) -> Millis {
        Millis(self.0 + n)
    }

    /// Milliseconds elapsed from `earlier` to `self`.  May be negative if
    /// `earlier` is actually later.
    #[inline]
    pub fn since(self, earlier: Millis) -> i64 {
        self.0 - earlier.0
    }

    /// `true` if `self` is strictly before `deadline` — i.e. the deadline has
    /// not yet passed at `self`.
    #[inline]
    pub fn before(self, deadline: Millis) -> bool {
        self.0 < deadline.0
    }

    /// `true` if `self` is at or after `deadline` — the deadline has passed.
    #[inline]
    pub fn at_or_after(self, deadline: Millis) -> bool {
        self.0 >= deadline.0
    }
}

impl std::ops::Add<i64> for Millis {
    type Output = Millis;
    #[inline]
    fn add(self, rhs: i64) -> Millis {
        Millis(self.0 + rhs)
    }
}

impl std::ops::Sub for Millis {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: Millis) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// A source of monotonic time.
///
/// Implemented by [`MonotonicClock`] for production use and by fake clocks in
/// tests so that scan sweeps, decay, and validity deadlines can be exercised
/// deterministically without real sleeps.
pub trait Clock: Send + Sync {
    /// The current monotonic time, in milliseconds since the clock was
    /// created.
    fn now(&self) -> Millis;
}

/// A [`Clock`] backed by `std::time::Instant`.
///
/// Millisecond resolution is ample: the fastest sub-loop in the reactor
/// (`interval`, the serial poll) runs at 10 ms.
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Millis {
        Millis(self.epoch.elapsed().as_millis() as i64)
    }
}

// ── Deadline ──────────────────────────────────────────────────────────────────

/// A `(next_deadline, period)` pair for a fixed-interval periodic task.
///
/// This is the cooperative-scheduler building block the ticker uses for the
/// reaction loop, command refresh, and serial poll sub-tasks: each tick the
/// reactor calls [`Deadline::poll`] for every task and only the ones that are
/// due fire, at most once per call — missed ticks coalesce rather than queue
/// up, matching the "at most one step per source per tick" contract.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deadline {
    next: Millis,
    period_ms: i64,
}

impl Deadline {
    /// A deadline first due at `first` and recurring every `period_ms`.
    pub fn starting_at(first: Millis, period_ms: i64) -> Self {
        Self { next: first, period_ms }
    }

    /// `true` and advances to the next period if `now` has reached the
    /// deadline; otherwise leaves the deadline untouched and returns `false`.
    ///
    /// Advancing from `next` (not from `now`) keeps long-run average period
    /// exact even across occasional late polls, without ever firing twice for
    /// one missed interval.
    pub fn poll(&mut self, now: Millis) -> bool {
        if now.at_or_after(self.next) {
            self.next = self.next.plus(self.period_ms);
            true
        } else {
            false
        }
    }

    /// The next absolute deadline.
    pub fn next(&self) -> Millis {
        self.next
    }
}
