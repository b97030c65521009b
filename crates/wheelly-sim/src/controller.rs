//! The `Controller` struct and its reaction loop.

use wheelly_agent::{Blackboard, Command, Interpreter, StepContext, StepResult};
use wheelly_core::{Clock, Deadline, LinkStatus, Message, Millis};
use wheelly_link::{LinkError, LinkResult, RetryPolicy, RobotLink};
use wheelly_world::WorldModeller;

use crate::{ControllerObserver, SimError, SimResult};

/// Couples the world modeller, the state machine interpreter, and a robot
/// link, and drives them at a fixed reaction period.
///
/// Each [`step`][Self::step] pulls telemetry, advances the modeller, steps
/// the interpreter, and dispatches the commands it returns — see the crate
/// doc comment for the exact tick sequence. Create via
/// [`ControllerBuilder`][crate::ControllerBuilder].
pub struct Controller<L: RobotLink> {
    link: L,
    modeller: WorldModeller,
    blackboard: Blackboard,
    interpreter: Interpreter,
    reaction: Deadline,
    command_interval_ms: i64,
    slack_ms: i64,
    retry: Box<dyn RetryPolicy>,
    status: LinkStatus,
    consecutive_timeouts: u32,
    clock_token: u32,
    clock_offset_ms: i64,
}

impl<L: RobotLink> Controller<L> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        link: L,
        modeller: WorldModeller,
        blackboard: Blackboard,
        interpreter: Interpreter,
        now: Millis,
        reaction_interval_ms: i64,
        command_interval_ms: i64,
        slack_ms: i64,
        retry: Box<dyn RetryPolicy>,
    ) -> Self {
        Self {
            link,
            modeller,
            blackboard,
            interpreter,
            reaction: Deadline::starting_at(now.plus(reaction_interval_ms), reaction_interval_ms),
            command_interval_ms,
            slack_ms,
            retry,
            status: LinkStatus::Connecting,
            consecutive_timeouts: 0,
            clock_token: 0,
            clock_offset_ms: 0,
        }
    }

    pub fn status(&self) -> LinkStatus {
        self.status
    }

    pub fn current_state(&self) -> wheelly_core::StateId {
        self.interpreter.current()
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// The offset, in milliseconds, last computed from a clock-sync reply
    /// and applied to subsequent telemetry timestamps.
    pub fn clock_offset_ms(&self) -> i64 {
        self.clock_offset_ms
    }

    /// `true` once `now` has reached the next reaction deadline. Exposed
    /// separately from [`poll`][Self::poll] for callers that want to observe
    /// the schedule without stepping.
    pub fn reaction_due(&self, now: Millis) -> bool {
        now.at_or_after(self.reaction.next())
    }

    /// Send a fresh clock-sync request, correlated by an internally
    /// incrementing token.
    pub fn sync_clock(&mut self) -> SimResult<()> {
        let token = self.clock_token;
        self.clock_token = self.clock_token.wrapping_add(1);
        self.send(|link| link.clock_sync(token))
    }

    /// Run one reaction tick if `now` has reached the schedule, advancing it
    /// to the next period; otherwise a no-op. This is what
    /// [`run`][Self::run] calls every loop iteration.
    pub fn poll(&mut self, now: Millis) -> SimResult<Option<StepResult>> {
        if self.reaction.poll(now) {
            Ok(Some(self.step(now)?))
        } else {
            Ok(None)
        }
    }

    /// Drive the reaction loop using `clock` until `clock.now()` reaches
    /// `until`, calling `observer`'s hooks around every tick that actually
    /// runs.
    pub fn run<O: ControllerObserver>(&mut self, clock: &dyn Clock, until: Millis, observer: &mut O) -> SimResult<()> {
        loop {
            let now = clock.now();
            if now.at_or_after(until) {
                break;
            }
            let before = self.status;
            observer.on_tick_start(now);
            if let Some(result) = self.poll(now)? {
                observer.on_tick_end(now, &result);
                if self.status != before {
                    observer.on_status_change(now, before, self.status);
                }
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        observer.on_stop(self.status);
        Ok(())
    }

    /// Run one reaction tick unconditionally, ignoring the schedule.
    /// Pulls telemetry, advances the modeller, steps the interpreter, and
    /// dispatches the commands it emits.
    pub fn step(&mut self, now: Millis) -> SimResult<StepResult> {
        let mut messages = self.link.drain_messages();
        messages.sort_by_key(Message::time);
        let overflowed = self.link.take_overflow_count();

        if let Some((_, t0, t1)) = self.link.take_clock_ack() {
            self.clock_offset_ms = ((t0.0 + t1.0) / 2) - now.0;
        }
        if self.clock_offset_ms != 0 {
            for message in &mut messages {
                adjust_time(message, self.clock_offset_ms);
            }
        }

        let result = {
            let world = self.modeller.step(&messages, now);
            let mut ctx = StepContext::new(&world, &mut self.blackboard, now);
            self.interpreter.step(&mut ctx)?
        };

        for command in result.commands.iter().copied() {
            self.dispatch(command, now)?;
        }

        if overflowed > 0 {
            tracing::warn!(now = now.0, dropped = overflowed, "telemetry queue overflowed, oldest samples dropped");
            if self.status == LinkStatus::Connected {
                self.status = LinkStatus::Degraded;
            }
        }

        Ok(result)
    }

    /// Halt the robot with `grace_ms` of validity and close the link. The
    /// caller's current tick is assumed already complete.
    pub fn stop(&mut self, now: Millis, grace_ms: i64) -> SimResult<()> {
        self.send(|link| link.send_halt(now.plus(grace_ms)))?;
        self.link.close();
        Ok(())
    }

    fn dispatch(&mut self, command: Command, now: Millis) -> SimResult<()> {
        match command {
            Command::Motors { left, right, valid_to } => {
                if self.status == LinkStatus::Failed {
                    self.send(|link| link.send_halt(valid_to))
                } else {
                    self.send(|link| link.send_motors(left, right, valid_to))
                }
            }
            Command::Scan { deg } => self.send(|link| link.send_scan(deg.round() as i32)),
            Command::Halt => self.send(|link| link.send_halt(now.plus(self.command_interval_ms + self.slack_ms))),
            Command::QueryStatus => self.send(|link| link.send_query_status()),
            Command::ClearMap => {
                self.modeller.reset();
                Ok(())
            }
        }
    }

    /// Attempt `attempt`, retrying transient timeouts per `self.retry`.
    /// `TransportClosed`/`Protocol` propagate immediately as fatal; a
    /// timeout that exhausts its retries degrades the link instead of
    /// failing the tick.
    fn send<F>(&mut self, mut attempt: F) -> SimResult<()>
    where
        F: FnMut(&mut L) -> LinkResult<()>,
    {
        let mut tries = 0u32;
        loop {
            match attempt(&mut self.link) {
                Ok(()) => {
                    self.consecutive_timeouts = 0;
                    self.status = LinkStatus::Connected;
                    return Ok(());
                }
                Err(LinkError::Timeout) => {
                    tries += 1;
                    if self.retry.should_retry(tries, &LinkError::Timeout) {
                        continue;
                    }
                    self.consecutive_timeouts += 1;
                    self.status =
                        if self.consecutive_timeouts >= 3 { LinkStatus::Failed } else { LinkStatus::Degraded };
                    return Ok(());
                }
                Err(other) => return Err(SimError::from(other)),
            }
        }
    }
}

fn adjust_time(message: &mut Message, offset_ms: i64) {
    let time = match message {
        Message::Motion(m) => &mut m.time,
        Message::Proximity(m) => &mut m.time,
        Message::Contact(m) => &mut m.time,
        Message::Camera(m) => &mut m.time,
        Message::Supply(m) => &mut m.time,
        Message::Ack(m) => &mut m.time,
    };
    *time = time.plus(offset_ms);
}
