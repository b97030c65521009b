//! Commands a state can emit during `step`, and the result envelope the
//! interpreter collects them in.

use wheelly_core::Millis;

/// An action a state wants the controller to send to the robot link.
///
/// This is the interpreter-side command vocabulary; `wheelly-sim`'s
/// controller translates each variant into the matching `RobotLink` call.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Command {
    /// Drive at `left`/`right` pulses-per-second until `valid_to` unless
    /// refreshed — the wire protocol's validity-deadline contract.
    Motors { left: i32, right: i32, valid_to: Millis },
    Scan { deg: f64 },
    Halt,
    QueryStatus,
    /// Wipe the radar grid and marker set. The radar grid's only mutator is
    /// the world modeller, so a state cannot purge it directly — this asks
    /// the controller to call it on the state's behalf.
    ClearMap,
}

/// What a state's `step` returns each tick: zero or more commands to flush
/// to the link, and at most one level-triggered event for the interpreter
/// to match against the current state's transitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepResult {
    pub commands: Vec<Command>,
    pub event: Option<String>,
}

impl StepResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_event(event: impl Into<String>) -> Self {
        Self { commands: Vec::new(), event: Some(event.into()) }
    }

    pub fn with_commands(commands: Vec<Command>) -> Self {
        Self { commands, event: None }
    }
}
