//! Controller observer trait for progress reporting and data collection.

use wheelly_agent::StepResult;
use wheelly_core::{LinkStatus, Millis};

/// Callbacks invoked by [`Controller::run`][crate::Controller::run] at key
/// points in the reaction loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl ControllerObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, now: Millis, result: &StepResult) {
///         println!("{now}: {} command(s), event {:?}", result.commands.len(), result.event);
///     }
/// }
/// ```
pub trait ControllerObserver {
    /// Called right before a due reaction tick is processed.
    fn on_tick_start(&mut self, _now: Millis) {}

    /// Called after a reaction tick completes, with the commands and event
    /// the current state produced.
    fn on_tick_end(&mut self, _now: Millis, _result: &StepResult) {}

    /// Called whenever the link's health changes, e.g. `Connected` →
    /// `Degraded` after a missed reply, or `Degraded` → `Failed` after the
    /// third consecutive one.
    fn on_status_change(&mut self, _now: Millis, _old: LinkStatus, _new: LinkStatus) {}

    /// Called once the reactor has stopped.
    fn on_stop(&mut self, _final_status: LinkStatus) {}
}

/// A [`ControllerObserver`] that does nothing. Use when you need to call
/// `run` but don't want progress callbacks.
pub struct NoopObserver;

impl ControllerObserver for NoopObserver {}
