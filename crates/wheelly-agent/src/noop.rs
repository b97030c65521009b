//! A no-op state behavior — produces no commands and never raises an event.

use crate::command::StepResult;
use crate::context::StepContext;
use crate::state::StateBehavior;

/// A [`StateBehavior`] that does nothing on every hook.
///
/// Useful as a placeholder in tests, or for a catalog slot whose class is
/// declared in a flow but not yet implemented.
pub struct NoopState;

impl StateBehavior for NoopState {
    fn step(&mut self, _ctx: &mut StepContext<'_>) -> StepResult {
        StepResult::none()
    }
}
