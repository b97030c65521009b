//! `LabelStuck`: watches for lack of progress toward the current target and
//! forces replanning on stall.

use wheelly_agent::{AgentResult, StateBehavior, StateFactory, StateNode, StepContext, StepResult, Value};
use wheelly_core::Millis;

use crate::params::number;

pub struct LabelStuckFactory;

impl StateFactory for LabelStuckFactory {
    fn class(&self) -> &str {
        "LabelStuck"
    }

    fn build(&self, node: &StateNode) -> AgentResult<Box<dyn StateBehavior>> {
        let window_ms = number(&node.params, "window_ms", 5_000.0) as i64;
        let min_progress_m = number(&node.params, "min_progress_m", 0.1);
        Ok(Box::new(LabelStuckState {
            window_ms,
            min_progress_m,
            window_start: Millis::ZERO,
            window_start_distance: None,
        }))
    }
}

struct LabelStuckState {
    window_ms: i64,
    min_progress_m: f64,
    window_start: Millis,
    window_start_distance: Option<f64>,
}

impl StateBehavior for LabelStuckState {
    fn entry(&mut self, ctx: &mut StepContext<'_>) {
        self.window_start = ctx.now;
        self.window_start_distance = None;
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> StepResult {
        let Some(Value::Point(target)) = ctx.blackboard.get("nav.target").cloned() else {
            return StepResult::none();
        };
        let distance = ctx.world.robot_status.pose.location().distance(target);

        let baseline = *self.window_start_distance.get_or_insert(distance);

        if ctx.now.since(self.window_start) < self.window_ms {
            return StepResult::none();
        }

        let progress = baseline - distance;
        self.window_start = ctx.now;
        self.window_start_distance = Some(distance);

        if progress < self.min_progress_m {
            StepResult::with_event("notFound")
        } else {
            StepResult::none()
        }
    }
}
