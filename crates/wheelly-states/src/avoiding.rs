//! `Avoiding`: backs away from whichever side is blocked until it clears.

use wheelly_agent::{AgentResult, Command, StateBehavior, StateFactory, StateNode, StepContext, StepResult};
use wheelly_core::Millis;

use crate::params::{integer, number};

pub struct AvoidingFactory;

impl StateFactory for AvoidingFactory {
    fn class(&self) -> &str {
        "Avoiding"
    }

    fn build(&self, node: &StateNode) -> AgentResult<Box<dyn StateBehavior>> {
        let speed = number(&node.params, "speed_pps", 100.0) as i32;
        let valid_ms = integer(&node.params, "command_valid_ms", 300);
        let timeout_ms = integer(&node.params, "timeout_ms", 5_000);
        Ok(Box::new(AvoidingState { speed, valid_ms, timeout_ms, entered_at: Millis::ZERO }))
    }
}

struct AvoidingState {
    speed: i32,
    valid_ms: i64,
    timeout_ms: i64,
    entered_at: Millis,
}

impl StateBehavior for AvoidingState {
    fn entry(&mut self, ctx: &mut StepContext<'_>) {
        self.entered_at = ctx.now;
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> StepResult {
        if !ctx.world.front_blocked && !ctx.world.rear_blocked {
            return StepResult::with_event("completed");
        }

        if ctx.now.since(self.entered_at) >= self.timeout_ms {
            return StepResult::with_event("notFound");
        }

        let valid_to = ctx.now.plus(self.valid_ms);
        let command = if ctx.world.front_blocked {
            Command::Motors { left: -self.speed, right: -self.speed, valid_to }
        } else {
            Command::Motors { left: self.speed, right: self.speed, valid_to }
        };
        StepResult::with_commands(vec![command])
    }
}
