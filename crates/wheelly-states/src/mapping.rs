//! `Mapping`: rotates in place until every polar sector has at least one
//! observation.

use wheelly_agent::{AgentResult, Command, StateBehavior, StateFactory, StateNode, StepContext, StepResult};
use wheelly_core::Millis;
use wheelly_radar::SectorState;

use crate::params::integer;

pub struct MappingFactory;

impl StateFactory for MappingFactory {
    fn class(&self) -> &str {
        "Mapping"
    }

    fn build(&self, node: &StateNode) -> AgentResult<Box<dyn StateBehavior>> {
        let rotate_pps = integer(&node.params, "rotate_pps", 80) as i32;
        let timeout_ms = integer(&node.params, "timeout_ms", 10_000);
        let valid_ms = integer(&node.params, "command_valid_ms", 300);
        Ok(Box::new(MappingState { rotate_pps, timeout_ms, valid_ms, entered_at: Millis::ZERO }))
    }
}

struct MappingState {
    rotate_pps: i32,
    timeout_ms: i64,
    valid_ms: i64,
    entered_at: Millis,
}

impl StateBehavior for MappingState {
    fn entry(&mut self, ctx: &mut StepContext<'_>) {
        self.entered_at = ctx.now;
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> StepResult {
        let fully_covered = ctx.world.polar.sectors().iter().all(|s| s.state != SectorState::Unknown);

        if fully_covered {
            return StepResult::with_event("completed");
        }

        let timed_out = ctx.now.since(self.entered_at) >= self.timeout_ms;
        let commands =
            vec![Command::Motors { left: self.rotate_pps, right: -self.rotate_pps, valid_to: ctx.now.plus(self.valid_ms) }];

        StepResult { commands, event: timed_out.then(|| "notFound".to_string()) }
    }
}
