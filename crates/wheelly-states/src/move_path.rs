//! `MovePath`: follows a blackboard-supplied sequence of waypoints in order.

use wheelly_agent::{AgentResult, StateBehavior, StateFactory, StateNode, StepContext, StepResult, Value};

use crate::move_to::MoveToState;

pub struct MovePathFactory;

impl StateFactory for MovePathFactory {
    fn class(&self) -> &str {
        "MovePath"
    }

    fn build(&self, node: &StateNode) -> AgentResult<Box<dyn StateBehavior>> {
        Ok(Box::new(MovePathState { leg: MoveToState::from_params(node), index: 0 }))
    }
}

struct MovePathState {
    leg: MoveToState,
    index: usize,
}

impl StateBehavior for MovePathState {
    fn entry(&mut self, _ctx: &mut StepContext<'_>) {
        self.index = 0;
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> StepResult {
        let Some(Value::Path(path)) = ctx.blackboard.get("nav.path").cloned() else {
            return StepResult::none();
        };
        if self.index >= path.len() {
            return StepResult::with_event("completed");
        }

        let pose = ctx.world.robot_status.pose;
        let target = path[self.index];
        match self.leg.drive_toward(pose, target, ctx.now) {
            None => {
                self.index += 1;
                if self.index >= path.len() {
                    StepResult::with_event("completed")
                } else {
                    StepResult::none()
                }
            }
            Some(_) if ctx.world.blocked => StepResult::with_event("blocked"),
            Some(_) if ctx.world.front_blocked => StepResult::with_event("frontBlocked"),
            Some(_) if ctx.world.rear_blocked => StepResult::with_event("rearBlocked"),
            Some(command) => StepResult::with_commands(vec![command]),
        }
    }
}
