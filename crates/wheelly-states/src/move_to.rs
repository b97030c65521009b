//! `MoveTo`: proportional heading control toward a blackboard-supplied
//! target point.

use wheelly_agent::{AgentResult, Command, StateBehavior, StateFactory, StateNode, StepContext, StepResult, Value};
use wheelly_core::{Point, Pose};

use crate::params::number;

pub struct MoveToFactory;

impl StateFactory for MoveToFactory {
    fn class(&self) -> &str {
        "MoveTo"
    }

    fn build(&self, node: &StateNode) -> AgentResult<Box<dyn StateBehavior>> {
        Ok(Box::new(MoveToState::from_params(node)))
    }
}

pub(crate) struct MoveToState {
    pub(crate) speed_pps: f64,
    pub(crate) stop_distance: f64,
    pub(crate) heading_gain: f64,
    pub(crate) valid_ms: i64,
    pub(crate) target_key: String,
}

impl MoveToState {
    pub(crate) fn from_params(node: &StateNode) -> Self {
        Self {
            speed_pps: number(&node.params, "speed_pps", 120.0),
            stop_distance: number(&node.params, "stop_distance", 0.1),
            heading_gain: number(&node.params, "heading_gain", 2.0),
            valid_ms: number(&node.params, "command_valid_ms", 300.0) as i64,
            target_key: "nav.target".to_string(),
        }
    }

    /// One proportional-control step toward `target`. `None` once within
    /// `stop_distance`.
    pub(crate) fn drive_toward(&self, pose: Pose, target: Point, now: wheelly_core::Millis) -> Option<Command> {
        if pose.location().distance(target) <= self.stop_distance {
            return None;
        }
        let bearing = pose.location().bearing_to(target);
        let error_deg = bearing.difference_degrees(pose.heading);
        let turn = (self.heading_gain * error_deg).clamp(-self.speed_pps, self.speed_pps);
        let left = (self.speed_pps - turn).clamp(-255.0, 255.0) as i32;
        let right = (self.speed_pps + turn).clamp(-255.0, 255.0) as i32;
        Some(Command::Motors { left, right, valid_to: now.plus(self.valid_ms) })
    }
}

impl StateBehavior for MoveToState {
    fn step(&mut self, ctx: &mut StepContext<'_>) -> StepResult {
        let Some(Value::Point(target)) = ctx.blackboard.get(&self.target_key).cloned() else {
            return StepResult::none();
        };

        let pose = ctx.world.robot_status.pose;
        match self.drive_toward(pose, target, ctx.now) {
            None => StepResult::with_event("completed"),
            Some(_) if ctx.world.blocked => StepResult::with_event("blocked"),
            Some(_) if ctx.world.front_blocked => StepResult::with_event("frontBlocked"),
            Some(_) if ctx.world.rear_blocked => StepResult::with_event("rearBlocked"),
            Some(command) => StepResult::with_commands(vec![command]),
        }
    }
}
