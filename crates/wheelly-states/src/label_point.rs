//! `LabelPoint`: targets the nearest known marker.

use wheelly_agent::{AgentResult, StateBehavior, StateFactory, StateNode, StepContext, StepResult, Value};
use wheelly_world::MarkerDecay;

use crate::params::{number, text};

pub struct LabelPointFactory;

impl StateFactory for LabelPointFactory {
    fn class(&self) -> &str {
        "LabelPoint"
    }

    fn build(&self, node: &StateNode) -> AgentResult<Box<dyn StateBehavior>> {
        let safe_distance = number(&node.params, "safe_distance", 0.4);
        let max_distance = number(&node.params, "max_distance", 3.0);
        let decay_ms = number(&node.params, "decay_ms", 10_000.0) as i64;
        let label = text(&node.params, "label").map(str::to_string);
        Ok(Box::new(LabelPointState { safe_distance, max_distance, decay_ms, label }))
    }
}

struct LabelPointState {
    safe_distance: f64,
    max_distance: f64,
    decay_ms: i64,
    label: Option<String>,
}

impl StateBehavior for LabelPointState {
    fn step(&mut self, ctx: &mut StepContext<'_>) -> StepResult {
        let from = ctx.world.robot_status.pose.location();
        let decay = MarkerDecay { decay_ms: self.decay_ms, clean_decay_ms: i64::MAX };
        let nearest = ctx.world.markers.nearest(
            from,
            self.label.as_deref(),
            self.safe_distance,
            self.max_distance,
            ctx.now,
            decay,
        );

        match nearest {
            Some(marker) => {
                let direction = from.bearing_to(marker.position);
                ctx.blackboard.put("nav.target", Value::Point(marker.position));
                ctx.blackboard.put("nav.direction", Value::Bearing(direction));
                StepResult::with_event("completed")
            }
            None => StepResult::with_event("notFound"),
        }
    }
}
