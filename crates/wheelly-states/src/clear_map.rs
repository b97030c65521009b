//! `ClearMap`: purges the radar grid and marker set, then completes.

use wheelly_agent::{AgentResult, Command, StateBehavior, StateFactory, StateNode, StepContext, StepResult};

pub struct ClearMapFactory;

impl StateFactory for ClearMapFactory {
    fn class(&self) -> &str {
        "ClearMap"
    }

    fn build(&self, _node: &StateNode) -> AgentResult<Box<dyn StateBehavior>> {
        Ok(Box::new(ClearMapState { issued: false }))
    }
}

/// The radar grid's only mutator is the world modeller, so this state can't
/// purge it directly — it issues a `ClearMap` command on entry and reports
/// `completed` the tick after, once the controller has had a chance to
/// apply it.
struct ClearMapState {
    issued: bool,
}

impl StateBehavior for ClearMapState {
    fn entry(&mut self, _ctx: &mut StepContext<'_>) {
        self.issued = false;
    }

    fn step(&mut self, _ctx: &mut StepContext<'_>) -> StepResult {
        if self.issued {
            StepResult::with_event("completed")
        } else {
            self.issued = true;
            StepResult::with_commands(vec![Command::ClearMap])
        }
    }
}
