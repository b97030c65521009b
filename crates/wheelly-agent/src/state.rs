//! The `StateBehavior` trait and the interpreter that drives a flow.

use wheelly_core::StateId;

use crate::command::StepResult;
use crate::context::StepContext;
use crate::error::{AgentError, AgentResult};
use crate::flow::Flow;
use crate::vm::Vm;

/// Pluggable per-state behavior.
///
/// A state catalog entry implements this trait to supply the actual control
/// logic for one `class` named in a flow document; the interpreter calls its
/// methods at the points described in [`Interpreter::step`][Interpreter::step].
/// Implementations read and write the blackboard through `ctx` only — they
/// must not retain `ctx.world` past the call, since it is a view valid for
/// one step.
pub trait StateBehavior {
    /// Called once, for every state, when the flow starts — before any
    /// state's `entry`.
    fn init(&mut self, _ctx: &mut StepContext<'_>) {}

    /// Called when the interpreter transitions into this state, after the
    /// edge's `on_transition` hooks have run.
    fn entry(&mut self, _ctx: &mut StepContext<'_>) {}

    /// Called once per tick while this state is current. Returns the
    /// commands to flush to the link and at most one event name for
    /// transition matching.
    fn step(&mut self, ctx: &mut StepContext<'_>) -> StepResult;

    /// Called when the interpreter transitions out of this state, before the
    /// edge's `on_transition` hooks run.
    fn exit(&mut self, _ctx: &mut StepContext<'_>) {}
}

/// Builds a [`StateBehavior`] for one state node's `class` and `params`.
///
/// A state catalog is, concretely, a collection of `StateFactory`
/// implementations registered by class name.
pub trait StateFactory {
    fn class(&self) -> &str;

    fn build(&self, node: &crate::flow::StateNode) -> AgentResult<Box<dyn StateBehavior>>;
}

/// Drives a resolved [`Flow`] one tick at a time.
///
/// Construction runs every state's `init` hook once, then enters the flow's
/// declared entry state. Each call to [`step`][Self::step] runs the current
/// state's `step`, evaluates its transitions in declaration order, and
/// commits the first match — running the outgoing state's `exit`, the edge's
/// `on_transition` ops, and the incoming state's `entry` hooks and `entry()`
/// before the next tick begins.
///
/// An `on_entry` hook's own event, if it would raise one, is not visible
/// until the following tick — `entry` runs after transition evaluation for
/// the current tick has already completed.
pub struct Interpreter {
    flow: Flow,
    behaviors: Vec<Box<dyn StateBehavior>>,
    current: StateId,
    vm: Vm,
}

impl Interpreter {
    /// Build an interpreter from a resolved flow and a state built for every
    /// node, in node-id order. Runs every state's `init` and the entry
    /// state's `on_entry` hooks plus `entry()` before returning.
    pub fn new(flow: Flow, mut behaviors: Vec<Box<dyn StateBehavior>>, ctx: &mut StepContext<'_>) -> AgentResult<Self> {
        if behaviors.len() != flow.states.len() {
            return Err(AgentError::ConfigInvalid(format!(
                "expected {} state behaviors, got {}",
                flow.states.len(),
                behaviors.len()
            )));
        }

        let mut vm = Vm::new();
        for behavior in &mut behaviors {
            behavior.init(ctx);
        }

        let entry = flow.entry;
        let entry_node = flow.node(entry)?;
        vm.run(&entry_node.on_entry, ctx.blackboard)?;
        behaviors[entry.index()].entry(ctx);

        Ok(Self { flow, behaviors, current: entry, vm })
    }

    /// The state currently active.
    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    /// Run one tick: step the current state, evaluate its transitions in
    /// order, and commit the first match. Returns the commands the current
    /// state's `step` produced — these are flushed after transition
    /// evaluation, per contract, regardless of whether a transition fired.
    pub fn step(&mut self, ctx: &mut StepContext<'_>) -> AgentResult<StepResult> {
        let result = self.behaviors[self.current.index()].step(ctx);

        if let Some(event) = &result.event {
            let node = self.flow.node(self.current)?;
            let matched = node.transitions.iter().find(|t| &t.event == event).cloned();
            if let Some(transition) = matched {
                self.behaviors[self.current.index()].exit(ctx);
                self.vm.run(&transition.on_transition, ctx.blackboard)?;

                let target_node = self.flow.node(transition.to)?;
                self.vm.run(&target_node.on_entry, ctx.blackboard)?;
                self.behaviors[transition.to.index()].entry(ctx);

                self.current = transition.to;
            }
        }

        Ok(result)
    }
}
