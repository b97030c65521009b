//! `wheelly-agent` — the blackboard/VM (C6) and state machine interpreter (C7).
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |----------------|----------------------------------------------------------------|
//! | [`value`]      | `Value` — the tagged type shared by blackboard and VM stack    |
//! | [`blackboard`] | `Blackboard` — the dot-scoped shared key-value store            |
//! | [`vm`]         | `Op`, `Vm` — the command stack machine                          |
//! | [`flow`]       | `Flow`, `FlowDoc`, … — the declarative state graph and its loader|
//! | [`command`]    | `Command`, `StepResult` — per-tick output envelope               |
//! | [`context`]    | `StepContext<'a>` — the read/write view handed to a state        |
//! | [`state`]      | `StateBehavior`, `StateFactory`, `Interpreter`                   |
//! | [`noop`]       | `NoopState` — placeholder behavior                               |
//! | [`error`]      | `AgentError`, `AgentResult<T>`                                   |
//!
//! # Design notes
//!
//! The interpreter owns exactly one mutable resource per tick, the
//! blackboard; `StepContext::world` is a read-only snapshot produced by
//! `wheelly-world` and must not be retained past the call. Transition
//! evaluation is deterministic given the same flow and the same sequence of
//! raised events — see [`state::Interpreter::step`] for the exact ordering.

pub mod blackboard;
pub mod command;
pub mod context;
pub mod error;
pub mod flow;
pub mod noop;
pub mod state;
pub mod value;
pub mod vm;


pub use blackboard::Blackboard;
pub use command::{Command, StepResult};
pub use context::StepContext;
pub use error::{AgentError, AgentResult};
pub use flow::{Flow, FlowDoc, Param, StateConfig, StateNode, Transition, TransitionConfig, SCHEMA_VERSION};
pub use noop::NoopState;
pub use state::{Interpreter, StateBehavior, StateFactory};
pub use value::Value;
pub use vm::{Op, Vm};
