//! Flow configuration: the declarative state graph loaded from YAML/JSON.
//!
//! A flow document is an arena of state nodes addressed by small integer
//! ids once loaded — transitions store target ids, not references, so the
//! graph can be cyclic without any ownership headaches and (de)serializes
//! trivially.

use std::collections::HashMap;

use wheelly_core::StateId;

use crate::error::{AgentError, AgentResult};
use crate::vm::Op;

/// The only schema version this loader accepts. See the Open Question
/// decision in the project's design notes: a fixed version now, migration
/// machinery deferred until a second version actually exists.
pub const SCHEMA_VERSION: u32 = 1;

/// A scalar configuration value for a state's `params` map.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Param {
    Number(f64),
    Integer(i64),
    Text(String),
    Bool(bool),
    List(Vec<Param>),
}

impl Param {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Param::Number(n) => Some(*n),
            Param::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Param::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Param::Integer(n) => Some(*n),
            Param::Number(n) => Some(*n as i64),
            _ => None,
        }
    }
}

/// One outgoing edge of a state, evaluated in declared order.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TransitionConfig {
    pub event: String,
    pub to: String,
    #[serde(default)]
    pub on_transition: Vec<Op>,
}

/// One state as it appears in the source document, before name→id
/// resolution.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StateConfig {
    pub id: String,
    pub class: String,
    #[serde(default)]
    pub params: HashMap<String, Param>,
    #[serde(default)]
    pub transitions: Vec<TransitionConfig>,
    #[serde(default)]
    pub on_init: Vec<Op>,
    #[serde(default)]
    pub on_entry: Vec<Op>,
    #[serde(default)]
    pub on_exit: Vec<Op>,
}

/// The raw document shape, as it sits on disk.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FlowDoc {
    pub version: u32,
    pub entry: String,
    pub states: Vec<StateConfig>,
}

/// A resolved outgoing edge: a state id and the ops to run when it is
/// taken.
#[derive(Clone, Debug, Default)]
pub struct Transition {
    pub event: String,
    pub to: StateId,
    pub on_transition: Vec<Op>,
}

/// A state node in the resolved arena.
#[derive(Clone, Debug)]
pub struct StateNode {
    pub id: StateId,
    pub name: String,
    pub class: String,
    pub params: HashMap<String, Param>,
    pub transitions: Vec<Transition>,
    pub on_init: Vec<Op>,
    pub on_entry: Vec<Op>,
    pub on_exit: Vec<Op>,
}

/// A fully resolved, validated flow: an arena of [`StateNode`]s plus the
/// entry id. Well-formed iff every transition's `to` resolves to a node in
/// `states`.
#[derive(Clone, Debug)]
pub struct Flow {
    pub entry: StateId,
    pub states: Vec<StateNode>,
}

impl Flow {
    pub fn node(&self, id: StateId) -> AgentResult<&StateNode> {
        self.states.get(id.index()).ok_or(AgentError::StateNotFound(id))
    }

    /// Parse and resolve a flow document from YAML text.
    pub fn load_yaml(text: &str) -> AgentResult<Flow> {
        let doc: FlowDoc = serde_yaml::from_str(text)?;
        Flow::from_doc(doc)
    }

    /// Parse and resolve a flow document from JSON text.
    pub fn load_json(text: &str) -> AgentResult<Flow> {
        let doc: FlowDoc = serde_json::from_str(text)?;
        Flow::from_doc(doc)
    }

    /// Resolve a parsed document into an arena, validating the schema
    /// version and every transition target.
    pub fn from_doc(doc: FlowDoc) -> AgentResult<Flow> {
        if doc.version != SCHEMA_VERSION {
            return Err(AgentError::ConfigInvalid(format!(
                "unsupported flow schema version {} (expected {})",
                doc.version, SCHEMA_VERSION
            )));
        }

        let mut name_to_id = HashMap::with_capacity(doc.states.len());
        for (i, state) in doc.states.iter().enumerate() {
            if name_to_id.insert(state.id.clone(), StateId(i as u32)).is_some() {
                return Err(AgentError::ConfigInvalid(format!("duplicate state id '{}'", state.id)));
            }
        }

        let resolve = |name: &str| -> AgentResult<StateId> {
            name_to_id
                .get(name)
                .copied()
                .ok_or_else(|| AgentError::ConfigInvalid(format!("transition targets unknown state '{name}'")))
        };

        let entry = resolve(&doc.entry)?;

        let mut states = Vec::with_capacity(doc.states.len());
        for (i, state) in doc.states.into_iter().enumerate() {
            let mut transitions = Vec::with_capacity(state.transitions.len());
            for t in state.transitions {
                transitions.push(Transition { event: t.event, to: resolve(&t.to)?, on_transition: t.on_transition });
            }
            states.push(StateNode {
                id: StateId(i as u32),
                name: state.id,
                class: state.class,
                params: state.params,
                transitions,
                on_init: state.on_init,
                on_entry: state.on_entry,
                on_exit: state.on_exit,
            });
        }

        Ok(Flow { entry, states })
    }
}
