//! The state catalog: builds `StateBehavior` instances from a flow node's
//! declared `class` and `params`.
//!
//! # Design
//!
//! Each state kind is a [`StateFactory`] registered under the `class` name a
//! flow document uses to reference it, in a `HashMap` keyed by that string.
//! This is the same shape as a type-erased component registry keyed by
//! `TypeId`, just keyed by a configuration string instead — a flow document
//! names state kinds as data, not as Rust types, so there is no `TypeId` to
//! key on in the first place.

use std::collections::HashMap;

use wheelly_agent::{AgentError, AgentResult, Flow, StateBehavior, StateFactory};

/// Registry of state-kind constructors, keyed by class name.
#[derive(Default)]
pub struct StateCatalog {
    factories: HashMap<String, Box<dyn StateFactory>>,
}

impl StateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under its own [`StateFactory::class`] name.
    /// Registering the same class twice replaces the earlier entry.
    pub fn register(&mut self, factory: Box<dyn StateFactory>) {
        self.factories.insert(factory.class().to_string(), factory);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    pub fn build(&self, node: &wheelly_agent::StateNode) -> AgentResult<Box<dyn StateBehavior>> {
        self.factories
            .get(&node.class)
            .ok_or_else(|| AgentError::UnknownKind(node.class.clone()))?
            .build(node)
    }

    /// Build every state in `flow`'s arena, in node-id order — the shape
    /// [`wheelly_agent::Interpreter::new`] expects.
    pub fn build_all(&self, flow: &Flow) -> AgentResult<Vec<Box<dyn StateBehavior>>> {
        flow.states.iter().map(|n| self.build(n)).collect()
    }

    /// A catalog pre-populated with every state kind this crate implements.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register(Box::new(crate::halt_scan::HaltScanFactory));
        catalog.register(Box::new(crate::mapping::MappingFactory));
        catalog.register(Box::new(crate::avoiding::AvoidingFactory));
        catalog.register(Box::new(crate::exploring_point::ExploringPointFactory));
        catalog.register(Box::new(crate::label_point::LabelPointFactory));
        catalog.register(Box::new(crate::move_to::MoveToFactory));
        catalog.register(Box::new(crate::move_path::MovePathFactory));
        catalog.register(Box::new(crate::find::FindLabelFactory));
        catalog.register(Box::new(crate::find::FindUnknownFactory));
        catalog.register(Box::new(crate::find::FindRefreshFactory));
        catalog.register(Box::new(crate::label_stuck::LabelStuckFactory));
        catalog.register(Box::new(crate::clear_map::ClearMapFactory));
        catalog
    }
}
