//! The shared key-value store read and written by state hooks and the VM.

use std::collections::HashMap;

use crate::error::{AgentError, AgentResult};
use crate::value::Value;

/// Typed key-value store shared across every state in a flow.
///
/// Keys are dot-scoped strings by convention (`move.target`, `scan.phase`)
/// so unrelated states can namespace their entries without collision, but
/// the store itself treats a key as an opaque string — scoping is a naming
/// convention, not an enforced structure.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Blackboard {
    entries: HashMap<String, Value>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_cloned(&self, key: &str) -> AgentResult<Value> {
        self.entries.get(key).cloned().ok_or_else(|| AgentError::UnknownKey(key.to_string()))
    }

    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop every entry whose key starts with `prefix` — states call this on
    /// `exit` to clear their own per-step scratch entries.
    pub fn clear_scope(&mut self, prefix: &str) {
        self.entries.retain(|k, _| !k.starts_with(prefix));
    }
}
