use wheelly_core::StateId;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("operand stack underflow")]
    StackUnderflow,

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("blackboard key not set: {0}")]
    UnknownKey(String),

    #[error("division by zero")]
    DivZero,

    #[error("flow state {0} not found")]
    StateNotFound(StateId),

    #[error("invalid flow configuration: {0}")]
    ConfigInvalid(String),

    #[error("unknown state kind: {0}")]
    UnknownKind(String),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
