use thiserror::Error;

use wheelly_agent::AgentError;
use wheelly_link::LinkError;
use wheelly_world::WorldError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("link transport closed")]
    TransportClosed,

    #[error("no reply within the serial timeout")]
    Timeout,

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("invalid controller configuration: {0}")]
    ConfigInvalid(String),

    #[error("telemetry queue overflow")]
    Backpressure,

    #[error("state logic error: {0}")]
    StateLogic(#[from] AgentError),

    #[error("world modeller configuration error: {0}")]
    World(#[from] WorldError),
}

impl From<LinkError> for SimError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::Timeout => SimError::Timeout,
            LinkError::TransportClosed => SimError::TransportClosed,
            LinkError::Protocol(s) => SimError::Protocol(s),
            LinkError::Io(io) => SimError::Protocol(io.to_string()),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
