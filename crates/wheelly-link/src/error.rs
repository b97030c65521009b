use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("no reply within the serial timeout")]
    Timeout,

    #[error("link transport closed")]
    TransportClosed,

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LinkResult<T> = Result<T, LinkError>;
