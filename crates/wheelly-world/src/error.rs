use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("configuration error: {0}")]
    Config(String),
}

pub type WorldResult<T> = Result<T, WorldError>;
