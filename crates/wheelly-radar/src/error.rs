use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadarError {
    #[error("grid cell ({0}, {1}) is out of bounds")]
    OutOfBounds(i32, i32),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type RadarResult<T> = Result<T, RadarError>;
