#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StreamingError {
    #[error("Could not parse: {}", _0)]
    Parse(#[from] serde_json::Error),

    #[error("Jump tolerance must not be negative, but got {}", _0)]
    InvalidTolerance(i32),
}

pub type Result<T, E = StreamingError> = std::result::Result<T, E>;
