#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RectError {
    #[error("Attempted to create a rectangle which would have an invalid width or height")]
    InvalidDims,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Rect error: {}", _0)]
    Rect(#[from] RectError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
