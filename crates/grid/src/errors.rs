#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Must specify {}", _0)]
    Missing(&'static str),

    #[error("Maps must be square, but got {}x{} cells", width, height)]
    NonSquareMap { width: i32, height: i32 },

    #[error("Got invalid tile size {}x{}", width, height)]
    InvalidTileSize { width: f64, height: f64 },

    #[error("Got invalid map size {}x{}", width, height)]
    InvalidMapSize { width: f64, height: f64 },

    #[error("Got non-finite anchor offset ({}, {})", x, y)]
    InvalidAnchor { x: f64, y: f64 },

    #[error("Got invalid viewport size {}x{}", width, height)]
    InvalidViewport { width: f64, height: f64 },
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
