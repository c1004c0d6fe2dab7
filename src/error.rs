use std::io;

/// All error types for the geodetic engine.
#[derive(thiserror::Error, Debug)]
pub enum GeodeticError {
    #[error("Reference frame not set: call set_reference first")]
    UninitializedFrame,
    #[error("Input error: {0}")]
    Input(String),
    #[error("Output error: {0}")]
    Output(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeodeticError>;
