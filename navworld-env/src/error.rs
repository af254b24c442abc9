//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum NavWorldError {
    /// The world identifier is not registered.
    #[error("Unknown world: {0}")]
    UnknownWorld(String),
}
