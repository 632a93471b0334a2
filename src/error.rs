//! All error types for the localizable crate.
//!
//! Only loading operations (configuration, pack snapshots) can fail. String
//! resolution and locale switching never return errors; they degrade to the
//! key or the raw placeholder token instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid locale identifier `{0}`")]
    InvalidIdentifier(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),
}

impl Error {
    /// Creates a new invalid resource error
    pub fn invalid_resource(message: impl Into<String>) -> Self {
        Error::InvalidResource(message.into())
    }
}
