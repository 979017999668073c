//! Error types for snapshot generation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("StructureDefinition has no differential.element to generate a snapshot from")]
    MissingDifferential,

    #[error("Base definition not found for resource type '{0}'")]
    BaseDefinitionNotFound(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedInput(e.to_string())
    }
}
