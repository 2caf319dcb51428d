use crate::model::EntityKind;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CourseDeskError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("Parent {kind} does not exist: {id}")]
    MissingParent { kind: EntityKind, id: Uuid },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, CourseDeskError>;
