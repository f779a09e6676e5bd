use fintrack_domain::RecordKind;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{kind} record not found: {id}")]
    RecordNotFound { kind: RecordKind, id: Uuid },
    #[error("Record {id} belongs to another user")]
    OwnershipMismatch { id: Uuid },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
}
