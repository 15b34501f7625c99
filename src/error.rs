//! Error types for the property index

use crate::types::PropertyId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Duplicate property id: {0}")]
    DuplicateId(PropertyId),

    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: PropertyId, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index inconsistency: {0}")]
    Inconsistent(String),
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::Serialization(err.to_string())
    }
}

impl IndexError {
    /// Id of the record an insert-time error refers to, if any
    pub fn property_id(&self) -> Option<PropertyId> {
        match self {
            IndexError::DuplicateId(id) => Some(*id),
            IndexError::InvalidRecord { id, .. } => Some(*id),
            _ => None,
        }
    }
}
