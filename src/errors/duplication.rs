//! Duplication run errors
//!
//! Not-found and persistence errors are fatal to a run: the transaction is
//! rolled back and copied files are removed before they reach the caller.
//! File copy failures never surface here, they are logged by the run.

use thiserror::Error;

use super::SchemaError;

/// Errors surfaced by [`crate::services::DuplicationService`]
#[derive(Error, Debug)]
pub enum DuplicationError {
    /// Source record does not exist
    #[error("{entity} id {id} not found")]
    SourceNotFound {
        /// Entity name
        entity: String,
        /// Requested identifier
        id: i64,
    },

    /// Entity or inclusion tree does not resolve against the schema
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Key column holds something other than an integer identifier
    #[error("Column '{column}' of {entity} does not hold an integer key")]
    InvalidKey { entity: String, column: String },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl DuplicationError {
    /// Caller contract violation rather than a store failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DuplicationError::Schema(_) | DuplicationError::SourceNotFound { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DuplicationError::SourceNotFound { .. })
    }

    pub fn is_database_error(&self) -> bool {
        matches!(self, DuplicationError::Database(_))
    }
}
