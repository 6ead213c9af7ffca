//! Domain-specific error types
//!
//! # Error Categories
//!
//! - **SchemaError**: entity descriptors and inclusion trees that do not
//!   resolve against the registry
//! - **DuplicationError**: failures of a duplication run (missing source,
//!   persistence errors)
//! - **StorageError**: file store operations
//!
//! # Examples
//!
//! ```rust
//! use duplicator::errors::{DuplicationError, SchemaError};
//!
//! let err = DuplicationError::SourceNotFound {
//!     entity: "e_document_template".to_string(),
//!     id: 42,
//! };
//! assert!(err.is_not_found());
//!
//! let err: DuplicationError = SchemaError::UnknownAssociation {
//!     entity: "e_document_template".to_string(),
//!     alias: "r_missing".to_string(),
//! }
//! .into();
//! assert!(err.is_client_error());
//! ```

pub mod duplication;
pub mod schema;
pub mod storage;

pub use duplication::DuplicationError;
pub use schema::SchemaError;
pub use storage::StorageError;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type alias for duplication runs
pub type DuplicationResult<T> = Result<T, DuplicationError>;

/// Result type alias for file store operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_result_alias() {
        let result: SchemaResult<()> = Err(SchemaError::UnknownEntity("e_ghost".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_duplication_result_alias() {
        let result: DuplicationResult<i64> = Err(DuplicationError::SourceNotFound {
            entity: "e_role".to_string(),
            id: 1,
        });
        assert!(result.is_err());
    }
}
