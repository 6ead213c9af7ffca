//! Schema registry and inclusion resolution errors

use thiserror::Error;

/// Errors raised while building the schema registry or resolving an
/// inclusion tree against it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No entity registered under this name
    #[error("Unknown entity '{0}'")]
    UnknownEntity(String),

    /// Inclusion references an alias the entity does not declare
    #[error("Entity '{entity}' has no association '{alias}'")]
    UnknownAssociation {
        /// Entity being included from
        entity: String,
        /// Requested association alias
        alias: String,
    },

    /// Association points at an entity that is not registered
    #[error("Association '{alias}' of '{entity}' targets unknown entity '{target}'")]
    UnknownTarget {
        entity: String,
        alias: String,
        target: String,
    },

    /// Entity registered twice
    #[error("Entity '{0}' is declared more than once")]
    DuplicateEntity(String),

    /// Alias declared twice on the same entity
    #[error("Entity '{entity}' declares association '{alias}' more than once")]
    DuplicateAssociation { entity: String, alias: String },

    /// `belongsToMany` without a join table or other key
    #[error("belongsToMany association '{alias}' of '{entity}' requires `through` and `other_key`")]
    MissingJoinTable { entity: String, alias: String },

    /// Attribute shadows the primary key
    #[error("Entity '{entity}' declares attribute '{attribute}' which shadows its primary key")]
    PrimaryKeyAttribute { entity: String, attribute: String },

    /// Schema document could not be parsed
    #[error("Failed to parse schema: {0}")]
    Parse(String),
}
