//! Entity schema registry
//!
//! Entities are described by [`EntityDefinition`]s (code, YAML or TOML) and
//! resolved once into a [`SchemaRegistry`]. Inclusion trees are bound to the
//! registry before any duplication work starts.

pub mod app;
pub mod ddl;
pub mod descriptor;
pub mod inclusion;
pub mod registry;

pub use descriptor::*;
pub use inclusion::{parse_inclusions, Inclusion, ResolvedInclusion};
pub use registry::SchemaRegistry;
