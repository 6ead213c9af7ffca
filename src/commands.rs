use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use sea_orm::DatabaseConnection;
use sea_orm_migration::prelude::*;
use tracing::info;

use crate::config::AppConfig;
use crate::database::{connection::*, migrations::Migrator, seed_data::seed_defaults};
use crate::schema::{app::app_schema, parse_inclusions, SchemaRegistry};
use crate::services::{DuplicationOutcome, DuplicationService};
use crate::storage::LocalFileStore;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

async fn connect(config: &AppConfig) -> Result<DatabaseConnection> {
    let database_url = get_database_url(Some(&config.database.url));
    establish_connection(&database_url)
        .await
        .with_context(|| format!("Failed to connect to {}", config.database.url))
}

/// The schema named by `path`, then the configured one, then the built-in one
pub fn load_schema(config: &AppConfig, path: Option<&Path>) -> Result<SchemaRegistry> {
    match path.or(config.schema.path.as_deref()) {
        Some(path) => SchemaRegistry::from_path(path)
            .with_context(|| format!("Invalid schema {}", path.display())),
        None => Ok(app_schema()?),
    }
}

pub async fn migrate_database(config: &AppConfig, direction: MigrateDirection) -> Result<()> {
    let db = connect(config).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}

/// Prepare a database for duplication
///
/// Without a schema file the application tables are migrated and seeded.
/// With one, a table is created for every entity and through table it
/// declares.
pub async fn init_database(config: &AppConfig, schema_path: Option<&Path>) -> Result<()> {
    let db = connect(config).await?;

    match schema_path {
        Some(path) => {
            let schema = load_schema(config, Some(path))?;
            schema.create_tables(&db).await?;
            info!(
                "Created tables for {} entities from {}",
                schema.len(),
                path.display()
            );
        }
        None => {
            Migrator::up(&db, None).await?;
            seed_defaults(&db).await?;
            info!("Database initialized");
        }
    }

    Ok(())
}

/// Validate a schema file and return a one-line summary
pub fn check_schema(path: &Path) -> Result<String> {
    let schema = SchemaRegistry::from_path(path)
        .with_context(|| format!("Invalid schema {}", path.display()))?;

    let associations: usize = schema.entities().map(|e| e.associations.len()).sum();
    Ok(format!(
        "{}: {} entities, {} associations, {} join tables",
        path.display(),
        schema.len(),
        associations,
        schema.join_tables().len()
    ))
}

pub async fn duplicate_entity(
    config: &AppConfig,
    entity: &str,
    id: i64,
    include: Option<&str>,
    schema_path: Option<&Path>,
) -> Result<DuplicationOutcome> {
    let schema = load_schema(config, schema_path)?;
    let includes = match include {
        Some(json) => parse_inclusions(json).context("Invalid inclusion tree")?,
        None => Vec::new(),
    };

    let db = connect(config).await?;
    let service = DuplicationService::new(
        db,
        Arc::new(schema),
        LocalFileStore::new(&config.storage.root),
    );

    Ok(service.duplicate(id, entity, &includes).await?)
}
