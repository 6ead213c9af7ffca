use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use chrono::Local;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait, Value};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::database::records::{key_value, text_value, Record, RecordStore};
use crate::errors::{DuplicationError, DuplicationResult};
use crate::schema::{EntityDescriptor, Inclusion, Relation, ResolvedInclusion, SchemaRegistry};
use crate::storage::{filename, FileStore, LocalFileStore};

/// Page size used when walking `hasMany` children
pub const HAS_MANY_BATCH_SIZE: u64 = 50;

/// One created instance
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DuplicationRecord {
    pub entity_name: String,
    /// Association the instance was reached through, `None` for the root
    pub alias: Option<String>,
    pub original_id: i64,
    pub duplicated_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DuplicationOutcome {
    pub new_id: i64,
    /// Created instances in creation order
    pub records: Vec<DuplicationRecord>,
}

/// Deep-copies an entity instance and a chosen subtree of its associations
///
/// Every record of a run is created in one transaction. Files are copied
/// outside of it; when the run fails the copies are deleted again before the
/// transaction is rolled back.
#[derive(Clone)]
pub struct DuplicationService<F = LocalFileStore> {
    db: DatabaseConnection,
    schema: Arc<SchemaRegistry>,
    files: Arc<F>,
}

impl<F: FileStore> DuplicationService<F> {
    pub fn new(db: DatabaseConnection, schema: Arc<SchemaRegistry>, files: F) -> Self {
        Self {
            db,
            schema,
            files: Arc::new(files),
        }
    }

    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    pub async fn duplicate(
        &self,
        entity_id: i64,
        entity_name: &str,
        includes: &[Inclusion],
    ) -> DuplicationResult<DuplicationOutcome> {
        let entity = self.schema.entity(entity_name)?;
        let resolved = self.schema.resolve_inclusions(entity, includes)?;

        info!("Duplicating {} {}", entity_name, entity_id);

        let txn = self.db.begin().await?;
        let mut run = DuplicationRun {
            txn: &txn,
            files: self.files.as_ref(),
            records: Vec::new(),
            copied_files: Vec::new(),
        };

        let result = run.duplicate(entity, entity_id, None, None, &resolved).await;
        let DuplicationRun {
            records,
            copied_files,
            ..
        } = run;

        let new_id = match result {
            Ok(new_id) => new_id,
            Err(err) => {
                warn!("Duplication of {} {} failed: {}", entity_name, entity_id, err);
                remove_files(self.files.as_ref(), &copied_files).await;
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("Rollback failed: {}", rollback_err);
                }
                return Err(err);
            }
        };

        if let Err(err) = txn.commit().await {
            remove_files(self.files.as_ref(), &copied_files).await;
            return Err(err.into());
        }

        info!(
            "Duplicated {} {} as {} ({} records, {} files)",
            entity_name,
            entity_id,
            new_id,
            records.len(),
            copied_files.len()
        );

        Ok(DuplicationOutcome { new_id, records })
    }
}

type DuplicateFuture<'a> = Pin<Box<dyn Future<Output = DuplicationResult<i64>> + Send + 'a>>;

// State of a single `duplicate` call
struct DuplicationRun<'r, F: ?Sized> {
    txn: &'r DatabaseTransaction,
    files: &'r F,
    records: Vec<DuplicationRecord>,
    copied_files: Vec<PathBuf>,
}

impl<'r, F: FileStore + ?Sized> DuplicationRun<'r, F> {
    /// Copy one source instance, then the inclusions hanging off it
    ///
    /// `belongsTo` targets are copied before the instance because their new
    /// key is part of the inserted row. `hasMany` children and
    /// `belongsToMany` join rows need the new id and come after. `owner` is
    /// the key column and new id of the parent when the instance is reached
    /// through a `hasMany` association.
    fn duplicate<'a, 's: 'a>(
        &'a mut self,
        entity: &'s EntityDescriptor,
        source_id: i64,
        alias: Option<&'s str>,
        owner: Option<(&'s str, i64)>,
        includes: &'a [ResolvedInclusion<'s>],
    ) -> DuplicateFuture<'a> {
        Box::pin(async move {
            let store = RecordStore::new(self.txn);

            let source = store.find_one(entity, source_id).await?.ok_or_else(|| {
                DuplicationError::SourceNotFound {
                    entity: entity.name.clone(),
                    id: source_id,
                }
            })?;
            let mut values = source.clone();

            for attribute in entity.file_attributes() {
                let Some(stored) = source.get(&attribute.name).and_then(text_value) else {
                    continue;
                };
                let duplicated = self.duplicate_file(&entity.name, stored).await;
                values.insert(attribute.name.clone(), Value::from(duplicated));
            }

            for include in includes {
                let Relation::BelongsTo { foreign_key } = &include.association.relation else {
                    continue;
                };
                let Some(target_id) = key_column(entity, &source, foreign_key)? else {
                    continue;
                };

                let new_target = self
                    .duplicate(
                        include.target,
                        target_id,
                        Some(include.association.alias.as_str()),
                        None,
                        &include.children,
                    )
                    .await?;
                values.insert(foreign_key.clone(), Value::from(new_target));
            }

            if let Some((foreign_key, owner_id)) = owner {
                values.insert(foreign_key.to_string(), Value::from(owner_id));
            }

            let new_id = store.create(entity, &values).await?;
            debug!("Created {} {} from {}", entity.name, new_id, source_id);

            self.records.push(DuplicationRecord {
                entity_name: entity.name.clone(),
                alias: alias.map(str::to_string),
                original_id: source_id,
                duplicated_id: new_id,
            });

            for include in includes {
                match &include.association.relation {
                    Relation::HasMany { foreign_key } => {
                        let mut children = Vec::new();
                        let mut offset = 0;
                        loop {
                            let page = store
                                .related_ids(
                                    include.target,
                                    foreign_key,
                                    source_id,
                                    HAS_MANY_BATCH_SIZE,
                                    offset,
                                )
                                .await?;

                            for child_id in &page {
                                let child = self
                                    .duplicate(
                                        include.target,
                                        *child_id,
                                        Some(include.association.alias.as_str()),
                                        Some((foreign_key.as_str(), new_id)),
                                        &include.children,
                                    )
                                    .await?;
                                children.push(child);
                            }

                            if (page.len() as u64) < HAS_MANY_BATCH_SIZE {
                                break;
                            }
                            offset += HAS_MANY_BATCH_SIZE;
                        }

                        store
                            .set_has_many(include.target, foreign_key, new_id, &children)
                            .await?;
                    }
                    Relation::BelongsToMany(join) => {
                        let targets = store.join_targets(join, source_id).await?;
                        store.add_join_rows(join, new_id, &targets).await?;
                        debug!(
                            "Linked {} {} to {} existing {}",
                            entity.name,
                            new_id,
                            targets.len(),
                            include.target.name
                        );
                    }
                    Relation::BelongsTo { .. } => {}
                }
            }

            Ok(new_id)
        })
    }

    /// Copy the file behind `stored` and return the new stored filename
    ///
    /// A failed copy is logged and the new filename is returned regardless.
    async fn duplicate_file(&mut self, entity: &str, stored: &str) -> String {
        let now = Local::now().naive_local();
        let (dir, name) = filename::create_path_and_name_at(
            entity,
            &filename::duplicate_filename(stored, now),
            now,
        );
        let duplicated = format!("{}{}", dir, name);

        let from = self.files.resolve(stored);
        let to = self.files.resolve(&duplicated);
        match self.files.copy(&from, &to).await {
            Ok(()) => self.copied_files.push(to),
            Err(err) => warn!("Couldn't duplicate file {}: {}", stored, err),
        }

        duplicated
    }
}

fn key_column(
    entity: &EntityDescriptor,
    record: &Record,
    column: &str,
) -> DuplicationResult<Option<i64>> {
    match record.get(column) {
        None => Ok(None),
        Some(value) => key_value(value).ok_or_else(|| DuplicationError::InvalidKey {
            entity: entity.name.clone(),
            column: column.to_string(),
        }),
    }
}

async fn remove_files<F: FileStore + ?Sized>(files: &F, paths: &[PathBuf]) {
    for path in paths {
        if let Err(err) = files.remove(path).await {
            warn!("Couldn't remove duplicated file: {}", err);
        }
    }
}
