use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use super::descriptor::*;
use crate::errors::{SchemaError, SchemaResult};

/// Entity descriptors resolved once at startup
///
/// Association targets are resolved to [`EntityKey`]s and every table's
/// physical columns are computed up front, so a duplication run never looks
/// anything up by string past the root entity and its inclusion aliases.
#[derive(Clone, Debug)]
pub struct SchemaRegistry {
    entities: Vec<EntityDescriptor>,
    by_name: HashMap<String, EntityKey>,
}

impl SchemaRegistry {
    pub fn build(definition: SchemaDefinition) -> SchemaResult<Self> {
        let mut by_name = HashMap::new();
        for (index, entity) in definition.entities.iter().enumerate() {
            if by_name
                .insert(entity.name.clone(), EntityKey(index))
                .is_some()
            {
                return Err(SchemaError::DuplicateEntity(entity.name.clone()));
            }
        }

        let mut entities = Vec::with_capacity(definition.entities.len());
        for (index, entity) in definition.entities.into_iter().enumerate() {
            entities.push(resolve_entity(EntityKey(index), entity, &by_name)?);
        }

        let incoming = incoming_foreign_keys(&entities);
        for entity in &mut entities {
            entity.columns = table_columns(entity, incoming.get(&entity.key));
        }

        debug!("Schema registry built with {} entities", entities.len());

        Ok(Self { entities, by_name })
    }

    pub fn from_yaml(content: &str) -> SchemaResult<Self> {
        let definition: SchemaDefinition =
            serde_yaml::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::build(definition)
    }

    pub fn from_toml(content: &str) -> SchemaResult<Self> {
        let definition: SchemaDefinition =
            toml::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::build(definition)
    }

    /// Load a schema document, TOML when the extension says so, YAML otherwise
    pub fn from_path(path: &Path) -> SchemaResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SchemaError::Parse(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// Descriptor behind `key`
    ///
    /// Keys are only valid for the registry that issued them, through
    /// [`Self::key_of`] or an association target.
    ///
    /// # Panics
    ///
    /// Panics when `key` was issued by a registry with fewer entities.
    pub fn get(&self, key: EntityKey) -> &EntityDescriptor {
        &self.entities[key.0]
    }

    pub fn key_of(&self, name: &str) -> SchemaResult<EntityKey> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SchemaError::UnknownEntity(name.to_string()))
    }

    pub fn entity(&self, name: &str) -> SchemaResult<&EntityDescriptor> {
        self.key_of(name).map(|key| self.get(key))
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Distinct join tables of every `belongsToMany` association
    pub fn join_tables(&self) -> Vec<&JoinTable> {
        let mut seen = HashSet::new();
        self.entities
            .iter()
            .flat_map(|e| e.associations.iter())
            .filter_map(|a| match &a.relation {
                Relation::BelongsToMany(join) => Some(join),
                _ => None,
            })
            .filter(|join| seen.insert(join.table.clone()))
            .collect()
    }
}

fn resolve_entity(
    key: EntityKey,
    entity: EntityDefinition,
    by_name: &HashMap<String, EntityKey>,
) -> SchemaResult<EntityDescriptor> {
    if let Some(attribute) = entity.attributes.iter().find(|a| a.name == PRIMARY_KEY) {
        return Err(SchemaError::PrimaryKeyAttribute {
            entity: entity.name.clone(),
            attribute: attribute.name.clone(),
        });
    }

    let mut aliases = HashSet::new();
    let mut associations = Vec::with_capacity(entity.associations.len());

    for association in entity.associations {
        if !aliases.insert(association.alias.clone()) {
            return Err(SchemaError::DuplicateAssociation {
                entity: entity.name.clone(),
                alias: association.alias,
            });
        }

        let target = by_name
            .get(&association.target)
            .copied()
            .ok_or_else(|| SchemaError::UnknownTarget {
                entity: entity.name.clone(),
                alias: association.alias.clone(),
                target: association.target.clone(),
            })?;

        let relation = match association.relation {
            RelationKind::BelongsTo => Relation::BelongsTo {
                foreign_key: association.foreign_key,
            },
            RelationKind::HasMany => Relation::HasMany {
                foreign_key: association.foreign_key,
            },
            RelationKind::BelongsToMany => match (association.through, association.other_key) {
                (Some(table), Some(other_key)) => Relation::BelongsToMany(JoinTable {
                    table,
                    foreign_key: association.foreign_key,
                    other_key,
                }),
                _ => {
                    return Err(SchemaError::MissingJoinTable {
                        entity: entity.name.clone(),
                        alias: association.alias,
                    })
                }
            },
        };

        associations.push(AssociationDescriptor {
            alias: association.alias,
            target,
            relation,
        });
    }

    Ok(EntityDescriptor {
        key,
        table: entity.table.unwrap_or_else(|| entity.name.clone()),
        name: entity.name,
        attributes: entity.attributes,
        associations,
        columns: Vec::new(),
    })
}

// hasMany keys declared on the owner but stored on the target's table
fn incoming_foreign_keys(entities: &[EntityDescriptor]) -> HashMap<EntityKey, Vec<String>> {
    let mut incoming: HashMap<EntityKey, Vec<String>> = HashMap::new();
    for association in entities.iter().flat_map(|e| e.associations.iter()) {
        if let Relation::HasMany { foreign_key } = &association.relation {
            incoming
                .entry(association.target)
                .or_default()
                .push(foreign_key.clone());
        }
    }
    incoming
}

fn table_columns(entity: &EntityDescriptor, incoming: Option<&Vec<String>>) -> Vec<ColumnDescriptor> {
    let mut columns: Vec<ColumnDescriptor> = entity
        .attributes
        .iter()
        .map(|a| ColumnDescriptor {
            name: a.name.clone(),
            kind: a.kind,
            unique: a.unique,
        })
        .collect();

    let owned_keys = entity.associations.iter().filter_map(|a| match &a.relation {
        Relation::BelongsTo { foreign_key } => Some(foreign_key),
        _ => None,
    });

    for foreign_key in owned_keys.chain(incoming.into_iter().flatten()) {
        if columns.iter().all(|c| &c.name != foreign_key) {
            columns.push(ColumnDescriptor {
                name: foreign_key.clone(),
                kind: AttributeKind::Integer,
                unique: false,
            });
        }
    }

    columns
}
