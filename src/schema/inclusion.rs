use serde::{Deserialize, Serialize};

use super::descriptor::{AssociationDescriptor, EntityDescriptor};
use super::registry::SchemaRegistry;
use crate::errors::{SchemaError, SchemaResult};

/// One node of a caller-supplied inclusion tree
///
/// Deserializes from the `{ "as": ..., "include": [...] }` shape:
///
/// ```rust
/// use duplicator::schema::Inclusion;
///
/// let includes: Vec<Inclusion> =
///     serde_json::from_str(r#"[{"as": "r_task", "include": [{"as": "r_owner"}]}]"#).unwrap();
/// assert_eq!(includes[0], Inclusion::new("r_task").with(Inclusion::new("r_owner")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inclusion {
    #[serde(rename = "as")]
    pub alias: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<Inclusion>,
}

impl Inclusion {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            include: Vec::new(),
        }
    }

    pub fn with(mut self, child: Inclusion) -> Self {
        self.include.push(child);
        self
    }
}

/// Inclusion node bound to its association and target descriptors
#[derive(Clone, Debug)]
pub struct ResolvedInclusion<'s> {
    pub association: &'s AssociationDescriptor,
    pub target: &'s EntityDescriptor,
    pub children: Vec<ResolvedInclusion<'s>>,
}

impl SchemaRegistry {
    /// Bind every alias of the tree, failing on the first one the entity does
    /// not declare
    pub fn resolve_inclusions<'s>(
        &'s self,
        entity: &'s EntityDescriptor,
        includes: &[Inclusion],
    ) -> SchemaResult<Vec<ResolvedInclusion<'s>>> {
        includes
            .iter()
            .map(|inclusion| {
                let association = entity.association(&inclusion.alias).ok_or_else(|| {
                    SchemaError::UnknownAssociation {
                        entity: entity.name.clone(),
                        alias: inclusion.alias.clone(),
                    }
                })?;
                let target = self.get(association.target);

                Ok(ResolvedInclusion {
                    association,
                    target,
                    children: self.resolve_inclusions(target, &inclusion.include)?,
                })
            })
            .collect()
    }
}

/// Parse an inclusion tree from JSON, accepting a single node or a list
pub fn parse_inclusions(json: &str) -> SchemaResult<Vec<Inclusion>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Inclusion>),
        One(Inclusion),
    }

    match serde_json::from_str(json).map_err(|e| SchemaError::Parse(e.to_string()))? {
        OneOrMany::Many(includes) => Ok(includes),
        OneOrMany::One(inclusion) => Ok(vec![inclusion]),
    }
}
