use serde::{Deserialize, Serialize};

/// Primary key column shared by every entity table
pub const PRIMARY_KEY: &str = "id";

/// Semantic attribute type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Integer,
    Float,
    Text,
    Boolean,
    /// Stored filename relative to the file store root
    File,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    #[serde(default)]
    pub unique: bool,
}

impl AttributeDefinition {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    BelongsTo,
    HasMany,
    BelongsToMany,
}

/// Association as written in a schema document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationDefinition {
    #[serde(rename = "as")]
    pub alias: String,
    pub relation: RelationKind,
    pub target: String,
    pub foreign_key: String,
    #[serde(default)]
    pub other_key: Option<String>,
    #[serde(default)]
    pub through: Option<String>,
}

impl AssociationDefinition {
    pub fn belongs_to(
        alias: impl Into<String>,
        target: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            relation: RelationKind::BelongsTo,
            target: target.into(),
            foreign_key: foreign_key.into(),
            other_key: None,
            through: None,
        }
    }

    pub fn has_many(
        alias: impl Into<String>,
        target: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            relation: RelationKind::HasMany,
            ..Self::belongs_to(alias, target, foreign_key)
        }
    }

    pub fn belongs_to_many(
        alias: impl Into<String>,
        target: impl Into<String>,
        through: impl Into<String>,
        foreign_key: impl Into<String>,
        other_key: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            relation: RelationKind::BelongsToMany,
            target: target.into(),
            foreign_key: foreign_key.into(),
            other_key: Some(other_key.into()),
            through: Some(through.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDefinition {
    pub name: String,
    /// Defaults to the entity name
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
    #[serde(default)]
    pub associations: Vec<AssociationDefinition>,
}

impl EntityDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            attributes: Vec::new(),
            associations: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: AttributeDefinition) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn association(mut self, association: AssociationDefinition) -> Self {
        self.associations.push(association);
        self
    }
}

/// Top-level schema document
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default)]
    pub entities: Vec<EntityDefinition>,
}

/// Index of an entity inside its [`super::SchemaRegistry`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey(pub(crate) usize);

/// Join table of a `belongsToMany` association
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinTable {
    pub table: String,
    /// Column referencing the owning entity
    pub foreign_key: String,
    /// Column referencing the associated entity
    pub other_key: String,
}

/// Resolved relation, carrying only the columns its kind needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Relation {
    /// Key column lives on the owner
    BelongsTo { foreign_key: String },
    /// Key column lives on the target
    HasMany { foreign_key: String },
    /// Key pair lives in a join table
    BelongsToMany(JoinTable),
}

impl Relation {
    pub fn kind(&self) -> RelationKind {
        match self {
            Relation::BelongsTo { .. } => RelationKind::BelongsTo,
            Relation::HasMany { .. } => RelationKind::HasMany,
            Relation::BelongsToMany(_) => RelationKind::BelongsToMany,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssociationDescriptor {
    pub alias: String,
    pub target: EntityKey,
    pub relation: Relation,
}

/// Physical column of an entity table, primary key excluded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub kind: AttributeKind,
    pub unique: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub key: EntityKey,
    pub name: String,
    pub table: String,
    pub attributes: Vec<AttributeDefinition>,
    pub associations: Vec<AssociationDescriptor>,
    /// Attributes plus the foreign keys stored on this table
    pub columns: Vec<ColumnDescriptor>,
}

impl EntityDescriptor {
    pub fn primary_key(&self) -> &str {
        PRIMARY_KEY
    }

    pub fn association(&self, alias: &str) -> Option<&AssociationDescriptor> {
        self.associations.iter().find(|a| a.alias == alias)
    }

    pub fn file_attributes(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.attributes
            .iter()
            .filter(|a| a.kind == AttributeKind::File)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}
