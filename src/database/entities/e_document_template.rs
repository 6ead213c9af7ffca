use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "e_document_template")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub f_name: Option<String>,
    /// Stored filename relative to the file store root
    pub f_file: Option<String>,
    /// Entity the template generates documents for
    pub f_entity: Option<String>,
    /// Source/output format code, e.g. `docx_docx`
    pub f_format_pair: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::document_template_role::Entity")]
    DocumentTemplateRole,
    #[sea_orm(has_many = "super::document_template_group::Entity")]
    DocumentTemplateGroup,
}

impl Related<super::e_role::Entity> for Entity {
    fn to() -> RelationDef {
        super::document_template_role::Relation::ERole.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::document_template_role::Relation::EDocumentTemplate.def().rev())
    }
}

impl Related<super::e_group::Entity> for Entity {
    fn to() -> RelationDef {
        super::document_template_group::Relation::EGroup.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::document_template_group::Relation::EDocumentTemplate.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
