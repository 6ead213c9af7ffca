use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "e_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub f_label: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::document_template_role::Entity")]
    DocumentTemplateRole,
}

impl Related<super::e_document_template::Entity> for Entity {
    fn to() -> RelationDef {
        super::document_template_role::Relation::EDocumentTemplate.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::document_template_role::Relation::ERole.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
