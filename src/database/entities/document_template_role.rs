use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_template_role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub fk_id_document_template: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub fk_id_role: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::e_document_template::Entity",
        from = "Column::FkIdDocumentTemplate",
        to = "super::e_document_template::Column::Id"
    )]
    EDocumentTemplate,
    #[sea_orm(
        belongs_to = "super::e_role::Entity",
        from = "Column::FkIdRole",
        to = "super::e_role::Column::Id"
    )]
    ERole,
}

impl Related<super::e_document_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EDocumentTemplate.def()
    }
}

impl Related<super::e_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ERole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
