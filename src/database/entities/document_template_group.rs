use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_template_group")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub fk_id_document_template: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub fk_id_group: i64,
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
        belongs_to = "super::e_group::Entity",
        from = "Column::FkIdGroup",
        to = "super::e_group::Column::Id"
    )]
    EGroup,
}

impl Related<super::e_document_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EDocumentTemplate.def()
    }
}

impl Related<super::e_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
