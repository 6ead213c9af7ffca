//! Entities shipped with every generated application
//!
//! Tables for these are created by the `m001_create_app_tables` migration and
//! mirrored by the typed entities in `crate::database::entities`.

use super::descriptor::*;
use super::registry::SchemaRegistry;
use crate::errors::SchemaResult;

pub const DOCUMENT_TEMPLATE: &str = "e_document_template";
pub const ROLE: &str = "e_role";
pub const GROUP: &str = "e_group";

pub fn app_schema_definition() -> SchemaDefinition {
    SchemaDefinition {
        entities: vec![
            EntityDefinition::new(ROLE)
                .attribute(AttributeDefinition::new("f_label", AttributeKind::Text)),
            EntityDefinition::new(GROUP)
                .attribute(AttributeDefinition::new("f_label", AttributeKind::Text)),
            EntityDefinition::new(DOCUMENT_TEMPLATE)
                .attribute(AttributeDefinition::new("f_name", AttributeKind::Text))
                .attribute(AttributeDefinition::new("f_file", AttributeKind::File))
                .attribute(AttributeDefinition::new("f_entity", AttributeKind::Text))
                .attribute(AttributeDefinition::new("f_format_pair", AttributeKind::Text))
                .association(AssociationDefinition::belongs_to_many(
                    "r_role",
                    ROLE,
                    "document_template_role",
                    "fk_id_document_template",
                    "fk_id_role",
                ))
                .association(AssociationDefinition::belongs_to_many(
                    "r_group",
                    GROUP,
                    "document_template_group",
                    "fk_id_document_template",
                    "fk_id_group",
                )),
        ],
    }
}

pub fn app_schema() -> SchemaResult<SchemaRegistry> {
    SchemaRegistry::build(app_schema_definition())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_schema_builds() {
        let registry = app_schema().unwrap();
        let template = registry.entity(DOCUMENT_TEMPLATE).unwrap();
        assert_eq!(template.file_attributes().count(), 1);
        assert_eq!(registry.join_tables().len(), 2);
    }
}
