pub mod document_template_group;
pub mod document_template_role;
pub mod e_document_template;
pub mod e_group;
pub mod e_role;

pub use document_template_group::Entity as DocumentTemplateGroup;
pub use document_template_role::Entity as DocumentTemplateRole;
pub use e_document_template::Entity as EDocumentTemplate;
pub use e_group::Entity as EGroup;
pub use e_role::Entity as ERole;
