use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ERole::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ERole::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ERole::FLabel).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EGroup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EGroup::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EGroup::FLabel).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EDocumentTemplate::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EDocumentTemplate::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EDocumentTemplate::FName).text())
                    .col(ColumnDef::new(EDocumentTemplate::FFile).text())
                    .col(ColumnDef::new(EDocumentTemplate::FEntity).text())
                    .col(ColumnDef::new(EDocumentTemplate::FFormatPair).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DocumentTemplateRole::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentTemplateRole::FkIdDocumentTemplate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentTemplateRole::FkIdRole)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DocumentTemplateRole::FkIdDocumentTemplate)
                            .col(DocumentTemplateRole::FkIdRole),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_template_role_template")
                            .from(
                                DocumentTemplateRole::Table,
                                DocumentTemplateRole::FkIdDocumentTemplate,
                            )
                            .to(EDocumentTemplate::Table, EDocumentTemplate::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_template_role_role")
                            .from(DocumentTemplateRole::Table, DocumentTemplateRole::FkIdRole)
                            .to(ERole::Table, ERole::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DocumentTemplateGroup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentTemplateGroup::FkIdDocumentTemplate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentTemplateGroup::FkIdGroup)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DocumentTemplateGroup::FkIdDocumentTemplate)
                            .col(DocumentTemplateGroup::FkIdGroup),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_template_group_template")
                            .from(
                                DocumentTemplateGroup::Table,
                                DocumentTemplateGroup::FkIdDocumentTemplate,
                            )
                            .to(EDocumentTemplate::Table, EDocumentTemplate::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_template_group_group")
                            .from(DocumentTemplateGroup::Table, DocumentTemplateGroup::FkIdGroup)
                            .to(EGroup::Table, EGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DocumentTemplateGroup::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DocumentTemplateRole::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EDocumentTemplate::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EGroup::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ERole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ERole {
    Table,
    Id,
    FLabel,
}

#[derive(DeriveIden)]
enum EGroup {
    Table,
    Id,
    FLabel,
}

#[derive(DeriveIden)]
enum EDocumentTemplate {
    Table,
    Id,
    FName,
    FFile,
    FEntity,
    FFormatPair,
}

#[derive(DeriveIden)]
enum DocumentTemplateRole {
    Table,
    FkIdDocumentTemplate,
    FkIdRole,
}

#[derive(DeriveIden)]
enum DocumentTemplateGroup {
    Table,
    FkIdDocumentTemplate,
    FkIdGroup,
}
