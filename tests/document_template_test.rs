//! Document template duplication tests
//!
//! Uses the migrated application tables, the typed entities and the built-in
//! schema together.

use std::sync::Arc;

use anyhow::Result;
use duplicator::database::entities::*;
use duplicator::database::establish_connection;
use duplicator::database::migrations::Migrator;
use duplicator::database::seed_data::seed_defaults;
use duplicator::schema::app::{app_schema, DOCUMENT_TEMPLATE};
use duplicator::schema::Inclusion;
use duplicator::services::DuplicationService;
use duplicator::storage::{filename, LocalFileStore};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, Set,
};
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;

async fn setup_test_db() -> Result<(DatabaseConnection, TempDir)> {
    let dir = TempDir::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("app.db").display());

    let db = establish_connection(&db_url).await?;
    Migrator::up(&db, None).await?;
    seed_defaults(&db).await?;

    Ok((db, dir))
}

async fn create_template(
    db: &DatabaseConnection,
    upload: &std::path::Path,
) -> Result<e_document_template::Model> {
    let (dir, name) = filename::create_path_and_name(DOCUMENT_TEMPLATE, "invoice.docx");
    std::fs::create_dir_all(upload.join(&dir))?;
    std::fs::write(upload.join(&dir).join(&name), "template body")?;

    let template = e_document_template::ActiveModel {
        f_name: Set(Some("Invoice".to_string())),
        f_file: Set(Some(format!("{}{}", dir, name))),
        f_entity: Set(Some("e_invoice".to_string())),
        f_format_pair: Set(Some("docx_pdf".to_string())),
        ..Default::default()
    }
    .insert(db)
    .await?;

    for role in ERole::find().all(db).await? {
        document_template_role::ActiveModel {
            fk_id_document_template: Set(template.id as i64),
            fk_id_role: Set(role.id as i64),
        }
        .insert(db)
        .await?;
    }

    for group in EGroup::find().all(db).await? {
        document_template_group::ActiveModel {
            fk_id_document_template: Set(template.id as i64),
            fk_id_group: Set(group.id as i64),
        }
        .insert(db)
        .await?;
    }

    Ok(template)
}

#[tokio::test]
async fn test_duplicate_document_template() -> Result<()> {
    let (db, dir) = setup_test_db().await?;
    let upload = dir.path().join("upload");
    let template = create_template(&db, &upload).await?;

    let service = DuplicationService::new(
        db.clone(),
        Arc::new(app_schema()?),
        LocalFileStore::new(&upload),
    );
    let outcome = service
        .duplicate(
            template.id as i64,
            DOCUMENT_TEMPLATE,
            &[Inclusion::new("r_role"), Inclusion::new("r_group")],
        )
        .await?;

    let copy = EDocumentTemplate::find_by_id(outcome.new_id as i32)
        .one(&db)
        .await?
        .expect("duplicated template");
    assert_eq!(copy.f_name, template.f_name);
    assert_eq!(copy.f_entity, template.f_entity);
    assert_eq!(copy.f_format_pair, template.f_format_pair);

    let copied_file = copy.f_file.clone().expect("file set");
    assert_ne!(Some(copied_file.clone()), template.f_file);
    assert_eq!(filename::original_filename(&copied_file), "invoice.docx");
    assert_eq!(
        std::fs::read_to_string(upload.join(&copied_file))?,
        "template body"
    );

    let roles = copy.find_related(ERole).all(&db).await?;
    let groups = copy.find_related(EGroup).all(&db).await?;
    assert_eq!(roles.len(), 2);
    assert_eq!(groups.len(), 1);

    // Roles and groups are shared, never copied
    assert_eq!(ERole::find().count(&db).await?, 2);
    assert_eq!(EGroup::find().count(&db).await?, 1);
    assert_eq!(DocumentTemplateRole::find().count(&db).await?, 4);
    assert_eq!(DocumentTemplateGroup::find().count(&db).await?, 2);

    assert_eq!(outcome.records.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_template_without_inclusions() -> Result<()> {
    let (db, dir) = setup_test_db().await?;
    let upload = dir.path().join("upload");
    let template = create_template(&db, &upload).await?;

    let service = DuplicationService::new(
        db.clone(),
        Arc::new(app_schema()?),
        LocalFileStore::new(&upload),
    );
    let outcome = service
        .duplicate(template.id as i64, DOCUMENT_TEMPLATE, &[])
        .await?;

    let copy = EDocumentTemplate::find_by_id(outcome.new_id as i32)
        .one(&db)
        .await?
        .expect("duplicated template");
    assert!(copy.find_related(ERole).all(&db).await?.is_empty());
    assert_eq!(EDocumentTemplate::find().count(&db).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_migrations_down_and_up() -> Result<()> {
    let (db, _dir) = setup_test_db().await?;

    Migrator::down(&db, None).await?;
    Migrator::up(&db, None).await?;

    assert_eq!(ERole::find().count(&db).await?, 0);
    assert_eq!(EDocumentTemplate::find().count(&db).await?, 0);

    Ok(())
}
