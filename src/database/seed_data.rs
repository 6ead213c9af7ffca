use anyhow::Result;
use sea_orm::*;
use tracing::info;

use crate::database::entities::{e_group, e_role};

const DEFAULT_ROLES: [&str; 2] = ["admin", "user"];
const DEFAULT_GROUPS: [&str; 1] = ["Default"];

/// Insert the roles and groups a fresh application starts with
pub async fn seed_defaults(db: &DatabaseConnection) -> Result<()> {
    let existing_roles = e_role::Entity::find().count(db).await?;
    if existing_roles > 0 {
        info!("Roles already present, skipping seed data creation");
        return Ok(());
    }

    let txn = db.begin().await?;

    for label in DEFAULT_ROLES {
        e_role::ActiveModel {
            f_label: Set(Some(label.to_string())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    for label in DEFAULT_GROUPS {
        e_group::ActiveModel {
            f_label: Set(Some(label.to_string())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(
        "Seeded {} roles and {} groups",
        DEFAULT_ROLES.len(),
        DEFAULT_GROUPS.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_seed_defaults_is_idempotent() {
        let db = setup_test_db().await;

        seed_defaults(&db).await.unwrap();
        seed_defaults(&db).await.unwrap();

        assert_eq!(e_role::Entity::find().count(&db).await.unwrap(), 2);
        assert_eq!(e_group::Entity::find().count(&db).await.unwrap(), 1);
    }
}
