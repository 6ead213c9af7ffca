//! Table definitions derived from entity descriptors

use sea_orm::sea_query::{Alias, ColumnDef, Index, Table, TableCreateStatement};
use sea_orm::{ConnectionTrait, DbErr};
use tracing::info;

use super::descriptor::{AttributeKind, EntityDescriptor, JoinTable};
use super::registry::SchemaRegistry;

pub fn table_create_statement(entity: &EntityDescriptor) -> TableCreateStatement {
    let mut table = Table::create();
    table.table(Alias::new(&entity.table)).if_not_exists().col(
        ColumnDef::new(Alias::new(entity.primary_key()))
            .integer()
            .not_null()
            .auto_increment()
            .primary_key(),
    );

    for column in &entity.columns {
        let mut def = ColumnDef::new(Alias::new(&column.name));
        match column.kind {
            AttributeKind::Integer => def.big_integer(),
            AttributeKind::Float => def.double(),
            AttributeKind::Boolean => def.boolean(),
            AttributeKind::Text | AttributeKind::File => def.text(),
        };
        if column.unique {
            def.unique_key();
        }
        table.col(&mut def);
    }

    table.to_owned()
}

pub fn join_table_create_statement(join: &JoinTable) -> TableCreateStatement {
    Table::create()
        .table(Alias::new(&join.table))
        .if_not_exists()
        .col(
            ColumnDef::new(Alias::new(&join.foreign_key))
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(Alias::new(&join.other_key))
                .big_integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(Alias::new(&join.foreign_key))
                .col(Alias::new(&join.other_key)),
        )
        .to_owned()
}

impl SchemaRegistry {
    /// Create every entity and join table that does not exist yet
    pub async fn create_tables<C: ConnectionTrait>(&self, db: &C) -> Result<(), DbErr> {
        let backend = db.get_database_backend();

        for entity in self.entities() {
            db.execute(backend.build(&table_create_statement(entity)))
                .await?;
        }

        for join in self.join_tables() {
            db.execute(backend.build(&join_table_create_statement(join)))
                .await?;
        }

        info!(
            "Created tables for {} entities and {} join tables",
            self.len(),
            self.join_tables().len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::{SchemaStatementBuilder, SqliteQueryBuilder};

    #[test]
    fn test_entity_table_sql() {
        let registry = SchemaRegistry::from_yaml(
            r#"
entities:
  - name: e_task
    attributes:
      - { name: f_code, type: text, unique: true }
      - { name: f_done, type: boolean }
      - { name: f_attachment, type: file }
"#,
        )
        .unwrap();

        let sql = table_create_statement(registry.entity("e_task").unwrap())
            .to_string(SqliteQueryBuilder);
        assert!(sql.starts_with(r#"CREATE TABLE IF NOT EXISTS "e_task""#));
        assert!(sql.contains("AUTOINCREMENT"));
        assert!(sql.contains(r#""f_code" text"#));
        assert!(sql.contains("UNIQUE"));
        assert!(sql.contains(r#""f_attachment" text"#));
    }

    #[test]
    fn test_join_table_sql() {
        let join = JoinTable {
            table: "project_tag".to_string(),
            foreign_key: "fk_id_project".to_string(),
            other_key: "fk_id_tag".to_string(),
        };
        let sql = join_table_create_statement(&join).to_string(SqliteQueryBuilder);
        assert!(sql.contains("PRIMARY KEY"));
        assert!(sql.contains(r#""fk_id_project""#));
        assert!(sql.contains(r#""fk_id_tag""#));
    }
}
