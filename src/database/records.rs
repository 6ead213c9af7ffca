//! Dynamic record access driven by entity descriptors
//!
//! Statements are built with `sea_query` from the registry's table and column
//! names, so any registered entity can be read and written without a typed
//! sea-orm entity.

use indexmap::IndexMap;
use sea_orm::sea_query::{Alias, Asterisk, Expr, Func, Order, Query, SimpleExpr};
use sea_orm::{ConnectionTrait, DbErr, QueryResult, Value};

use crate::schema::{AttributeKind, ColumnDescriptor, EntityDescriptor, JoinTable};

/// Column values of one entity instance, primary key excluded
pub type Record = IndexMap<String, Value>;

// Keeps `IN (...)` lists well below SQLite's bound parameter limit
const UPDATE_CHUNK: usize = 500;

pub struct RecordStore<'c, C: ConnectionTrait> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> RecordStore<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn find_one(
        &self,
        entity: &EntityDescriptor,
        id: i64,
    ) -> Result<Option<Record>, DbErr> {
        let mut query = Query::select();
        query
            .column(Alias::new(entity.primary_key()))
            .columns(entity.columns.iter().map(|c| Alias::new(&c.name)))
            .from(Alias::new(&entity.table))
            .and_where(Expr::col(Alias::new(entity.primary_key())).eq(id));

        let backend = self.conn.get_database_backend();
        let Some(row) = self.conn.query_one(backend.build(&query)).await? else {
            return Ok(None);
        };

        let mut record = Record::with_capacity(entity.columns.len());
        for column in &entity.columns {
            record.insert(column.name.clone(), read_column(&row, column)?);
        }

        Ok(Some(record))
    }

    /// Insert a record and return the identifier the store assigned to it
    pub async fn create(&self, entity: &EntityDescriptor, values: &Record) -> Result<i64, DbErr> {
        let mut insert = Query::insert();
        insert.into_table(Alias::new(&entity.table));

        if values.is_empty() {
            insert.or_default_values();
        } else {
            insert
                .columns(values.keys().map(Alias::new))
                .values(values.values().cloned().map(SimpleExpr::from))
                .map_err(|e| DbErr::Custom(format!("Invalid insert into {}: {}", entity.table, e)))?;
        }

        let backend = self.conn.get_database_backend();
        let result = self.conn.execute(backend.build(&insert)).await?;

        i64::try_from(result.last_insert_id()).map_err(|_| {
            DbErr::Custom(format!(
                "Identifier {} assigned by {} is out of range",
                result.last_insert_id(),
                entity.table
            ))
        })
    }

    /// One page of `target` identifiers whose `foreign_key` points at `owner_id`
    pub async fn related_ids(
        &self,
        target: &EntityDescriptor,
        foreign_key: &str,
        owner_id: i64,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<i64>, DbErr> {
        let pk = target.primary_key();
        let mut query = Query::select();
        query
            .column(Alias::new(pk))
            .from(Alias::new(&target.table))
            .and_where(Expr::col(Alias::new(foreign_key)).eq(owner_id))
            .order_by(Alias::new(pk), Order::Asc)
            .limit(limit)
            .offset(offset);

        let backend = self.conn.get_database_backend();
        self.conn
            .query_all(backend.build(&query))
            .await?
            .iter()
            .map(|row| row.try_get::<i64>("", pk))
            .collect()
    }

    /// Point `foreign_key` of every listed `target` record at `owner_id`
    pub async fn set_has_many(
        &self,
        target: &EntityDescriptor,
        foreign_key: &str,
        owner_id: i64,
        ids: &[i64],
    ) -> Result<(), DbErr> {
        let backend = self.conn.get_database_backend();

        for chunk in ids.chunks(UPDATE_CHUNK) {
            let mut update = Query::update();
            update
                .table(Alias::new(&target.table))
                .value(Alias::new(foreign_key), owner_id)
                .and_where(Expr::col(Alias::new(target.primary_key())).is_in(chunk.iter().copied()));

            self.conn.execute(backend.build(&update)).await?;
        }

        Ok(())
    }

    /// Identifiers of the entities joined to `owner_id`
    pub async fn join_targets(&self, join: &JoinTable, owner_id: i64) -> Result<Vec<i64>, DbErr> {
        let mut query = Query::select();
        query
            .column(Alias::new(&join.other_key))
            .from(Alias::new(&join.table))
            .and_where(Expr::col(Alias::new(&join.foreign_key)).eq(owner_id))
            .order_by(Alias::new(&join.other_key), Order::Asc);

        let backend = self.conn.get_database_backend();
        self.conn
            .query_all(backend.build(&query))
            .await?
            .iter()
            .map(|row| row.try_get::<i64>("", &join.other_key))
            .collect()
    }

    pub async fn add_join_rows(
        &self,
        join: &JoinTable,
        owner_id: i64,
        targets: &[i64],
    ) -> Result<(), DbErr> {
        if targets.is_empty() {
            return Ok(());
        }

        let backend = self.conn.get_database_backend();

        for chunk in targets.chunks(UPDATE_CHUNK) {
            let mut insert = Query::insert();
            insert
                .into_table(Alias::new(&join.table))
                .columns([Alias::new(&join.foreign_key), Alias::new(&join.other_key)]);

            for target in chunk {
                insert
                    .values([SimpleExpr::from(owner_id), SimpleExpr::from(*target)])
                    .map_err(|e| DbErr::Custom(format!("Invalid insert into {}: {}", join.table, e)))?;
            }

            self.conn.execute(backend.build(&insert)).await?;
        }

        Ok(())
    }

    pub async fn count(&self, table: &str) -> Result<i64, DbErr> {
        let mut query = Query::select();
        query
            .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("count"))
            .from(Alias::new(table));

        let backend = self.conn.get_database_backend();
        match self.conn.query_one(backend.build(&query)).await? {
            Some(row) => row.try_get::<i64>("", "count"),
            None => Ok(0),
        }
    }
}

fn read_column(row: &QueryResult, column: &ColumnDescriptor) -> Result<Value, DbErr> {
    let name = column.name.as_str();
    Ok(match column.kind {
        AttributeKind::Integer => row.try_get::<Option<i64>>("", name)?.into(),
        AttributeKind::Float => row.try_get::<Option<f64>>("", name)?.into(),
        AttributeKind::Boolean => row.try_get::<Option<bool>>("", name)?.into(),
        AttributeKind::Text | AttributeKind::File => row.try_get::<Option<String>>("", name)?.into(),
    })
}

/// Identifier held by a key column, `None` when the value is not an integer
pub fn key_value(value: &Value) -> Option<Option<i64>> {
    match value {
        Value::BigInt(v) => Some(*v),
        Value::Int(v) => Some(v.map(i64::from)),
        Value::BigUnsigned(v) => v.map(i64::try_from).transpose().ok(),
        _ => None,
    }
}

/// Non-empty string held by a text or file column
pub fn text_value(value: &Value) -> Option<&str> {
    match value {
        Value::String(Some(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value() {
        assert_eq!(key_value(&Value::BigInt(Some(4))), Some(Some(4)));
        assert_eq!(key_value(&Value::Int(None)), Some(None));
        assert_eq!(key_value(&Value::from("4")), None);
    }

    #[test]
    fn test_text_value() {
        assert_eq!(text_value(&Value::from("a.txt")), Some("a.txt"));
        assert_eq!(text_value(&Value::from(String::new())), None);
        assert_eq!(text_value(&Value::String(None)), None);
    }
}
