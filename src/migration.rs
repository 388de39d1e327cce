//! Apply the entity schema to the database: CREATE SCHEMA and one table per entity.
//! Idempotent; safe to run on every startup.

use crate::entity::{Employee, Entity, EntityDef, Student};
use crate::error::AppError;
use crate::sql::{qualified_table, quoted};
use sqlx::PgPool;

/// Entities that get a table.
pub const ENTITIES: &[&EntityDef] = &[Student::DEF, Employee::DEF];

/// CREATE TABLE IF NOT EXISTS for one entity. Text columns are VARCHAR(max_length) NOT NULL;
/// no uniqueness beyond the primary key.
pub fn table_ddl(def: &EntityDef, schema: &str) -> String {
    let mut col_defs = vec![format!("{} BIGSERIAL PRIMARY KEY", quoted("id"))];
    for c in def.columns {
        col_defs.push(format!("{} VARCHAR({}) NOT NULL", quoted(c.name), c.max_length));
    }
    for name in ["created_at", "updated_at"] {
        col_defs.push(format!("{} TIMESTAMPTZ NOT NULL DEFAULT NOW()", quoted(name)));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        qualified_table(schema, def.table),
        col_defs.join(", ")
    )
}

pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;
    for def in ENTITIES {
        let ddl = table_ddl(def, schema);
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!(schema, tables = ENTITIES.len(), "migrations applied");
    Ok(())
}
