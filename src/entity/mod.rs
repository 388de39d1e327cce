//! Static entity definitions: table layout, allowed operations, list filters and
//! admin directory config. Everything the SQL builder, validator and routes need
//! to know about an entity lives in its [`EntityDef`].

pub mod employee;
pub mod student;

pub use employee::Employee;
pub use student::Student;

use crate::filter::FilterDef;
use crate::service::Fields;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgRow;

/// Operations a resource exposes over HTTP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
}

/// One text column of an entity table.
#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    /// Column name in the table.
    pub name: &'static str,
    /// Key used in JSON bodies. Usually the column name.
    pub label: &'static str,
    pub max_length: usize,
}

/// Displayed and searchable columns for the admin directory.
#[derive(Debug)]
pub struct AdminConfig {
    pub list_display: &'static [&'static str],
    pub search_fields: &'static [&'static str],
}

#[derive(Debug)]
pub struct EntityDef {
    pub name: &'static str,
    pub table: &'static str,
    pub path_segment: &'static str,
    /// Text columns in table order. `id`, `created_at` and `updated_at` are implicit.
    pub columns: &'static [ColumnDef],
    pub operations: &'static [Operation],
    pub filters: &'static [FilterDef],
    pub admin: AdminConfig,
}

/// Server-managed fields that request bodies may carry but never set.
pub const READ_ONLY_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

impl EntityDef {
    pub fn allows(&self, op: Operation) -> bool {
        self.operations.contains(&op)
    }

    /// Look up a column by JSON label or by column name.
    pub fn column(&self, key: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.label == key || c.name == key)
    }

    pub fn label_of(&self, column: &str) -> &'static str {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.label)
            .unwrap_or("")
    }
}

/// A stored record type. Implemented by [`Student`] and [`Employee`].
pub trait Entity:
    Serialize + Clone + Send + Sync + Unpin + for<'r> sqlx::FromRow<'r, PgRow> + 'static
{
    const DEF: &'static EntityDef;

    fn id(&self) -> i64;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;

    /// Text value of a column, by column name.
    fn field(&self, column: &str) -> Option<&str>;
    fn set_field(&mut self, column: &str, value: String);

    /// Human-readable name used in log lines.
    fn display_name(&self) -> &str;

    /// Build a record from a validated, complete field set.
    fn from_fields(id: i64, fields: &Fields, now: DateTime<Utc>) -> Self;

    fn touch(&mut self, now: DateTime<Utc>);
}
