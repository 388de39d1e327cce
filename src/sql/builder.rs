//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from an entity definition.

use super::params::BindValue;
use crate::entity::EntityDef;
use crate::filter::Predicate;
use crate::service::Fields;

/// Quote identifier for PostgreSQL (safe: only from static definitions).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub(crate) fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> u32 {
        self.params.push(v);
        self.params.len() as u32
    }
}

/// `id`, text columns in definition order, then timestamps.
fn select_column_list(def: &EntityDef) -> String {
    std::iter::once("id")
        .chain(def.columns.iter().map(|c| c.name))
        .chain(["created_at", "updated_at"])
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a predicate as SQL, pushing its values as params.
fn render_predicate(q: &mut QueryBuf, p: &Predicate) -> String {
    match p {
        Predicate::All(ps) if ps.is_empty() => "TRUE".into(),
        Predicate::Any(ps) if ps.is_empty() => "FALSE".into(),
        Predicate::All(ps) => {
            let parts: Vec<String> = ps.iter().map(|p| render_predicate(q, p)).collect();
            format!("({})", parts.join(" AND "))
        }
        Predicate::Any(ps) => {
            let parts: Vec<String> = ps.iter().map(|p| render_predicate(q, p)).collect();
            format!("({})", parts.join(" OR "))
        }
        Predicate::IExact { column, value } => {
            let n = q.push_param(BindValue::Text(value.clone()));
            format!("lower({}) = lower(${})", quoted(column), n)
        }
        Predicate::IContains { column, value } => {
            let n = q.push_param(BindValue::Text(value.clone()));
            format!("strpos(lower({}), lower(${})) > 0", quoted(column), n)
        }
    }
}

/// SELECT by primary key.
pub fn select_by_id(def: &EntityDef, schema: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, def.table);
    let n = q.push_param(BindValue::BigInt(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(def),
        table,
        quoted("id"),
        n
    );
    q
}

/// SELECT rows satisfying the predicate, ORDER BY id (insertion order).
pub fn select_list(def: &EntityDef, schema: &str, predicate: &Predicate) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, def.table);
    let where_clause = if predicate.is_always() {
        String::new()
    } else {
        format!(" WHERE {}", render_predicate(&mut q, predicate))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        select_column_list(def),
        table,
        where_clause,
        quoted("id")
    );
    q
}

/// INSERT the supplied columns; id and timestamps come from column defaults.
pub fn insert(def: &EntityDef, schema: &str, fields: &Fields) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, def.table);
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in def.columns {
        let Some(v) = fields.get(c.name) else { continue };
        let n = q.push_param(BindValue::Text(v.to_string()));
        cols.push(quoted(c.name));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(def)
    );
    q
}

/// UPDATE by id: SET only supplied columns, and always advance updated_at.
/// `GREATEST` keeps updated_at strictly increasing even within one clock tick.
pub fn update(def: &EntityDef, schema: &str, id: i64, fields: &Fields) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, def.table);
    let mut sets = Vec::new();
    for c in def.columns {
        let Some(v) = fields.get(c.name) else { continue };
        let n = q.push_param(BindValue::Text(v.to_string()));
        sets.push(format!("{} = ${}", quoted(c.name), n));
    }
    let updated_at = quoted("updated_at");
    sets.push(format!(
        "{0} = GREATEST(NOW(), {0} + INTERVAL '1 microsecond')",
        updated_at
    ));
    let id_param = q.push_param(BindValue::BigInt(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        table,
        sets.join(", "),
        quoted("id"),
        id_param,
        select_column_list(def)
    );
    q
}

/// DELETE by id.
pub fn delete(def: &EntityDef, schema: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, def.table);
    let n = q.push_param(BindValue::BigInt(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        table,
        quoted("id"),
        n,
        select_column_list(def)
    );
    q
}
