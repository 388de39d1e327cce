//! Values bound to builder-produced queries.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

/// A value that can be bound to a PostgreSQL query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    BigInt(i64),
    Text(String),
}

/// Bind every param in order.
pub fn bind_all<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p {
            BindValue::BigInt(n) => query.bind(*n),
            BindValue::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}
