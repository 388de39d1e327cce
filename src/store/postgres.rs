use super::RecordStore;
use crate::entity::Entity;
use crate::error::{AppError, ConfigError};
use crate::filter::Predicate;
use crate::service::Fields;
use crate::sql::{self, bind_all, QueryBuf};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// PostgreSQL-backed store. All entity tables live in one schema.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
        }
    }

    async fn fetch_optional<E: Entity>(&self, q: &QueryBuf) -> Result<Option<E>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let query = bind_all(sqlx::query_as::<_, E>(&q.sql), &q.params);
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn fetch_all<E: Entity>(&self, q: &QueryBuf) -> Result<Vec<E>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let query = bind_all(sqlx::query_as::<_, E>(&q.sql), &q.params);
        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl<E: Entity> RecordStore<E> for PgStore {
    async fn insert(&self, fields: &Fields) -> Result<E, AppError> {
        let q = sql::insert(E::DEF, &self.schema, fields);
        self.fetch_optional(&q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn get(&self, id: i64) -> Result<Option<E>, AppError> {
        let q = sql::select_by_id(E::DEF, &self.schema, id);
        self.fetch_optional(&q).await
    }

    async fn list(&self, predicate: &Predicate) -> Result<Vec<E>, AppError> {
        let q = sql::select_list(E::DEF, &self.schema, predicate);
        self.fetch_all(&q).await
    }

    async fn update(&self, id: i64, fields: &Fields) -> Result<Option<E>, AppError> {
        let q = sql::update(E::DEF, &self.schema, id, fields);
        self.fetch_optional(&q).await
    }

    async fn delete(&self, id: i64) -> Result<Option<E>, AppError> {
        let q = sql::delete(E::DEF, &self.schema, id);
        self.fetch_optional(&q).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Create the target database when it does not exist yet, by connecting to the
/// `postgres` maintenance database on the same server.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = split_db_name(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `postgres://host/db?opts` into the maintenance URL and `db`.
fn split_db_name(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::DatabaseUrl("no database path".into()))?;
    let (base, rest) = url.split_at(path_start);
    let (db_name, query) = match rest.split_once('?') {
        Some((db, q)) => (db, Some(q)),
        None => (rest, None),
    };
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.trim().to_string()))
}
