//! Shared application state: one record store per entity.

use crate::config::{ServerConfig, StoreKind};
use crate::entity::{Employee, Entity, Student};
use crate::error::AppError;
use crate::migration::apply_migrations;
use crate::store::{ensure_database_exists, MemoryStore, PgStore, RecordStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn RecordStore<Student>>,
    pub employees: Arc<dyn RecordStore<Employee>>,
}

impl AppState {
    pub fn in_memory() -> Self {
        AppState {
            students: Arc::new(MemoryStore::<Student>::new()),
            employees: Arc::new(MemoryStore::<Employee>::new()),
        }
    }

    pub fn postgres(store: PgStore) -> Self {
        let store = Arc::new(store);
        AppState {
            students: store.clone(),
            employees: store,
        }
    }

    /// Open the configured backend. For PostgreSQL this creates the database if
    /// missing and applies migrations.
    pub async fn connect(config: &ServerConfig) -> Result<Self, AppError> {
        match config.store {
            StoreKind::Memory => {
                tracing::info!("using in-memory store");
                Ok(Self::in_memory())
            }
            StoreKind::Postgres => {
                ensure_database_exists(&config.database_url).await?;
                let pool = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(&config.database_url)
                    .await?;
                apply_migrations(&pool, &config.schema).await?;
                Ok(Self::postgres(PgStore::new(pool, config.schema.clone())))
            }
        }
    }
}

/// Per-resource state handed to the generic handlers.
pub struct Resource<E: Entity> {
    pub store: Arc<dyn RecordStore<E>>,
}

impl<E: Entity> Resource<E> {
    pub fn new(store: Arc<dyn RecordStore<E>>) -> Self {
        Resource { store }
    }
}

impl<E: Entity> Clone for Resource<E> {
    fn clone(&self) -> Self {
        Resource {
            store: Arc::clone(&self.store),
        }
    }
}
