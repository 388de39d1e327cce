//! Roster: student and employee record service with filtered CRUD resources.

pub mod config;
pub mod entity;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreKind};
pub use entity::{Employee, Entity, EntityDef, Student};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use response::{success_many, success_one, success_one_ok};
pub use routes::{app, common_routes, entity_routes};
pub use service::{CrudService, Directory, Fields, Mode, RequestValidator};
pub use state::{AppState, Resource};
pub use store::{ensure_database_exists, MemoryStore, PgStore, RecordStore};
