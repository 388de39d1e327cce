use super::RecordStore;
use crate::entity::Entity;
use crate::error::AppError;
use crate::filter::Predicate;
use crate::service::Fields;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct Table<E> {
    next_id: i64,
    rows: BTreeMap<i64, E>,
}

/// In-process store. Keys increase monotonically, so map order is insertion order.
pub struct MemoryStore<E> {
    table: RwLock<Table<E>>,
}

impl<E> MemoryStore<E> {
    pub fn new() -> Self {
        MemoryStore {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table<E>>, AppError> {
        self.table
            .read()
            .map_err(|_| AppError::Internal("record table lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table<E>>, AppError> {
        self.table
            .write()
            .map_err(|_| AppError::Internal("record table lock poisoned".into()))
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Current time, bumped past `prev` if the clock has not moved.
fn next_timestamp(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > prev {
        now
    } else {
        prev + Duration::microseconds(1)
    }
}

#[async_trait]
impl<E: Entity> RecordStore<E> for MemoryStore<E> {
    async fn insert(&self, fields: &Fields) -> Result<E, AppError> {
        let mut table = self.write()?;
        let id = table.next_id;
        table.next_id += 1;
        let record = E::from_fields(id, fields, Utc::now());
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: i64) -> Result<Option<E>, AppError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn list(&self, predicate: &Predicate) -> Result<Vec<E>, AppError> {
        let table = self.read()?;
        Ok(table
            .rows
            .values()
            .filter(|r| predicate.matches(*r))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, fields: &Fields) -> Result<Option<E>, AppError> {
        let mut table = self.write()?;
        let Some(record) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        for (column, value) in fields.iter() {
            record.set_field(column, value.to_string());
        }
        let now = next_timestamp(record.updated_at());
        record.touch(now);
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: i64) -> Result<Option<E>, AppError> {
        Ok(self.write()?.rows.remove(&id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
