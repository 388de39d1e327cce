//! Generic resource operations over any record store: validation, not-found
//! mapping and lifecycle logging.

use super::validation::{Mode, RequestValidator};
use crate::entity::Entity;
use crate::error::AppError;
use crate::filter;
use crate::store::RecordStore;
use serde_json::Value;
use std::collections::HashMap;

pub struct CrudService;

impl CrudService {
    /// List records, narrowed by the entity's declared filters.
    pub async fn list<E: Entity>(
        store: &dyn RecordStore<E>,
        params: &HashMap<String, String>,
    ) -> Result<Vec<E>, AppError> {
        let predicate = filter::from_query(E::DEF.filters, params);
        store.list(&predicate).await
    }

    pub async fn read<E: Entity>(store: &dyn RecordStore<E>, id: i64) -> Result<E, AppError> {
        store.get(id).await?.ok_or_else(|| not_found::<E>(id))
    }

    pub async fn create<E: Entity>(store: &dyn RecordStore<E>, body: Value) -> Result<E, AppError> {
        let fields = RequestValidator::fields_from_body(E::DEF, body, Mode::Full)?;
        let record = store.insert(&fields).await?;
        tracing::info!(
            entity = E::DEF.name,
            id = record.id(),
            name = record.display_name(),
            "record created"
        );
        Ok(record)
    }

    /// `Mode::Full` for PUT, `Mode::Partial` for PATCH.
    pub async fn update<E: Entity>(
        store: &dyn RecordStore<E>,
        id: i64,
        body: Value,
        mode: Mode,
    ) -> Result<E, AppError> {
        let fields = RequestValidator::fields_from_body(E::DEF, body, mode)?;
        let record = store.update(id, &fields).await?.ok_or_else(|| not_found::<E>(id))?;
        tracing::info!(entity = E::DEF.name, id, changed = fields.len(), "record updated");
        Ok(record)
    }

    pub async fn delete<E: Entity>(store: &dyn RecordStore<E>, id: i64) -> Result<(), AppError> {
        let record = store.delete(id).await?.ok_or_else(|| not_found::<E>(id))?;
        tracing::info!(
            entity = E::DEF.name,
            id,
            name = record.display_name(),
            "record deleted"
        );
        Ok(())
    }
}

/// Path keys are plain ASCII digits; signs, whitespace or anything else cannot name a record.
pub fn parse_id<E: Entity>(id_str: &str) -> Result<i64, AppError> {
    let not_numeric = || AppError::NotFound(format!("{} '{}'", E::DEF.name, id_str));
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_numeric());
    }
    id_str.parse().map_err(|_| not_numeric())
}

fn not_found<E: Entity>(id: i64) -> AppError {
    AppError::NotFound(format!("{} {}", E::DEF.name, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Employee, Student};
    use crate::store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn create_then_read_round_trips_fields() {
        let store = MemoryStore::<Employee>::new();
        let created = CrudService::create::<Employee>(
            &store,
            json!({"emp_id": "E1", "emp_name": "Asha", "Designation": "Engineer"}),
        )
        .await
        .unwrap();
        let read = CrudService::read::<Employee>(&store, created.id).await.unwrap();
        assert_eq!(read, created);
        assert_eq!(read.designation, "Engineer");
    }

    #[tokio::test]
    async fn invalid_create_leaves_store_untouched() {
        let store = MemoryStore::<Employee>::new();
        let err = CrudService::create::<Employee>(&store, json!({"emp_id": "E1"})).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let all = CrudService::list::<Employee>(&store, &HashMap::new()).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn put_requires_every_field_patch_does_not() {
        let store = MemoryStore::<Employee>::new();
        let e = CrudService::create::<Employee>(
            &store,
            json!({"emp_id": "E1", "emp_name": "Asha", "Designation": "Engineer"}),
        )
        .await
        .unwrap();

        let err = CrudService::update::<Employee>(&store, e.id, json!({"emp_name": "A"}), Mode::Full)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let patched = CrudService::update::<Employee>(&store, e.id, json!({"emp_name": "A"}), Mode::Partial)
            .await
            .unwrap();
        assert_eq!(patched.emp_name, "A");
        assert_eq!(patched.emp_id, "E1");
    }

    #[tokio::test]
    async fn unknown_keys_are_not_found() {
        let students = MemoryStore::<Student>::new();
        assert!(matches!(
            CrudService::read::<Student>(&students, 5).await,
            Err(AppError::NotFound(_))
        ));
        let employees = MemoryStore::<Employee>::new();
        assert!(matches!(
            CrudService::delete::<Employee>(&employees, 5).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn non_numeric_id_is_not_found() {
        assert!(matches!(parse_id::<Student>("abc"), Err(AppError::NotFound(_))));
        assert_eq!(parse_id::<Student>("12").unwrap(), 12);
        for signed in ["+1", "-1", " 1", ""] {
            assert!(matches!(parse_id::<Student>(signed), Err(AppError::NotFound(_))), "{:?}", signed);
        }
    }
}
