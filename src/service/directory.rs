//! Admin directory: search over an entity's search fields, rows projected to
//! its display columns.

use crate::entity::Entity;
use crate::error::AppError;
use crate::filter;
use crate::store::RecordStore;
use serde_json::{Map, Value};

pub struct Directory;

impl Directory {
    pub async fn search<E: Entity>(store: &dyn RecordStore<E>, q: &str) -> Result<Vec<Value>, AppError> {
        let predicate = filter::search(&E::DEF.admin, q);
        let rows = store.list(&predicate).await?;
        Ok(rows.iter().map(Self::display_row).collect())
    }

    /// `id` plus each display column under its JSON label.
    pub fn display_row<E: Entity>(record: &E) -> Value {
        let def = E::DEF;
        let mut row = Map::new();
        row.insert("id".into(), Value::from(record.id()));
        for column in def.admin.list_display {
            let value = record.field(column).map(Value::from).unwrap_or(Value::Null);
            row.insert(def.label_of(column).to_string(), value);
        }
        Value::Object(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Student;
    use crate::service::Fields;
    use crate::store::MemoryStore;

    async fn seed(store: &MemoryStore<Student>, student_id: &str, name: &str) {
        let mut f = Fields::new();
        f.insert("student_id", student_id);
        f.insert("name", name);
        f.insert("branch", "CSE");
        store.insert(&f).await.unwrap();
    }

    #[tokio::test]
    async fn search_matches_student_id_substring() {
        let store = MemoryStore::<Student>::new();
        seed(&store, "CS-101", "Ravi").await;
        seed(&store, "ME-202", "Meera").await;

        let rows = Directory::search::<Student>(&store, "cs").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["student_id"], "CS-101");
    }

    #[tokio::test]
    async fn search_does_not_look_at_display_only_fields() {
        let store = MemoryStore::<Student>::new();
        seed(&store, "CS-101", "Ravi").await;
        assert!(Directory::search::<Student>(&store, "ravi").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rows_carry_only_display_columns() {
        let store = MemoryStore::<Student>::new();
        seed(&store, "CS-101", "Ravi").await;
        let rows = Directory::search::<Student>(&store, "").await.unwrap();
        let obj = rows[0].as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["Branch", "Name", "id", "student_id"]);
    }
}
