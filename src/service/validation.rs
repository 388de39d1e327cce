//! Request validation: JSON body -> checked field set, driven by column definitions.

use crate::entity::{EntityDef, READ_ONLY_FIELDS};
use crate::error::AppError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Whether every column must be supplied (create, PUT) or only some (PATCH).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Full,
    Partial,
}

/// Validated column values keyed by column name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fields(BTreeMap<&'static str, String>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: &'static str, value: impl Into<String>) {
        self.0.insert(column, value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Owned value of a column, empty when absent.
    pub fn text(&self, column: &str) -> String {
        self.get(column).unwrap_or_default().to_string()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a request body against the entity's columns.
    /// Keys may be JSON labels or column names; read-only and unknown keys are skipped.
    pub fn fields_from_body(def: &EntityDef, body: Value, mode: Mode) -> Result<Fields, AppError> {
        let Value::Object(map) = body else {
            return Err(AppError::BadRequest("body must be a JSON object".into()));
        };
        let mut fields = Fields::new();
        for (key, value) in map {
            if READ_ONLY_FIELDS.contains(&key.as_str()) {
                continue;
            }
            let Some(col) = def.column(&key) else { continue };
            let s = match value {
                Value::String(s) => s,
                Value::Null => {
                    return Err(AppError::Validation(format!("{} may not be null", col.label)))
                }
                _ => return Err(AppError::Validation(format!("{} must be a string", col.label))),
            };
            let s = s.trim();
            if s.is_empty() {
                return Err(AppError::Validation(format!("{} may not be blank", col.label)));
            }
            if s.chars().count() > col.max_length {
                return Err(AppError::Validation(format!(
                    "{} must be at most {} characters",
                    col.label, col.max_length
                )));
            }
            fields.insert(col.name, s);
        }
        if mode == Mode::Full {
            for col in def.columns {
                if fields.get(col.name).is_none() {
                    return Err(AppError::Validation(format!("{} is required", col.label)));
                }
            }
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::employee::EMPLOYEE;
    use crate::entity::student::STUDENT;
    use serde_json::json;

    fn validation_message(r: Result<Fields, AppError>) -> String {
        match r {
            Err(AppError::Validation(m)) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn full_payload_maps_labels_to_columns() {
        let body = json!({"emp_id": "E1", "emp_name": "Asha", "Designation": "Engineer"});
        let fields = RequestValidator::fields_from_body(&EMPLOYEE, body, Mode::Full).unwrap();
        assert_eq!(fields.get("designation"), Some("Engineer"));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn column_names_are_accepted_too() {
        let body = json!({"student_id": "S1", "name": "Ravi", "branch": "CSE"});
        let fields = RequestValidator::fields_from_body(&STUDENT, body, Mode::Full).unwrap();
        assert_eq!(fields.get("name"), Some("Ravi"));
    }

    #[test]
    fn missing_field_is_rejected_on_full() {
        let body = json!({"emp_id": "E1", "emp_name": "Asha"});
        let msg = validation_message(RequestValidator::fields_from_body(&EMPLOYEE, body, Mode::Full));
        assert_eq!(msg, "Designation is required");
    }

    #[test]
    fn partial_allows_subset() {
        let body = json!({"emp_name": "Asha K"});
        let fields = RequestValidator::fields_from_body(&EMPLOYEE, body, Mode::Partial).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("emp_name"), Some("Asha K"));
    }

    #[test]
    fn blank_and_non_string_values_are_rejected() {
        let msg = validation_message(RequestValidator::fields_from_body(
            &EMPLOYEE,
            json!({"emp_name": "   "}),
            Mode::Partial,
        ));
        assert_eq!(msg, "emp_name may not be blank");

        let msg = validation_message(RequestValidator::fields_from_body(
            &EMPLOYEE,
            json!({"emp_id": 12}),
            Mode::Partial,
        ));
        assert_eq!(msg, "emp_id must be a string");
    }

    #[test]
    fn max_length_comes_from_column() {
        let body = json!({"emp_id": "E".repeat(21)});
        let msg = validation_message(RequestValidator::fields_from_body(&EMPLOYEE, body, Mode::Partial));
        assert_eq!(msg, "emp_id must be at most 20 characters");
    }

    #[test]
    fn read_only_and_unknown_keys_are_skipped() {
        let body = json!({"id": 99, "created_at": "x", "salary": 10, "emp_name": "Asha"});
        let fields = RequestValidator::fields_from_body(&EMPLOYEE, body, Mode::Partial).unwrap();
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn non_object_body_is_bad_request() {
        let r = RequestValidator::fields_from_body(&EMPLOYEE, json!([1, 2]), Mode::Full);
        assert!(matches!(r, Err(AppError::BadRequest(_))));
    }
}
