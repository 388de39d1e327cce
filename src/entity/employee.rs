use super::{AdminConfig, ColumnDef, Entity, EntityDef, Operation};
use crate::filter::{FilterDef, Lookup};
use crate::service::Fields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const EMPLOYEE: EntityDef = EntityDef {
    name: "employee",
    table: "employees",
    path_segment: "employees",
    columns: &[
        ColumnDef { name: "emp_id", label: "emp_id", max_length: 20 },
        ColumnDef { name: "emp_name", label: "emp_name", max_length: 50 },
        ColumnDef { name: "designation", label: "Designation", max_length: 50 },
    ],
    operations: &[
        Operation::List,
        Operation::Retrieve,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ],
    filters: &[FilterDef {
        name: "designation",
        column: "designation",
        lookup: Lookup::IExact,
    }],
    admin: AdminConfig {
        list_display: &["emp_id", "emp_name", "designation"],
        search_fields: &["emp_id"],
    },
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub emp_id: String,
    pub emp_name: String,
    #[serde(rename = "Designation")]
    pub designation: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Employee {
    const DEF: &'static EntityDef = &EMPLOYEE;

    fn id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn field(&self, column: &str) -> Option<&str> {
        match column {
            "emp_id" => Some(&self.emp_id),
            "emp_name" => Some(&self.emp_name),
            "designation" => Some(&self.designation),
            _ => None,
        }
    }

    fn set_field(&mut self, column: &str, value: String) {
        match column {
            "emp_id" => self.emp_id = value,
            "emp_name" => self.emp_name = value,
            "designation" => self.designation = value,
            _ => {}
        }
    }

    fn display_name(&self) -> &str {
        &self.emp_name
    }

    fn from_fields(id: i64, fields: &Fields, now: DateTime<Utc>) -> Self {
        Employee {
            id,
            emp_id: fields.text("emp_id"),
            emp_name: fields.text("emp_name"),
            designation: fields.text("designation"),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup_accepts_label_and_name() {
        assert_eq!(EMPLOYEE.column("Designation").map(|c| c.name), Some("designation"));
        assert_eq!(EMPLOYEE.column("designation").map(|c| c.name), Some("designation"));
        assert!(EMPLOYEE.column("salary").is_none());
    }

    #[test]
    fn serializes_with_designation_label() {
        let now = Utc::now();
        let e = Employee {
            id: 7,
            emp_id: "E1".into(),
            emp_name: "Asha".into(),
            designation: "Engineer".into(),
            created_at: now,
            updated_at: now,
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["Designation"], "Engineer");
        assert_eq!(v["emp_name"], "Asha");
        assert_eq!(v["id"], 7);
        assert!(v.get("designation").is_none());
    }
}
