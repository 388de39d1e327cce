use super::{AdminConfig, ColumnDef, Entity, EntityDef, Operation};
use crate::service::Fields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STUDENT: EntityDef = EntityDef {
    name: "student",
    table: "students",
    path_segment: "students",
    columns: &[
        ColumnDef { name: "student_id", label: "student_id", max_length: 10 },
        ColumnDef { name: "name", label: "Name", max_length: 50 },
        ColumnDef { name: "branch", label: "Branch", max_length: 50 },
    ],
    operations: &[Operation::List, Operation::Retrieve],
    filters: &[],
    admin: AdminConfig {
        list_display: &["student_id", "name", "branch"],
        search_fields: &["student_id"],
    },
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub student_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Branch")]
    pub branch: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Student {
    const DEF: &'static EntityDef = &STUDENT;

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
            "student_id" => Some(&self.student_id),
            "name" => Some(&self.name),
            "branch" => Some(&self.branch),
            _ => None,
        }
    }

    fn set_field(&mut self, column: &str, value: String) {
        match column {
            "student_id" => self.student_id = value,
            "name" => self.name = value,
            "branch" => self.branch = value,
            _ => {}
        }
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn from_fields(id: i64, fields: &Fields, now: DateTime<Utc>) -> Self {
        Student {
            id,
            student_id: fields.text("student_id"),
            name: fields.text("name"),
            branch: fields.text("branch"),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
