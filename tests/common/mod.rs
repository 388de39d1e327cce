#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use roster::{
    app, AppState, Employee, Entity, Mode, RecordStore, RequestValidator, ServerConfig, StoreKind, Student,
};
use serde_json::{json, Value};
use tower::ServiceExt;

pub struct TestContext {
    pub state: AppState,
    pub app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_state(AppState::in_memory(), &memory_config())
    }

    pub fn with_state(state: AppState, config: &ServerConfig) -> Self {
        let app = app(state.clone(), config);
        TestContext { state, app }
    }

    /// Send a request; returns the status and the JSON body (`Null` when empty).
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn seed_student(&self, student_id: &str, name: &str, branch: &str) -> Student {
        let fields = RequestValidator::fields_from_body(
            Student::DEF,
            json!({"student_id": student_id, "Name": name, "Branch": branch}),
            Mode::Full,
        )
        .unwrap();
        self.state.students.insert(&fields).await.unwrap()
    }

    pub async fn seed_employee(&self, emp_id: &str, emp_name: &str, designation: &str) -> Employee {
        let fields = RequestValidator::fields_from_body(
            Employee::DEF,
            json!({"emp_id": emp_id, "emp_name": emp_name, "Designation": designation}),
            Mode::Full,
        )
        .unwrap();
        self.state.employees.insert(&fields).await.unwrap()
    }
}

pub fn memory_config() -> ServerConfig {
    ServerConfig {
        store: StoreKind::Memory,
        ..ServerConfig::default()
    }
}

pub fn ids(list_body: &Value) -> Vec<i64> {
    list_body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}
