mod common;

use axum::http::StatusCode;
use common::{ids, TestContext};
use serde_json::json;

#[tokio::test]
async fn list_returns_students_in_insertion_order() {
    let ctx = TestContext::new();
    let a = ctx.seed_student("S1", "Ravi", "CSE").await;
    let b = ctx.seed_student("S2", "Meera", "ECE").await;
    let c = ctx.seed_student("S1", "Anil", "ME").await;

    let (status, body) = ctx.get("/api/students/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![a.id, b.id, c.id]);
    assert_eq!(body["meta"]["count"], 3);
}

#[tokio::test]
async fn detail_uses_labelled_fields() {
    let ctx = TestContext::new();
    let s = ctx.seed_student("S1", "Ravi", "CSE").await;

    let (status, body) = ctx.get(&format!("/api/students/{}/", s.id)).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_object().unwrap();
    assert_eq!(data["id"], s.id);
    assert_eq!(data["student_id"], "S1");
    assert_eq!(data["Name"], "Ravi");
    assert_eq!(data["Branch"], "CSE");
    assert!(data.contains_key("created_at"));
    assert!(data.contains_key("updated_at"));
    assert_eq!(data.len(), 6);
}

#[tokio::test]
async fn unknown_student_is_not_found() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/students/1/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(ctx.get("/api/students/first/").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn signed_key_does_not_resolve() {
    let ctx = TestContext::new();
    let s = ctx.seed_student("S1", "Ravi", "CSE").await;
    assert_eq!(ctx.get(&format!("/api/students/{}/", s.id)).await.0, StatusCode::OK);
    for uri in ["/api/students/+1/", "/api/students/-1/", "/api/students/%2B1/"] {
        assert_eq!(ctx.get(uri).await.0, StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn student_resource_is_read_only() {
    let ctx = TestContext::new();
    let s = ctx.seed_student("S1", "Ravi", "CSE").await;

    let (status, _) = ctx
        .request("POST", "/api/students/", Some(json!({"student_id": "S2", "Name": "X", "Branch": "Y"})))
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let uri = format!("/api/students/{}/", s.id);
    assert_eq!(
        ctx.request("PATCH", &uri, Some(json!({"Name": "X"}))).await.0,
        StatusCode::METHOD_NOT_ALLOWED
    );
    assert_eq!(ctx.request("DELETE", &uri, None).await.0, StatusCode::METHOD_NOT_ALLOWED);

    let (_, body) = ctx.get(&uri).await;
    assert_eq!(body["data"]["Name"], "Ravi");
}

#[tokio::test]
async fn student_list_ignores_query_filters() {
    let ctx = TestContext::new();
    ctx.seed_student("S1", "Ravi", "CSE").await;
    ctx.seed_student("S2", "Meera", "ECE").await;
    let (_, body) = ctx.get("/api/students/?Branch=CSE&designation=x").await;
    assert_eq!(body["meta"]["count"], 2);
}
