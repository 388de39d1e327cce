//! Resource handlers: list, read, create, replace (PUT), update (PATCH), delete.
//! Generic over the entity; which of them are mounted is decided by the entity's operations.

use crate::entity::Entity;
use crate::error::AppError;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{parse_id, CrudService, Mode};
use crate::state::Resource;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// Malformed or non-JSON bodies become the standard error body instead of axum's plain-text rejection.
/// A body cut off by the size limit keeps its 413.
fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    payload.map(|Json(v)| v).map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })
}

pub async fn list<E: Entity>(
    State(res): State<Resource<E>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list(res.store.as_ref(), &params).await?;
    Ok(success_many(rows))
}

pub async fn read<E: Entity>(
    State(res): State<Resource<E>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id::<E>(&id_str)?;
    let row = CrudService::read(res.store.as_ref(), id).await?;
    Ok(success_one_ok(row))
}

pub async fn create<E: Entity>(
    State(res): State<Resource<E>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(payload)?;
    let row = CrudService::create(res.store.as_ref(), body).await?;
    Ok(success_one(row))
}

pub async fn replace<E: Entity>(
    State(res): State<Resource<E>>,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id::<E>(&id_str)?;
    let body = json_body(payload)?;
    let row = CrudService::update(res.store.as_ref(), id, body, Mode::Full).await?;
    Ok(success_one_ok(row))
}

pub async fn update<E: Entity>(
    State(res): State<Resource<E>>,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id::<E>(&id_str)?;
    let body = json_body(payload)?;
    let row = CrudService::update(res.store.as_ref(), id, body, Mode::Partial).await?;
    Ok(success_one_ok(row))
}

pub async fn delete<E: Entity>(
    State(res): State<Resource<E>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id::<E>(&id_str)?;
    CrudService::delete(res.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
