//! Admin directory handler: `?q=` search, display columns only.

use crate::entity::Entity;
use crate::error::AppError;
use crate::response::success_many;
use crate::service::Directory;
use crate::state::Resource;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub async fn search<E: Entity>(
    State(res): State<Resource<E>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let rows = Directory::search(res.store.as_ref(), &params.q).await?;
    Ok(success_many(rows))
}
