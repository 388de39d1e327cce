//! HTTP handlers for entity resources, the admin directory and unimplemented stubs.

pub mod admin;
pub mod entity;

use crate::error::AppError;
use axum::http::Uri;

/// Routed but without defined behavior (blogs, comments).
pub async fn not_implemented(uri: Uri) -> AppError {
    AppError::NotImplemented(uri.path().to_string())
}
