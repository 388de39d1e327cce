//! Router assembly: common routes and the admin directory at the root, resources
//! (and the blog/comment stubs) under the configured API prefix.

mod admin;
mod common;
mod entity;

pub use admin::admin_routes;
pub use common::common_routes;
pub use entity::entity_routes;

use crate::config::ServerConfig;
use crate::entity::{Employee, Student};
use crate::handlers::not_implemented;
use crate::state::{AppState, Resource};
use axum::{
    routing::{any, MethodRouter},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Mount `method_router` at `path` and at `path/`.
pub(crate) fn route_with_slash<S>(router: Router<S>, path: &str, method_router: MethodRouter<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .route(path, method_router.clone())
        .route(&format!("{}/", path), method_router)
}

/// `/blogs` and `/comments` are routed but answer 501.
pub fn stub_routes() -> Router {
    let router = route_with_slash(Router::new(), "/blogs", any(not_implemented));
    route_with_slash(router, "/comments", any(not_implemented))
}

pub fn api_routes(state: &AppState) -> Router {
    Router::new()
        .merge(entity_routes::<Student>(Resource::new(state.students.clone())))
        .merge(entity_routes::<Employee>(Resource::new(state.employees.clone())))
        .merge(stub_routes())
}

/// The full application router.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let api = api_routes(&state);
    let router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(admin_routes(&state));
    let router = if config.api_prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(&config.api_prefix, api)
    };
    router
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.body_limit))
}
