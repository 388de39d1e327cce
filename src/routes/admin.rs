//! Admin directory routes: `GET /admin/{segment}/?q=`.

use super::route_with_slash;
use crate::entity::{Employee, Entity, Student};
use crate::handlers::admin::search;
use crate::state::{AppState, Resource};
use axum::{routing::get, Router};

fn directory<E: Entity>(resource: Resource<E>) -> Router {
    let path = format!("/admin/{}", E::DEF.path_segment);
    route_with_slash(Router::new(), &path, get(search::<E>)).with_state(resource)
}

pub fn admin_routes(state: &AppState) -> Router {
    Router::new()
        .merge(directory::<Student>(Resource::new(state.students.clone())))
        .merge(directory::<Employee>(Resource::new(state.employees.clone())))
}
