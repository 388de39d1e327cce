//! Resource routes built from the entity definition: `/{segment}` and `/{segment}/:id`,
//! each with and without a trailing slash. Only operations the entity allows are
//! mounted, so anything else answers 405.

use super::route_with_slash;
use crate::entity::{Entity, Operation};
use crate::handlers::entity::{create, delete, list, read, replace, update};
use crate::state::Resource;
use axum::{routing::MethodRouter, Router};

pub fn entity_routes<E: Entity>(resource: Resource<E>) -> Router {
    let def = E::DEF;

    let mut collection = MethodRouter::new();
    if def.allows(Operation::List) {
        collection = collection.get(list::<E>);
    }
    if def.allows(Operation::Create) {
        collection = collection.post(create::<E>);
    }

    let mut item = MethodRouter::new();
    if def.allows(Operation::Retrieve) {
        item = item.get(read::<E>);
    }
    if def.allows(Operation::Update) {
        item = item.put(replace::<E>).patch(update::<E>);
    }
    if def.allows(Operation::Delete) {
        item = item.delete(delete::<E>);
    }

    let base = format!("/{}", def.path_segment);
    let router = route_with_slash(Router::new(), &base, collection);
    let router = route_with_slash(router, &format!("{}/:id", base), item);
    router.with_state(resource)
}
