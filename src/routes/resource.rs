//! Entity resource routes. Each resource maps the four verbs onto its handlers;
//! anything else is refused by the method router.

use axum::{routing::get, Router};

use crate::handlers::{product, profile};
use crate::state::AppState;

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/product",
            get(product::index)
                .post(product::create)
                .put(product::update)
                .delete(product::destroy),
        )
        .route(
            "/profile",
            get(profile::index)
                .post(profile::create)
                .put(profile::update)
                .delete(profile::destroy),
        )
        .with_state(state)
}
