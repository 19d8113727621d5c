//! Data Design: product/profile/favorite REST backend.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use config::Settings;
pub use error::AppError;
pub use migration::apply_migrations;
pub use model::{Favorite, Product, Profile};
pub use routes::{common_routes, common_routes_with_ready, resource_routes};
pub use state::AppState;
pub use store::{FavoriteStore, ProductStore, ProfileStore};

use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Assemble the full application router: operational routes, the two entity
/// resources, verb override, and a request body cap.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(resource_routes(state))
        .layer(axum::middleware::from_fn(middleware::method_override))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}
