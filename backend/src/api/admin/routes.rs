//! Defines the HTTP routes for the admin dashboard.
//!
//! Every route requires a valid token whose role is admin.

use super::handlers::list_users;
use crate::auth::middleware::{admin_auth, jwt_auth};
use axum::{Router, middleware, routing::get};

pub fn admin_router() -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn(admin_auth))
        .route_layer(middleware::from_fn(jwt_auth))
}
