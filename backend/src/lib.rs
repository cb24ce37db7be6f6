//! Storefront backend and client.
//!
//! The server side issues signed session tokens for the storefront: users
//! register and log in through `/user`, and the admin dashboard reads the user
//! list through `/admin`. The `client` module is the consuming side of those
//! endpoints used by the sign-up and sign-in forms.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;

use crate::api::common::ApiResponse;
use crate::config::Config;
use crate::utils::jwt::JwtUtils;
use axum::{
    Extension, Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::Json,
    routing::get,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared handles cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub jwt: JwtUtils,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let jwt = JwtUtils::new(&config);
        Self {
            pool,
            config: Arc::new(config),
            jwt,
        }
    }
}

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.cors_allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route("/", get(root_handler))
        .nest("/user", auth::routes::auth_router())
        .nest("/admin", api::admin::routes::admin_router())
        .layer(Extension(state))
        .layer(cors)
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Storefront Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the Storefront API",
    ))
}
