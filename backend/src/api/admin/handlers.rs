//! Handler functions for the admin dashboard API endpoints.

use crate::AppState;
use crate::api::common::{ApiError, ApiResponse};
use crate::auth::models::UserSummary;
use crate::services::user_service::UserService;
use crate::utils::jwt::Claims;
use axum::extract::{Extension, Json};

/// Lists every registered user, newest first.
#[axum::debug_handler]
pub async fn list_users(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<UserSummary>>>, ApiError> {
    tracing::info!("Listing users for admin: {}", claims.user_id());

    let user_service = UserService::new(&state.pool, state.config.bcrypt_cost);
    let users = user_service
        .list_users()
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok(Json(ApiResponse::success(
        users,
        "Users retrieved successfully",
    )))
}
