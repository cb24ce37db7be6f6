//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for login, registration and
//! session management, and delegate the business logic to `auth::service`.

use crate::AppState;
use crate::api::common::{ApiError, ApiResponse};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::utils::cookies::{removal_cookie, token_cookie};
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use axum_extra::extract::{WithRejection, cookie::CookieJar};

/// Issue a token for a user whose credentials `verify_credentials` already checked
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    user_data: Option<Extension<UserData>>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginBody>, ApiError>,
) -> Result<(CookieJar, Json<ApiResponse<LoginData>>), ApiError> {
    let Some(Extension(user_data)) = user_data else {
        tracing::error!("Login reached without verified credentials");
        return Err(ApiError::internal());
    };

    // generate access token for user
    let token = AuthService::new(&state).issue_token(&user_data)?;
    tracing::info!("User {} logged in", user_data.id);

    let jar = jar.add(token_cookie(token.clone(), state.jwt.expires_in_seconds()));
    let response = LoginData {
        email: payload.email,
        token,
    };

    Ok((
        jar,
        Json(ApiResponse::success(response, "User logged in successfully")),
    ))
}

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<RegisterData>>), ApiError> {
    let data = AuthService::new(&state).register(payload).await?;

    let jar = jar.add(token_cookie(
        data.user.token.clone(),
        state.jwt.expires_in_seconds(),
    ));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::success(data, "User registered successfully")),
    ))
}

/// Clear the session cookie
#[axum::debug_handler]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    // Tokens are stateless; the client drops its copy along with the cookie.
    (
        jar.add(removal_cookie()),
        Json(ApiResponse::success((), "Logged out successfully")),
    )
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = AuthService::new(&state).current_user(&claims).await?;
    Ok(Json(ApiResponse::success(user, "User retrieved successfully")))
}
