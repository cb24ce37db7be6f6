//! Middleware for protecting authenticated routes and handling authorization.
//!
//! This module contains the credential check that runs ahead of the login
//! controller, token validation for session routes and the admin role gate.

use crate::AppState;
use crate::api::common::ApiError;
use crate::auth::models::LoginRequest;
use crate::auth::service::AuthService;
use crate::errors::format_validation_errors;
use crate::utils::cookies::TOKEN_COOKIE;
use crate::utils::jwt::Claims;
use axum::{
    Json,
    body::{Body, to_bytes},
    extract::{Extension, FromRequest, Request},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

/// Upper bound on a buffered login body.
const MAX_CREDENTIALS_BODY_BYTES: usize = 64 * 1024;

/// Verifies the email/password in a login body and attaches `UserData`.
///
/// The body is buffered and parsed with the same `Json` rules the controller
/// applies, Content-Type included, then handed on unchanged so the controller
/// can read it again.
pub async fn verify_credentials(
    Extension(state): Extension<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_CREDENTIALS_BODY_BYTES)
        .await
        .map_err(|_| ApiError::bad_request("Request body too large or unreadable"))?;

    let buffered = Request::from_parts(parts.clone(), Body::from(bytes.clone()));
    let Json(credentials) = Json::<LoginRequest>::from_request(buffered, &()).await?;

    if let Err(validation_errors) = credentials.validate() {
        return Err(ApiError::bad_request(format_validation_errors(
            &validation_errors,
        )));
    }

    let user_data = AuthService::new(&state)
        .verify_credentials(&credentials)
        .await
        .inspect_err(|e| tracing::warn!("Rejected login for {}: {}", credentials.email, e))?;

    let mut request = Request::from_parts(parts, Body::from(bytes));
    request.extensions_mut().insert(user_data);
    Ok(next.run(request).await)
}

/// JWT authentication middleware.
///
/// Accepts the token from `Authorization: Bearer` or from the `token` cookie.
pub async fn jwt_auth(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request)
        .or_else(|| jar.get(TOKEN_COOKIE).map(|cookie| cookie.value().to_string()))
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

    let (claims, _user) = AuthService::new(&state)
        .authenticate_token(&token)
        .await
        .map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            ApiError::from(e)
        })?;

    // Add claims to request extensions for use in handlers
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admin role authorization middleware. Must run after `jwt_auth`.
pub async fn admin_auth(request: Request, next: Next) -> Result<Response, ApiError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

    if !claims.is_admin() {
        return Err(ApiError::forbidden("Admin role required"));
    }

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
