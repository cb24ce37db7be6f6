//! Data structures for authentication-related entities.
//!
//! This module defines the request and response payloads of the auth
//! endpoints, plus the `UserData` the credential middleware attaches to a
//! login request.

use crate::database::models::{Role, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Must be a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// The part of the login body the controller reads once credentials are verified
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
}

/// Registration request payload
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

/// Verified identity attached to the request by `verify_credentials`
#[derive(Debug, Clone)]
pub struct UserData {
    pub id: String,
    /// Stored password hash
    pub pwd: String,
    pub role: Role,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            pwd: user.password_hash.clone(),
            role: user.role,
        }
    }
}

/// Login response data
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginData {
    pub email: String,
    pub token: String,
}

/// Registration response data
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterData {
    pub user: RegisteredUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Current user returned by `/user/me`
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Row of the admin dashboard user list
#[derive(Debug, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}
