//! Core business logic for the authentication system.

use crate::AppState;
use crate::auth::models::*;
use crate::database::models::{CreateNewUser, Role, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::services::user_service::UserService;
use crate::utils::jwt::{Claims, JwtUtils};

/// Authentication service for handling registration, token issuance and token checks
pub struct AuthService<'a> {
    state: &'a AppState,
    user_service: UserService<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(state: &'a AppState) -> Self {
        let user_service = UserService::new(&state.pool, state.config.bcrypt_cost);
        AuthService {
            state,
            user_service,
        }
    }

    fn jwt(&self) -> &JwtUtils {
        &self.state.jwt
    }

    /// Register a new user and issue their first token
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterData> {
        let role = if self.state.config.is_admin_email(&request.email) {
            Role::Admin
        } else {
            Role::User
        };

        let user = self
            .user_service
            .create_user(CreateNewUser {
                username: request.username,
                email: request.email,
                password: request.password,
                role,
            })
            .await?;

        let token = self.issue_token(&UserData::from(&user))?;

        Ok(RegisterData {
            user: RegisteredUser {
                username: user.username,
                email: user.email,
                token,
            },
        })
    }

    /// Check an email/password pair, returning the identity to attach to the request
    pub async fn verify_credentials(&self, request: &LoginRequest) -> ServiceResult<UserData> {
        let user = self
            .user_service
            .authenticate_user(&request.email, &request.password)
            .await?;
        Ok(UserData::from(&user))
    }

    /// Sign a token from `{id, pwd, role}`
    pub fn issue_token(&self, user_data: &UserData) -> ServiceResult<String> {
        self.jwt()
            .generate_token(&user_data.id, &user_data.pwd, user_data.role)
    }

    /// Resolve a presented token to its claims and the user it belongs to.
    ///
    /// The token is verified against the user's current password hash, so
    /// tokens issued before a password change are rejected.
    pub async fn authenticate_token(&self, token: &str) -> ServiceResult<(Claims, User)> {
        let user_id = self.jwt().peek_subject(token)?;

        let user = self
            .user_service
            .get_user_required(&user_id)
            .await
            .map_err(|error| match error {
                ServiceError::NotFound { .. } => ServiceError::unauthorized("Unknown token subject"),
                other => other,
            })?;

        let claims = self.jwt().validate_token(token, &user.password_hash)?;

        if !user.is_active {
            return Err(ServiceError::permission_denied("User account is inactive"));
        }

        Ok((claims, user))
    }

    /// Load the user behind a validated token
    pub async fn current_user(&self, claims: &Claims) -> ServiceResult<UserInfo> {
        let user = self.user_service.get_user_required(claims.user_id()).await?;
        Ok(UserInfo::from(user))
    }
}
