//! User business logic service.
//!
//! Handles registration, credential checks and user lookups.

use crate::database::models::{CreateNewUser, CreateUser, User};
use crate::errors::{ServiceError, ServiceResult, format_validation_errors};
use crate::repositories::user_repository::{UserRepository, is_unique_violation};
use bcrypt::{hash, verify};
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

/// Message shared by every credential failure so callers cannot tell which emails exist.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    /// bcrypt work factor used for new hashes
    bcrypt_cost: u32,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    /// * `bcrypt_cost` - Work factor for hashing new passwords
    pub fn new(pool: &'a SqlitePool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// Creates a new user with full validation.
    ///
    /// # Arguments
    /// * `create_user` - User creation data transfer object
    ///
    /// # Returns
    /// The newly created User with all fields populated
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - An email that is already registered
    pub async fn create_user(&self, mut create_user: CreateNewUser) -> ServiceResult<User> {
        create_user.email = normalize_email(&create_user.email);
        create_user.username = create_user.username.trim().to_string();

        if let Err(validation_errors) = create_user.validate() {
            return Err(ServiceError::validation(format_validation_errors(
                &validation_errors,
            )));
        }

        let repo = UserRepository::new(self.pool);

        if repo.get_user_by_email(&create_user.email).await?.is_some() {
            return Err(ServiceError::already_exists("User", &create_user.email));
        }

        let password_hash = self.hash_password(&create_user.password)?;

        let data = CreateUser {
            id: Uuid::now_v7().to_string(),
            username: create_user.username,
            email: create_user.email.clone(),
            password_hash,
            role: create_user.role,
        };

        // A concurrent registration can claim the email after the lookup above.
        let user = repo.create_user(data).await.map_err(|error| {
            if is_unique_violation(&error) {
                ServiceError::already_exists("User", &create_user.email)
            } else {
                ServiceError::from(error)
            }
        })?;
        tracing::info!("Registered user {} with role {}", user.id, user.role);
        Ok(user)
    }

    /// Checks an email/password pair against the stored hash.
    ///
    /// # Errors
    /// Returns `ServiceError::Unauthorized` for an unknown email or a wrong
    /// password, and `ServiceError::PermissionDenied` for a deactivated user.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| ServiceError::unauthorized(INVALID_CREDENTIALS))?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(ServiceError::unauthorized(INVALID_CREDENTIALS));
        }

        if !user.is_active {
            return Err(ServiceError::permission_denied("User account is inactive"));
        }

        Ok(user)
    }

    /// Retrieves a user by ID with existence verification.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if user doesn't exist
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        Ok(user)
    }

    /// Lists all users for the admin dashboard.
    pub async fn list_users(&self) -> ServiceResult<Vec<User>> {
        let repo = UserRepository::new(self.pool);
        Ok(repo.list_users().await?)
    }

    /// Function to hash a password before storing in database
    fn hash_password(&self, password: &str) -> ServiceResult<String> {
        hash(password, self.bcrypt_cost)
            .map_err(|e| ServiceError::internal(format!("Password hashing failed: {}", e)))
    }

    /// Function to verify a password against the stored hash
    fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
        verify(password, hash)
            .map_err(|e| ServiceError::internal(format!("Password verification failed: {}", e)))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Role;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    fn new_user(email: &str) -> CreateNewUser {
        CreateNewUser {
            username: "Jane Doe".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, 4);

        let user = service.create_user(new_user(" Jane@Shop.com ")).await.unwrap();

        assert_eq!(user.email, "jane@shop.com");
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "hunter22");
        assert!(verify("hunter22", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, 4);

        service.create_user(new_user("jane@shop.com")).await.unwrap();
        let err = service
            .create_user(new_user("JANE@shop.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_a_unique_violation() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        let row = |id: &str| CreateUser {
            id: id.to_string(),
            username: "Jane".to_string(),
            email: "jane@shop.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
        };

        repo.create_user(row("1")).await.unwrap();
        let err = repo.create_user(row("2")).await.unwrap_err();
        assert!(is_unique_violation(&err));

        let other = anyhow::anyhow!("connection reset");
        assert!(!is_unique_violation(&other));
    }

    #[tokio::test]
    async fn test_create_user_validates_input() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, 4);

        let mut request = new_user("not-an-email");
        request.password = "123".to_string();
        let err = service.create_user(request).await.unwrap_err();

        match err {
            ServiceError::Validation { message } => {
                assert!(message.contains("email"));
                assert!(message.contains("password"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_user() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, 4);
        let created = service.create_user(new_user("jane@shop.com")).await.unwrap();

        let user = service
            .authenticate_user("Jane@Shop.com", "hunter22")
            .await
            .unwrap();
        assert_eq!(user.id, created.id);

        let wrong_password = service
            .authenticate_user("jane@shop.com", "wrong")
            .await
            .unwrap_err();
        let unknown_email = service
            .authenticate_user("nobody@shop.com", "hunter22")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, ServiceError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_get_user_required_not_found() {
        let pool = test_pool().await;
        let service = UserService::new(&pool, 4);

        let err = service.get_user_required("missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
