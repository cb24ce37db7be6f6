//! Client for the storefront auth endpoints.
//!
//! This is the consuming side of `/user/register` and `/user/login` used by
//! the sign-up and sign-in pages: it submits the form, keeps the returned
//! token in a site-wide `token` cookie and tells the caller which
//! notification to show and where to navigate next.

pub mod forms;
pub mod views;

use crate::api::common::ApiResponse;
use crate::auth::models::{LoginData, RegisterData, RegisteredUser};
use crate::utils::cookies::TOKEN_COOKIE;
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use thiserror::Error;

pub use forms::{Notification, Severity, SignInForm, SignUpForm};
pub use views::{REDIRECT_DELAY, Redirect, View};

/// Address of the API when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Missing required fields: {0}")]
    MissingFields(String),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

/// Result of submitting the sign-up form.
#[derive(Debug)]
pub enum SignUpOutcome {
    Registered {
        notification: Notification,
        user: RegisteredUser,
        redirect: Redirect,
    },
    Failed {
        notification: Notification,
        reason: ClientError,
    },
}

/// Result of submitting the sign-in form.
#[derive(Debug)]
pub enum SignInOutcome {
    LoggedIn {
        notification: Notification,
        data: LoginData,
        redirect: Redirect,
    },
    Failed {
        notification: Notification,
        reason: ClientError,
    },
}

impl SignUpOutcome {
    pub fn notification(&self) -> &Notification {
        match self {
            SignUpOutcome::Registered { notification, .. }
            | SignUpOutcome::Failed { notification, .. } => notification,
        }
    }

    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            SignUpOutcome::Registered { redirect, .. } => Some(*redirect),
            SignUpOutcome::Failed { .. } => None,
        }
    }
}

impl SignInOutcome {
    pub fn notification(&self) -> &Notification {
        match self {
            SignInOutcome::LoggedIn { notification, .. }
            | SignInOutcome::Failed { notification, .. } => notification,
        }
    }

    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            SignInOutcome::LoggedIn { redirect, .. } => Some(*redirect),
            SignInOutcome::Failed { .. } => None,
        }
    }
}

/// HTTP client holding the session cookie for one storefront origin.
pub struct StorefrontClient {
    base_url: Url,
    http: reqwest::Client,
    jar: Arc<Jar>,
}

impl StorefrontClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self {
            base_url,
            http,
            jar,
        })
    }

    /// Submits the sign-up form.
    ///
    /// On success the `token` cookie is overwritten and the caller should
    /// move to the home view after `REDIRECT_DELAY`. On failure the cookie is
    /// left alone and the user stays on the form.
    pub async fn sign_up(&self, form: &SignUpForm) -> SignUpOutcome {
        match self.register(form).await {
            Ok(user) => {
                self.store_token(&user.token);
                SignUpOutcome::Registered {
                    notification: Notification::success("Registration successful!"),
                    user,
                    redirect: Redirect::new(View::Home, REDIRECT_DELAY),
                }
            }
            Err(reason) => {
                tracing::error!("Registration failed: {}", reason);
                SignUpOutcome::Failed {
                    notification: Notification::error("Registration failed"),
                    reason,
                }
            }
        }
    }

    /// Submits the sign-in form, with the same success/failure split as `sign_up`.
    pub async fn sign_in(&self, form: &SignInForm) -> SignInOutcome {
        match self.login(form).await {
            Ok(data) => {
                self.store_token(&data.token);
                SignInOutcome::LoggedIn {
                    notification: Notification::success("Login successful!"),
                    data,
                    redirect: Redirect::new(View::Home, REDIRECT_DELAY),
                }
            }
            Err(reason) => {
                tracing::error!("Login failed: {}", reason);
                SignInOutcome::Failed {
                    notification: Notification::error("Login failed"),
                    reason,
                }
            }
        }
    }

    /// Current value of the `token` cookie, if any.
    pub fn token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let cookies = header.to_str().ok()?;
        cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == TOKEN_COOKIE)
            .map(|(_, value)| value.to_string())
            .filter(|value| !value.is_empty())
    }

    async fn register(&self, form: &SignUpForm) -> Result<RegisteredUser, ClientError> {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::MissingFields(missing.join(", ")));
        }

        let data: RegisterData = self.post_envelope("/user/register", &form.to_request()).await?;
        Ok(data.user)
    }

    async fn login(&self, form: &SignInForm) -> Result<LoginData, ClientError> {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::MissingFields(missing.join(", ")));
        }

        self.post_envelope("/user/login", &form.to_request()).await
    }

    async fn post_envelope<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;

        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&bytes)
                .map(|envelope| envelope.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        if !envelope.is_success() {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("response has no data".to_string()))
    }

    /// Overwrites the site-wide `token` cookie.
    fn store_token(&self, token: &str) {
        self.jar
            .add_cookie_str(&format!("{}={}; Path=/", TOKEN_COOKIE, token), &self.base_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            StorefrontClient::new("not a url"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_store_and_read_token() {
        let client = StorefrontClient::new(DEFAULT_API_BASE_URL).unwrap();
        assert_eq!(client.token(), None);

        client.store_token("first");
        client.store_token("second");
        assert_eq!(client.token().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_sign_up_with_missing_fields_sends_nothing() {
        // Nothing listens on port 9; a request attempt would surface as Http.
        let client = StorefrontClient::new("http://127.0.0.1:9").unwrap();
        let outcome = client
            .sign_up(&SignUpForm {
                full_name: "Jane".to_string(),
                email: String::new(),
                password: "hunter22".to_string(),
            })
            .await;

        assert_eq!(outcome.notification(), &Notification::error("Registration failed"));
        assert!(outcome.redirect().is_none());
        assert!(matches!(
            outcome,
            SignUpOutcome::Failed {
                reason: ClientError::MissingFields(_),
                ..
            }
        ));
        assert_eq!(client.token(), None);
    }
}
