//! Form payloads and user-facing notifications for the auth pages.

use crate::auth::models::{LoginRequest, RegisterRequest};
use std::time::Duration;

/// How long a notification stays on screen.
pub const NOTIFICATION_AUTO_HIDE: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Transient banner shown after a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub auto_hide: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
            auto_hide: NOTIFICATION_AUTO_HIDE,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            auto_hide: NOTIFICATION_AUTO_HIDE,
        }
    }
}

/// Fields of the sign-up page. `full_name` becomes the account's username.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    /// Builds the form from submitted `(name, value)` pairs, using the
    /// page's input names `fullname`, `email` and `password`.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut form = Self::default();
        for (name, value) in fields {
            match name {
                "fullname" => form.full_name = value.to_string(),
                "email" => form.email = value.to_string(),
                "password" => form.password = value.to_string(),
                _ => {}
            }
        }
        form
    }

    /// Names of required fields left empty. Whitespace counts as a value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("fullname", &self.full_name),
            ("email", &self.email),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub(crate) fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            username: self.full_name.clone(),
        }
    }
}

/// Fields of the sign-in page.
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [("email", &self.email), ("password", &self.password)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    pub(crate) fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}
