//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token signing settings and the frontend
//! origin allowed to call the API.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::env;

/// Longest accepted token lifetime, ten years.
pub const MAX_JWT_EXPIRES_IN_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
    pub cors_allowed_origin: HeaderValue,
    pub admin_emails: Vec<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://storefront.db".to_string());

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let jwt_expires_in_seconds = parse_token_lifetime(
            &env::var("JWT_EXPIRES_IN_SECONDS").unwrap_or_else(|_| "86400".to_string()),
        )?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let cors_allowed_origin = env::var("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .parse::<HeaderValue>()
            .context("CORS_ALLOWED_ORIGIN must be a valid header value")?;

        let admin_emails = parse_email_list(&env::var("ADMIN_EMAILS").unwrap_or_default());

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            bcrypt_cost,
            server_port,
            cors_allowed_origin,
            admin_emails,
        })
    }

    /// Whether `email` should be granted the admin role on registration.
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email.trim()))
    }
}

fn parse_token_lifetime(raw: &str) -> Result<u64> {
    let seconds = raw
        .trim()
        .parse::<u64>()
        .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;
    if seconds > MAX_JWT_EXPIRES_IN_SECONDS {
        anyhow::bail!(
            "JWT_EXPIRES_IN_SECONDS must be at most {}",
            MAX_JWT_EXPIRES_IN_SECONDS
        );
    }
    Ok(seconds)
}

/// Splits a comma-separated list of emails, dropping blanks.
fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|email| email.trim())
        .filter(|email| !email.is_empty())
        .map(|email| email.to_lowercase())
        .collect()
}
