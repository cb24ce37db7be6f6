//! Authentication module for managing user accounts and sessions.
//!
//! This module provides the public interface for authentication-related
//! functionality such as login, registration, token issuance and the
//! middleware that guards authenticated routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
