//! Central module for organizing the application's API endpoints.
//!
//! This module holds the shared response envelope and the admin dashboard
//! endpoints. Core authentication routes are handled in `auth`.

pub mod admin;
pub mod common;
