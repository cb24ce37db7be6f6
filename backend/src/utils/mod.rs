//! Collection of general utility functions shared across modules.

pub mod cookies;
pub mod jwt;
