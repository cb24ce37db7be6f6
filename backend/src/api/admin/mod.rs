//! Endpoints backing the admin dashboard.

pub mod handlers;
pub mod routes;
