//! Data access layer. Repositories wrap raw SQL and return `anyhow::Result`.

pub mod user_repository;
