//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business operations
//! and orchestrate interactions between the HTTP layer and the repositories.

pub mod user_service;
