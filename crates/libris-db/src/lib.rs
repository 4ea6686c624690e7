//! Libris Database Layer
//!
//! This crate provides PostgreSQL database access and repository
//! implementations for the libris book review service. It includes:
//!
//! - Connection pool management with sqlx
//! - Repository implementations for books and reviews
//! - Dynamic partial-update queries

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use libris_core::{AppError, AppResult};
pub use sqlx::PgPool;
