//! Repository implementations
//!
//! This module contains concrete implementations of the store traits
//! defined in libris-core, using sqlx for PostgreSQL access.

pub mod book_repo;
pub mod review_repo;

pub use book_repo::PgBookRepository;
pub use review_repo::PgReviewRepository;
