//! Common traits for stores and the cache
//!
//! Defines the seams between the services and their collaborators. The
//! services are generic over these traits so tests can substitute mocks.

use crate::error::AppError;
use crate::models::{Book, BookPatch, NewBook, NewReview, Review, ReviewPatch};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Book storage trait
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Find a book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, AppError>;

    /// Find a book by exact `(book_name, author)` match
    async fn find_by_title_author(
        &self,
        book_name: &str,
        author: &str,
    ) -> Result<Option<Book>, AppError>;

    /// Load a book together with all of its reviews
    async fn find_with_reviews(&self, id: i32) -> Result<Option<(Book, Vec<Review>)>, AppError>;

    /// List all books
    async fn list_all(&self) -> Result<Vec<Book>, AppError>;

    /// Insert a new book
    async fn insert(&self, book: &NewBook) -> Result<Book, AppError>;

    /// Apply a partial update to a book
    async fn update(&self, id: i32, patch: &BookPatch) -> Result<Book, AppError>;

    /// Delete a book by ID (reviews are removed by the store-level cascade)
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// Review storage trait
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Find a review by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Review>, AppError>;

    /// Load a review together with its parent book (None if orphaned)
    async fn find_with_book(&self, id: i32) -> Result<Option<(Review, Option<Book>)>, AppError>;

    /// Insert a new review
    async fn insert(&self, review: &NewReview) -> Result<Review, AppError>;

    /// Apply a partial update to a review
    async fn update(&self, id: i32, patch: &ReviewPatch) -> Result<Review, AppError>;

    /// Delete a review by ID
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// Cache service trait
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Get value from cache
    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError>;

    /// Set value in cache with TTL
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> Result<(), AppError>;

    /// Delete value from cache
    async fn delete(&self, key: &str) -> Result<bool, AppError>;
}
