//! Book service implementation
//!
//! Provides the book CRUD operations with read-through caching of the
//! response projections. Cache failures are logged and degrade to a miss
//! or no-op; they never reach the caller.

use libris_cache::keys::{book_key, BOOKS_ALL_KEY};
use libris_core::{
    models::{Book, BookDetail, BookPatch, BookSummary, NewBook},
    traits::{BookStore, CacheService},
    AppError, AppResult,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Outcome of a book create operation
///
/// Creating a book whose `(book_name, author)` pair already exists is a
/// success that references the existing record, not an error.
#[derive(Debug, Clone)]
pub enum BookCreation {
    /// A new row was inserted
    Created,
    /// An identical book already existed; nothing was inserted
    AlreadyPresent(Book),
}

/// Book service with cache-aside lookups
pub struct BookService<B: BookStore, C: CacheService> {
    books: Arc<B>,
    cache: Arc<C>,
    cache_ttl: u64,
}

impl<B: BookStore, C: CacheService> BookService<B, C> {
    /// Create a new book service
    ///
    /// `cache_ttl` is the fixed expiration, in seconds, applied to every
    /// cached projection.
    pub fn new(books: Arc<B>, cache: Arc<C>, cache_ttl: u64) -> Self {
        Self {
            books,
            cache,
            cache_ttl,
        }
    }

    /// Try to read a projection from cache, treating errors as a miss
    async fn get_from_cache<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get::<T>(key).await {
            Ok(value) => {
                if value.is_some() {
                    debug!("Cache HIT for {}", key);
                }
                value
            }
            Err(e) => {
                warn!("Cache read error for {}: {}", key, e);
                None
            }
        }
    }

    /// Store a projection in cache, best effort
    async fn store_in_cache<T: Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.set(key, value, self.cache_ttl).await {
            warn!("Failed to cache {}: {}", key, e);
        }
    }

    /// Drop a cache entry, best effort
    async fn invalidate(&self, key: &str) {
        if let Err(e) = self.cache.delete(key).await {
            warn!("Failed to invalidate {}: {}", key, e);
        }
    }

    /// Create a book unless an identical `(book_name, author)` pair exists
    #[instrument(skip(self, book))]
    pub async fn create(&self, book: NewBook) -> AppResult<BookCreation> {
        debug!("Creating book: {} / {}", book.book_name, book.author);

        if let Some(existing) = self
            .books
            .find_by_title_author(&book.book_name, &book.author)
            .await?
        {
            debug!("Book already present with id {}", existing.id);
            return Ok(BookCreation::AlreadyPresent(existing));
        }

        self.books.insert(&book).await?;
        self.invalidate(BOOKS_ALL_KEY).await;

        Ok(BookCreation::Created)
    }

    /// Apply a partial update to a book, keyed by id
    ///
    /// Empty-string and absent fields are skipped; a patch with no
    /// effective fields leaves the row untouched (including `updated_at`).
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: BookPatch) -> AppResult<Book> {
        let patch = patch.normalized();

        let existing = self
            .books
            .find_by_id(id)
            .await?
            .ok_or(AppError::BookNotFound(id))?;

        if patch.is_empty() {
            debug!("Empty patch for book {}, nothing to do", id);
            return Ok(existing);
        }

        let updated = self.books.update(id, &patch).await?;

        self.invalidate(&book_key(id)).await;
        self.invalidate(BOOKS_ALL_KEY).await;

        Ok(updated)
    }

    /// Fetch a single book projection with nested reviews, cache-aside
    ///
    /// On a cache hit the store is not consulted at all.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> AppResult<BookDetail> {
        let key = book_key(id);

        if let Some(cached) = self.get_from_cache::<BookDetail>(&key).await {
            return Ok(cached);
        }

        debug!("Cache MISS for {}", key);
        let (book, reviews) = self
            .books
            .find_with_reviews(id)
            .await?
            .ok_or(AppError::BookNotFound(id))?;

        let detail = BookDetail::from((book, reviews));
        self.store_in_cache(&key, &detail).await;

        Ok(detail)
    }

    /// Fetch the listing projection (no reviews), cache-aside
    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<BookSummary>> {
        if let Some(cached) = self.get_from_cache::<Vec<BookSummary>>(BOOKS_ALL_KEY).await {
            return Ok(cached);
        }

        debug!("Cache MISS for {}", BOOKS_ALL_KEY);
        let books = self.books.list_all().await?;
        let listing: Vec<BookSummary> = books.into_iter().map(Into::into).collect();

        self.store_in_cache(BOOKS_ALL_KEY, &listing).await;

        Ok(listing)
    }

    /// Delete a book by id; reviews go with it via the store-level cascade
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.books
            .find_by_id(id)
            .await?
            .ok_or(AppError::BookNotFound(id))?;

        self.books.delete(id).await?;

        self.invalidate(&book_key(id)).await;
        self.invalidate(BOOKS_ALL_KEY).await;

        Ok(())
    }
}
