//! Review service implementation
//!
//! Review operations are uncached, but every write invalidates the parent
//! book's cached projection, which embeds the review list.

use libris_cache::keys::book_key;
use libris_core::{
    models::{NewReview, Review, ReviewDetail, ReviewPatch},
    traits::{CacheService, ReviewStore},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Review service
pub struct ReviewService<R: ReviewStore, C: CacheService> {
    reviews: Arc<R>,
    cache: Arc<C>,
}

impl<R: ReviewStore, C: CacheService> ReviewService<R, C> {
    /// Create a new review service
    pub fn new(reviews: Arc<R>, cache: Arc<C>) -> Self {
        Self { reviews, cache }
    }

    /// Drop the parent book's cached projection, best effort
    async fn invalidate_book(&self, book_id: i32) {
        let key = book_key(book_id);
        if let Err(e) = self.cache.delete(&key).await {
            warn!("Failed to invalidate {}: {}", key, e);
        }
    }

    /// Post a review
    ///
    /// Inserts unconditionally; a book may carry any number of reviews.
    #[instrument(skip(self, review))]
    pub async fn create(&self, review: NewReview) -> AppResult<Review> {
        debug!("Posting review for book {}", review.book_id);

        let created = self.reviews.insert(&review).await?;
        self.invalidate_book(created.book_id).await;

        Ok(created)
    }

    /// Apply a partial update to a review, keyed by id
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: ReviewPatch) -> AppResult<Review> {
        let patch = patch.normalized();

        let existing = self
            .reviews
            .find_by_id(id)
            .await?
            .ok_or(AppError::ReviewNotFound(id))?;

        if patch.is_empty() {
            debug!("Empty patch for review {}, nothing to do", id);
            return Ok(existing);
        }

        let updated = self.reviews.update(id, &patch).await?;
        self.invalidate_book(updated.book_id).await;

        Ok(updated)
    }

    /// Fetch a review projection with its parent book
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> AppResult<ReviewDetail> {
        let (review, book) = self
            .reviews
            .find_with_book(id)
            .await?
            .ok_or(AppError::ReviewNotFound(id))?;

        Ok(ReviewDetail::from((review, book)))
    }

    /// Delete a review by id
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let existing = self
            .reviews
            .find_by_id(id)
            .await?
            .ok_or(AppError::ReviewNotFound(id))?;

        self.reviews.delete(id).await?;
        self.invalidate_book(existing.book_id).await;

        Ok(())
    }
}
