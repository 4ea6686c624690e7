//! Review repository implementation
//!
//! Provides PostgreSQL-backed storage for review entities, including the
//! joined lookup that returns a review with its parent book.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libris_core::models::{Book, NewReview, Review, ReviewPatch};
use libris_core::traits::ReviewStore;
use libris_core::{AppError, AppResult};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument};

/// Database row representation of a review
#[derive(Debug, FromRow)]
pub(crate) struct ReviewRow {
    id: i32,
    book_id: i32,
    reviewer_name: String,
    ratings: i32,
    review: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            book_id: row.book_id,
            reviewer_name: row.reviewer_name,
            ratings: row.ratings,
            review: row.review,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row shape for the review + parent book join
///
/// Book columns are nullable because the join is a LEFT JOIN; an orphaned
/// review yields NULLs on the book side.
#[derive(Debug, FromRow)]
struct ReviewWithBookRow {
    id: i32,
    book_id: i32,
    reviewer_name: String,
    ratings: i32,
    review: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    b_id: Option<i32>,
    b_book_name: Option<String>,
    b_author: Option<String>,
    b_description: Option<String>,
    b_language: Option<String>,
    b_created_at: Option<DateTime<Utc>>,
    b_updated_at: Option<DateTime<Utc>>,
}

impl From<ReviewWithBookRow> for (Review, Option<Book>) {
    fn from(row: ReviewWithBookRow) -> Self {
        let book = match (
            row.b_id,
            row.b_book_name,
            row.b_author,
            row.b_language,
            row.b_created_at,
            row.b_updated_at,
        ) {
            (Some(id), Some(book_name), Some(author), Some(language), Some(created_at), Some(updated_at)) => {
                Some(Book {
                    id,
                    book_name,
                    author,
                    description: row.b_description,
                    language,
                    created_at,
                    updated_at,
                })
            }
            _ => None,
        };

        let review = Review {
            id: row.id,
            book_id: row.book_id,
            reviewer_name: row.reviewer_name,
            ratings: row.ratings,
            review: row.review,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };

        (review, book)
    }
}

const REVIEW_COLUMNS: &str = "id, book_id, reviewer_name, ratings, review, created_at, updated_at";

/// PostgreSQL implementation of the review store
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new review repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        debug!("Finding review by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, ReviewRow>(&format!(
            "SELECT {} FROM reviews WHERE id = $1",
            REVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding review {}: {}", id, e);
            AppError::Database(format!("Failed to find review: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_with_book(&self, id: i32) -> AppResult<Option<(Review, Option<Book>)>> {
        debug!("Loading review {} with its book", id);

        let result = sqlx::query_as::<sqlx::Postgres, ReviewWithBookRow>(
            r#"
            SELECT
                r.id, r.book_id, r.reviewer_name, r.ratings, r.review,
                r.created_at, r.updated_at,
                b.id AS b_id, b.book_name AS b_book_name, b.author AS b_author,
                b.description AS b_description, b.language AS b_language,
                b.created_at AS b_created_at, b.updated_at AS b_updated_at
            FROM reviews r
            LEFT JOIN books b ON b.id = r.book_id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error loading review {} with book: {}", id, e);
            AppError::Database(format!("Failed to load review with book: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn insert(&self, review: &NewReview) -> AppResult<Review> {
        debug!("Inserting review for book {}", review.book_id);

        let row = sqlx::query_as::<sqlx::Postgres, ReviewRow>(&format!(
            r#"
            INSERT INTO reviews (book_id, reviewer_name, ratings, review)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        ))
        .bind(review.book_id)
        .bind(&review.reviewer_name)
        .bind(review.ratings)
        .bind(&review.review)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error inserting review: {}", e);
            if e.to_string().contains("foreign key") {
                AppError::BookNotFound(review.book_id)
            } else {
                AppError::Database(format!("Failed to insert review: {}", e))
            }
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: i32, patch: &ReviewPatch) -> AppResult<Review> {
        debug!("Updating review: {}", id);

        // Build dynamic update query
        let mut query = String::from("UPDATE reviews SET updated_at = NOW()");
        let mut bind_count = 1;

        if patch.reviewer_name.is_some() {
            query.push_str(&format!(", reviewer_name = ${}", bind_count));
            bind_count += 1;
        }
        if patch.ratings.is_some() {
            query.push_str(&format!(", ratings = ${}", bind_count));
            bind_count += 1;
        }
        if patch.review.is_some() {
            query.push_str(&format!(", review = ${}", bind_count));
            bind_count += 1;
        }

        query.push_str(&format!(
            " WHERE id = ${} RETURNING {}",
            bind_count, REVIEW_COLUMNS
        ));

        let mut q = sqlx::query_as::<sqlx::Postgres, ReviewRow>(&query);

        if let Some(ref reviewer_name) = patch.reviewer_name {
            q = q.bind(reviewer_name);
        }
        if let Some(ratings) = patch.ratings {
            q = q.bind(ratings);
        }
        if let Some(ref review) = patch.review {
            q = q.bind(review);
        }
        q = q.bind(id);

        let row = q.fetch_optional(&self.pool).await.map_err(|e| {
            error!("Database error updating review {}: {}", id, e);
            AppError::Database(format!("Failed to update review: {}", e))
        })?;

        row.map(Into::into).ok_or(AppError::ReviewNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> AppResult<()> {
        debug!("Deleting review: {}", id);

        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting review {}: {}", id, e);
                AppError::Database(format!("Failed to delete review: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::ReviewNotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::models::NewBook;
    use libris_core::traits::BookStore;

    async fn test_pool() -> PgPool {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost/libris".to_string());
        crate::create_pool(&database_url, Some(2))
            .await
            .expect("Failed to create pool")
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_insert_against_missing_book() {
        let repo = PgReviewRepository::new(test_pool().await);

        let err = repo
            .insert(&NewReview {
                book_id: -1,
                reviewer_name: "A".to_string(),
                ratings: 5,
                review: "Great".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BookNotFound(-1)));
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_find_with_book_joins_parent() {
        let pool = test_pool().await;
        let books = crate::PgBookRepository::new(pool.clone());
        let reviews = PgReviewRepository::new(pool);

        let book = books
            .insert(&NewBook {
                book_name: "Joined".to_string(),
                author: "Author".to_string(),
                description: None,
                language: "en".to_string(),
            })
            .await
            .unwrap();

        let review = reviews
            .insert(&NewReview {
                book_id: book.id,
                reviewer_name: "A".to_string(),
                ratings: 4,
                review: "Fine".to_string(),
            })
            .await
            .unwrap();

        let (found, parent) = reviews.find_with_book(review.id).await.unwrap().unwrap();
        assert_eq!(found.id, review.id);
        assert_eq!(parent.unwrap().id, book.id);

        books.delete(book.id).await.unwrap();
    }
}
