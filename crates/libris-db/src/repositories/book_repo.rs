//! Book repository implementation
//!
//! Provides PostgreSQL-backed storage for book entities. Review rows hang
//! off `books` with `ON DELETE CASCADE`, so deleting a book row removes its
//! reviews without further statements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libris_core::models::{Book, BookPatch, NewBook, Review};
use libris_core::traits::BookStore;
use libris_core::{AppError, AppResult};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument};

use super::review_repo::ReviewRow;

/// Database row representation of a book
#[derive(Debug, FromRow)]
pub(crate) struct BookRow {
    id: i32,
    book_name: String,
    author: String,
    description: Option<String>,
    language: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            book_name: row.book_name,
            author: row.author,
            description: row.description,
            language: row.language,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const BOOK_COLUMNS: &str = "id, book_name, author, description, language, created_at, updated_at";

/// PostgreSQL implementation of the book store
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    /// Create a new book repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        debug!("Finding book by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, BookRow>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding book {}: {}", id, e);
            AppError::Database(format!("Failed to find book: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_by_title_author(&self, book_name: &str, author: &str) -> AppResult<Option<Book>> {
        debug!("Finding book by title/author: {} / {}", book_name, author);

        let result = sqlx::query_as::<sqlx::Postgres, BookRow>(&format!(
            "SELECT {} FROM books WHERE book_name = $1 AND author = $2",
            BOOK_COLUMNS
        ))
        .bind(book_name)
        .bind(author)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Database error finding book by title/author {}: {}",
                book_name, e
            );
            AppError::Database(format!("Failed to find book by title/author: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_with_reviews(&self, id: i32) -> AppResult<Option<(Book, Vec<Review>)>> {
        debug!("Loading book {} with reviews", id);

        let book = match self.find_by_id(id).await? {
            Some(book) => book,
            None => return Ok(None),
        };

        let reviews = sqlx::query_as::<sqlx::Postgres, ReviewRow>(
            r#"
            SELECT id, book_id, reviewer_name, ratings, review, created_at, updated_at
            FROM reviews
            WHERE book_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error loading reviews for book {}: {}", id, e);
            AppError::Database(format!("Failed to load reviews: {}", e))
        })?;

        Ok(Some((book, reviews.into_iter().map(Into::into).collect())))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        debug!("Listing all books");

        let rows = sqlx::query_as::<sqlx::Postgres, BookRow>(&format!(
            "SELECT {} FROM books ORDER BY id",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing books: {}", e);
            AppError::Database(format!("Failed to list books: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        debug!("Inserting book: {} / {}", book.book_name, book.author);

        let row = sqlx::query_as::<sqlx::Postgres, BookRow>(&format!(
            r#"
            INSERT INTO books (book_name, author, description, language)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&book.book_name)
        .bind(&book.author)
        .bind(book.description.as_deref())
        .bind(&book.language)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error inserting book: {}", e);
            AppError::Database(format!("Failed to insert book: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: i32, patch: &BookPatch) -> AppResult<Book> {
        debug!("Updating book: {}", id);

        // Build dynamic update query
        let mut query = String::from("UPDATE books SET updated_at = NOW()");
        let mut bind_count = 1;

        if patch.book_name.is_some() {
            query.push_str(&format!(", book_name = ${}", bind_count));
            bind_count += 1;
        }
        if patch.author.is_some() {
            query.push_str(&format!(", author = ${}", bind_count));
            bind_count += 1;
        }
        if patch.description.is_some() {
            query.push_str(&format!(", description = ${}", bind_count));
            bind_count += 1;
        }
        if patch.language.is_some() {
            query.push_str(&format!(", language = ${}", bind_count));
            bind_count += 1;
        }

        query.push_str(&format!(
            " WHERE id = ${} RETURNING {}",
            bind_count, BOOK_COLUMNS
        ));

        let mut q = sqlx::query_as::<sqlx::Postgres, BookRow>(&query);

        if let Some(ref name) = patch.book_name {
            q = q.bind(name);
        }
        if let Some(ref author) = patch.author {
            q = q.bind(author);
        }
        if let Some(ref description) = patch.description {
            q = q.bind(description);
        }
        if let Some(ref language) = patch.language {
            q = q.bind(language);
        }
        q = q.bind(id);

        let row = q.fetch_optional(&self.pool).await.map_err(|e| {
            error!("Database error updating book {}: {}", id, e);
            AppError::Database(format!("Failed to update book: {}", e))
        })?;

        row.map(Into::into).ok_or(AppError::BookNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> AppResult<()> {
        debug!("Deleting book: {}", id);

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting book {}: {}", id, e);
                AppError::Database(format!("Failed to delete book: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::BookNotFound(id));
        }

        Ok(())
    }
}
