//! Book model and projections
//!
//! Books own a collection of reviews; deleting a book cascades to its
//! reviews at the store level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::review::{Review, ReviewSummary};

/// Book entity as stored in the `books` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Unique book ID (store-assigned)
    pub id: i32,

    /// Book title
    pub book_name: String,

    /// Author name
    pub author: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Language the book is written in
    pub language: String,

    /// Creation timestamp (store-assigned)
    pub created_at: DateTime<Utc>,

    /// Last update timestamp, refreshed on every effective mutation
    pub updated_at: DateTime<Utc>,
}

/// Payload for inserting a new book
#[derive(Debug, Clone)]
pub struct NewBook {
    pub book_name: String,
    pub author: String,
    pub description: Option<String>,
    pub language: String,
}

/// Partial update for a book
///
/// A field that is absent, or provided as an empty string, is treated as
/// "no change". Fields cannot be cleared through a partial update.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub book_name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

impl BookPatch {
    /// Demote empty-string fields to "not provided"
    pub fn normalized(self) -> Self {
        Self {
            book_name: self.book_name.filter(|s| !s.is_empty()),
            author: self.author.filter(|s| !s.is_empty()),
            description: self.description.filter(|s| !s.is_empty()),
            language: self.language.filter(|s| !s.is_empty()),
        }
    }

    /// Whether the patch carries no effective change
    pub fn is_empty(&self) -> bool {
        self.book_name.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.language.is_none()
    }
}

/// Lightweight book projection used for listings (no reviews)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub language: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            name: book.book_name,
            author: book.author,
            language: book.language,
            description: book.description,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Full book projection with nested reviews
///
/// This is the shape cached under `book:<id>` and returned by the single
/// book lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetail {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub language: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reviews: Vec<ReviewSummary>,
}

impl From<(Book, Vec<Review>)> for BookDetail {
    fn from((book, reviews): (Book, Vec<Review>)) -> Self {
        Self {
            id: book.id,
            name: book.book_name,
            author: book.author,
            language: book.language,
            description: book.description,
            created_at: book.created_at,
            updated_at: book.updated_at,
            reviews: reviews.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book {
            id: 1,
            book_name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: Some("Desert planet".to_string()),
            language: "en".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_patch_normalization_drops_empty_strings() {
        let patch = BookPatch {
            book_name: Some("".to_string()),
            author: Some("Herbert".to_string()),
            description: Some("".to_string()),
            language: None,
        }
        .normalized();

        assert!(patch.book_name.is_none());
        assert_eq!(patch.author.as_deref(), Some("Herbert"));
        assert!(patch.description.is_none());
        assert!(patch.language.is_none());
    }

    #[test]
    fn test_patch_of_only_empty_fields_is_empty() {
        let patch = BookPatch {
            book_name: Some(String::new()),
            author: None,
            description: Some(String::new()),
            language: Some(String::new()),
        }
        .normalized();

        assert!(patch.is_empty());
    }

    #[test]
    fn test_summary_projection() {
        let summary = BookSummary::from(sample_book());
        assert_eq!(summary.id, 1);
        assert_eq!(summary.name, "Dune");
        assert_eq!(summary.author, "Frank Herbert");
    }

    #[test]
    fn test_detail_projection_without_reviews() {
        let detail = BookDetail::from((sample_book(), vec![]));
        assert_eq!(detail.name, "Dune");
        assert!(detail.reviews.is_empty());
    }
}
