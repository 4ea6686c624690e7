//! Review model and projections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::book::{Book, BookSummary};

/// Review entity as stored in the `reviews` table
///
/// A review belongs to exactly one book; the row is removed when its book
/// is deleted (cascade).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique review ID (store-assigned)
    pub id: i32,

    /// Owning book ID
    pub book_id: i32,

    /// Display name of the reviewer
    pub reviewer_name: String,

    /// Integer rating
    pub ratings: i32,

    /// Review text
    pub review: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for inserting a new review
#[derive(Debug, Clone)]
pub struct NewReview {
    pub book_id: i32,
    pub reviewer_name: String,
    pub ratings: i32,
    pub review: String,
}

/// Partial update for a review
///
/// Same semantics as `BookPatch`: absent or empty-string fields are left
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub reviewer_name: Option<String>,
    pub ratings: Option<i32>,
    pub review: Option<String>,
}

impl ReviewPatch {
    /// Demote empty-string fields to "not provided"
    pub fn normalized(self) -> Self {
        Self {
            reviewer_name: self.reviewer_name.filter(|s| !s.is_empty()),
            ratings: self.ratings,
            review: self.review.filter(|s| !s.is_empty()),
        }
    }

    /// Whether the patch carries no effective change
    pub fn is_empty(&self) -> bool {
        self.reviewer_name.is_none() && self.ratings.is_none() && self.review.is_none()
    }
}

/// Review projection nested under a book detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewSummary {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            rating: review.ratings,
            comment: review.review,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// Full review projection with its (possibly absent) parent book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDetail {
    pub id: i32,
    pub reviewer_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub book: Option<BookSummary>,
}

impl From<(Review, Option<Book>)> for ReviewDetail {
    fn from((review, book): (Review, Option<Book>)) -> Self {
        Self {
            id: review.id,
            reviewer_name: review.reviewer_name,
            rating: review.ratings,
            comment: review.review,
            created_at: review.created_at,
            updated_at: review.updated_at,
            book: book.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_review() -> Review {
        Review {
            id: 1,
            book_id: 1,
            reviewer_name: "A".to_string(),
            ratings: 5,
            review: "Great".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_patch_normalization() {
        let patch = ReviewPatch {
            reviewer_name: Some(String::new()),
            ratings: Some(4),
            review: None,
        }
        .normalized();

        assert!(patch.reviewer_name.is_none());
        assert_eq!(patch.ratings, Some(4));
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_empty_patch() {
        let patch = ReviewPatch::default().normalized();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_summary_renames_fields() {
        let summary = ReviewSummary::from(sample_review());
        assert_eq!(summary.rating, 5);
        assert_eq!(summary.comment, "Great");
    }

    #[test]
    fn test_detail_with_orphaned_book() {
        let detail = ReviewDetail::from((sample_review(), None));
        assert!(detail.book.is_none());
        assert_eq!(detail.reviewer_name, "A");
    }
}
