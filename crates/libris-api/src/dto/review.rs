//! Review DTOs

use libris_core::models::{NewReview, ReviewPatch};
use serde::Deserialize;
use validator::Validate;

/// Review creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostReviewRequest {
    /// Book being reviewed
    pub book_id: i32,

    /// Integer rating
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub ratings: i32,

    /// Review text
    #[validate(length(min = 1, message = "Review text is required"))]
    pub review: String,

    /// Display name of the reviewer
    #[validate(length(min = 1, max = 255, message = "Reviewer name is required"))]
    pub reviewer_name: String,
}

impl From<PostReviewRequest> for NewReview {
    fn from(req: PostReviewRequest) -> Self {
        Self {
            book_id: req.book_id,
            reviewer_name: req.reviewer_name,
            ratings: req.ratings,
            review: req.review,
        }
    }
}

/// Review partial-update request, keyed by id
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    /// Target review id
    pub review_id: i32,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub ratings: Option<i32>,

    pub review: Option<String>,

    #[validate(length(max = 255))]
    pub reviewer_name: Option<String>,
}

impl From<UpdateReviewRequest> for ReviewPatch {
    fn from(req: UpdateReviewRequest) -> Self {
        Self {
            reviewer_name: req.reviewer_name,
            ratings: req.ratings,
            review: req.review,
        }
    }
}

/// Query parameters for the review lookup and delete endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewQueryParams {
    pub review_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_validation() {
        let req = PostReviewRequest {
            book_id: 1,
            ratings: 5,
            review: "Great".to_string(),
            reviewer_name: "A".to_string(),
        };
        assert!(req.validate().is_ok());

        let req = PostReviewRequest {
            book_id: 1,
            ratings: 6,
            review: "Great".to_string(),
            reviewer_name: "A".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_rating_bounds() {
        let req = UpdateReviewRequest {
            review_id: 1,
            ratings: Some(0),
            review: None,
            reviewer_name: None,
        };
        assert!(req.validate().is_err());

        let req = UpdateReviewRequest {
            review_id: 1,
            ratings: None,
            review: Some(String::new()),
            reviewer_name: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_post_request_into_payload() {
        let req = PostReviewRequest {
            book_id: 3,
            ratings: 4,
            review: "Fine".to_string(),
            reviewer_name: "B".to_string(),
        };

        let payload = NewReview::from(req);
        assert_eq!(payload.book_id, 3);
        assert_eq!(payload.ratings, 4);
    }
}
