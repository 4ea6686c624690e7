//! Integration tests for the API DTO layer
//!
//! These tests exercise request validation, payload conversions, and the
//! response envelope. For full end-to-end testing against a running
//! instance, see the workspace-level tests.

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use libris_api::dto::{
        ApiResponse, CreateBookRequest, PostReviewRequest, UpdateBookRequest, UpdateReviewRequest,
    };
    use libris_core::models::{
        Book, BookDetail, BookPatch, NewBook, Review, ReviewDetail, ReviewPatch,
    };
    use validator::Validate;

    fn sample_book() -> Book {
        Book {
            id: 1,
            book_name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: Some("d".to_string()),
            language: "en".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

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
    fn test_create_book_request_rejects_blank_fields() {
        let req = CreateBookRequest {
            book_name: String::new(),
            author: "Frank Herbert".to_string(),
            description: None,
            language: "en".to_string(),
        };
        assert!(req.validate().is_err());

        let req = CreateBookRequest {
            book_name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: None,
            language: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_book_request_tolerates_empty_fields() {
        // Empty strings mean "no change" and must pass validation.
        let req = UpdateBookRequest {
            book_id: 1,
            book_name: Some(String::new()),
            author: Some(String::new()),
            description: Some(String::new()),
            language: Some(String::new()),
        };
        assert!(req.validate().is_ok());

        let patch = BookPatch::from(req).normalized();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_review_rating_bounds() {
        for ratings in [1, 3, 5] {
            let req = PostReviewRequest {
                book_id: 1,
                ratings,
                review: "Great".to_string(),
                reviewer_name: "A".to_string(),
            };
            assert!(req.validate().is_ok());
        }

        for ratings in [0, 6, -1] {
            let req = PostReviewRequest {
                book_id: 1,
                ratings,
                review: "Great".to_string(),
                reviewer_name: "A".to_string(),
            };
            assert!(req.validate().is_err());
        }
    }

    #[test]
    fn test_update_review_request_into_patch() {
        let req = UpdateReviewRequest {
            review_id: 2,
            ratings: Some(4),
            review: Some(String::new()),
            reviewer_name: None,
        };
        assert!(req.validate().is_ok());

        let patch = ReviewPatch::from(req).normalized();
        assert_eq!(patch.ratings, Some(4));
        assert!(patch.review.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_create_book_request_conversion() {
        let req = CreateBookRequest {
            book_name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: Some("d".to_string()),
            language: "en".to_string(),
        };

        let payload = NewBook::from(req);
        assert_eq!(payload.book_name, "Dune");
        assert_eq!(payload.author, "Frank Herbert");
    }

    #[test]
    fn test_book_detail_serialization_shape() {
        let detail = BookDetail::from((sample_book(), vec![sample_review()]));
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["name"], "Dune");
        assert_eq!(json["reviews"][0]["rating"], 5);
        assert_eq!(json["reviews"][0]["comment"], "Great");
    }

    #[test]
    fn test_review_detail_serialization_shape() {
        let detail = ReviewDetail::from((sample_review(), Some(sample_book())));
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["reviewer_name"], "A");
        assert_eq!(json["rating"], 5);
        assert_eq!(json["book"]["name"], "Dune");

        let orphaned = ReviewDetail::from((sample_review(), None));
        let json = serde_json::to_value(&orphaned).unwrap();
        assert!(json["book"].is_null());
    }

    #[test]
    fn test_envelope_with_projection() {
        let detail = BookDetail::from((sample_book(), vec![]));
        let resp = ApiResponse::with_data("Book and its reviews fetched successfully", detail);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status_code"], 200);
        assert_eq!(json["data"]["name"], "Dune");
        assert!(json.get("detail").is_none());
    }
}
