//! Book DTOs
//!
//! Request and query types for the book endpoints. Responses use the
//! projection types from libris-core directly.

use libris_core::models::{BookPatch, NewBook};
use serde::Deserialize;
use validator::Validate;

/// Book creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookRequest {
    /// Book title
    #[validate(length(min = 1, max = 255, message = "Book name is required"))]
    pub book_name: String,

    /// Author name
    #[validate(length(min = 1, max = 255, message = "Author is required"))]
    pub author: String,

    /// Optional description
    pub description: Option<String>,

    /// Language code or name
    #[validate(length(min = 1, max = 64, message = "Language is required"))]
    pub language: String,
}

impl From<CreateBookRequest> for NewBook {
    fn from(req: CreateBookRequest) -> Self {
        Self {
            book_name: req.book_name,
            author: req.author,
            description: req.description,
            language: req.language,
        }
    }
}

/// Book partial-update request, keyed by id
///
/// Empty-string fields are accepted and treated as "no change", so no
/// minimum lengths here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBookRequest {
    /// Target book id
    pub book_id: i32,

    #[validate(length(max = 255))]
    pub book_name: Option<String>,

    #[validate(length(max = 255))]
    pub author: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 64))]
    pub language: Option<String>,
}

impl From<UpdateBookRequest> for BookPatch {
    fn from(req: UpdateBookRequest) -> Self {
        Self {
            book_name: req.book_name,
            author: req.author,
            description: req.description,
            language: req.language,
        }
    }
}

/// Query parameters for the book lookup endpoint
///
/// `book_id` absent means "list all books".
#[derive(Debug, Clone, Deserialize)]
pub struct BookQueryParams {
    pub book_id: Option<i32>,
}

/// Query parameters for the book delete endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteBookParams {
    pub book_id: i32,
}
