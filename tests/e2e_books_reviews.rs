//! End-to-end test against a running libris instance
//!
//! Requires the server, PostgreSQL, and Redis to be up. Point LIBRIS_E2E_URL
//! at the server (defaults to http://127.0.0.1:8080) and run with
//! `cargo test --test e2e_books_reviews -- --ignored`.

use serde_json::{json, Value};

fn base_url() -> String {
    std::env::var("LIBRIS_E2E_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}

#[tokio::test]
#[ignore] // Requires a running server with database and cache
async fn test_book_review_lifecycle() {
    let client = reqwest::Client::new();
    let base = base_url();

    // Create a book
    let resp = client
        .post(format!("{}/api/books", base))
        .json(&json!({
            "book_name": "Dune",
            "author": "Herbert",
            "description": "d",
            "language": "en"
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    // Find its id: either from the duplicate-create data or the listing
    let body: Value = client
        .post(format!("{}/api/books", base))
        .json(&json!({
            "book_name": "Dune",
            "author": "Herbert",
            "description": "d",
            "language": "en"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "Book is already present");
    let book_id = body["data"]["id"].as_i64().unwrap();

    // Fetch the book: reviews start empty
    let body: Value = client
        .get(format!("{}/api/books?book_id={}", base, book_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["name"], "Dune");
    assert_eq!(body["data"]["reviews"].as_array().unwrap().len(), 0);

    // Post a review
    let resp = client
        .post(format!("{}/api/reviews", base))
        .json(&json!({
            "book_id": book_id,
            "ratings": 5,
            "review": "Great",
            "reviewer_name": "A"
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    // The book detail now carries the review (cache was invalidated)
    let body: Value = client
        .get(format!("{}/api/books?book_id={}", base, book_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let reviews = body["data"]["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    let review_id = reviews[0]["id"].as_i64().unwrap();
    assert_eq!(reviews[0]["rating"], 5);

    // Fetch the review with its nested book
    let body: Value = client
        .get(format!("{}/api/reviews?review_id={}", base, review_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["book"]["name"], "Dune");

    // Delete the book; the review must be gone too (cascade)
    let resp = client
        .delete(format!("{}/api/books?book_id={}", base, book_id))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let resp = client
        .get(format!("{}/api/reviews?review_id={}", base, review_id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    // And the book itself is not found
    let resp = client
        .get(format!("{}/api/books?book_id={}", base, book_id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}
