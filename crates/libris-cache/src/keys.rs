//! Cache key constants and builders for libris
//!
//! Provides the standardized key naming for cached book projections,
//! ensuring consistency across the application and preventing key
//! collisions.
//!
//! # Key Patterns
//!
//! - `book:{id}` - Cached single book projection including nested reviews
//! - `books:all` - Cached listing projection (no reviews)

/// Prefix for cached single book projections
///
/// Format: `book:{id}`
pub const BOOK_KEY_PREFIX: &str = "book";

/// Key for the cached full book listing
pub const BOOKS_ALL_KEY: &str = "books:all";

/// Fixed TTL for cached book projections (seconds)
pub const BOOK_TTL_SECS: u64 = 6400;

/// Build a cache key for a single book projection
///
/// # Example
///
/// ```
/// use libris_cache::keys::book_key;
///
/// let key = book_key(42);
/// assert_eq!(key, "book:42");
/// ```
pub fn book_key(id: i32) -> String {
    format!("{}:{}", BOOK_KEY_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_key_format() {
        assert_eq!(book_key(1), "book:1");
        assert_eq!(book_key(9001), "book:9001");
    }

    #[test]
    fn test_listing_key_is_stable() {
        assert_eq!(BOOKS_ALL_KEY, "books:all");
    }

    #[test]
    fn test_ttl() {
        assert_eq!(BOOK_TTL_SECS, 6400);
    }
}
