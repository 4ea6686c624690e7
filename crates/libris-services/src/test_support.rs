//! Shared mocks for service tests
//!
//! In-memory implementations of the store and cache traits. Each mock can
//! be switched into a failing mode that errors on every call, which is how
//! the fail-open cache behavior and the cache-only read path are exercised.

use async_trait::async_trait;
use chrono::Utc;
use libris_core::models::{Book, BookPatch, NewBook, NewReview, Review, ReviewPatch};
use libris_core::traits::{BookStore, CacheService, ReviewStore};
use libris_core::{AppError, AppResult};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory book store
pub struct MockBookStore {
    books: Mutex<Vec<Book>>,
    reviews: Mutex<Vec<Review>>,
    next_id: AtomicI32,
    inserts: AtomicUsize,
    updates: AtomicUsize,
    fail: bool,
}

impl MockBookStore {
    pub fn new() -> Self {
        Self::with_books(vec![])
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self {
            books: Mutex::new(books),
            reviews: Mutex::new(vec![]),
            next_id: AtomicI32::new(next_id),
            inserts: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// A store that errors on every call
    pub fn failing() -> Self {
        let mut store = Self::new();
        store.fail = true;
        store
    }

    pub fn add_review(&self, review: Review) {
        self.reviews.lock().unwrap().push(review);
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn check(&self) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Database("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for MockBookStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        self.check()?;
        Ok(self.books.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_title_author(&self, book_name: &str, author: &str) -> AppResult<Option<Book>> {
        self.check()?;
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.book_name == book_name && b.author == author)
            .cloned())
    }

    async fn find_with_reviews(&self, id: i32) -> AppResult<Option<(Book, Vec<Review>)>> {
        self.check()?;
        let book = match self.find_by_id(id).await? {
            Some(book) => book,
            None => return Ok(None),
        };
        let reviews = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.book_id == id)
            .cloned()
            .collect();
        Ok(Some((book, reviews)))
    }

    async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.check()?;
        Ok(self.books.lock().unwrap().clone())
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        self.check()?;
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let created = Book {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            book_name: book.book_name.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            language: book.language.clone(),
            created_at: now,
            updated_at: now,
        };
        self.books.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, patch: &BookPatch) -> AppResult<Book> {
        self.check()?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut books = self.books.lock().unwrap();
        let book = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(AppError::BookNotFound(id))?;
        if let Some(ref book_name) = patch.book_name {
            book.book_name = book_name.clone();
        }
        if let Some(ref author) = patch.author {
            book.author = author.clone();
        }
        if let Some(ref description) = patch.description {
            book.description = Some(description.clone());
        }
        if let Some(ref language) = patch.language {
            book.language = language.clone();
        }
        book.updated_at = Utc::now();
        Ok(book.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.check()?;
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| b.id != id);
        if books.len() == before {
            return Err(AppError::BookNotFound(id));
        }
        // Mirror the store-level cascade
        self.reviews.lock().unwrap().retain(|r| r.book_id != id);
        Ok(())
    }
}

/// In-memory review store
pub struct MockReviewStore {
    reviews: Mutex<Vec<Review>>,
    books: Mutex<Vec<Book>>,
    next_id: AtomicI32,
    inserts: AtomicUsize,
    updates: AtomicUsize,
}

impl MockReviewStore {
    pub fn new() -> Self {
        Self::with_state(vec![], vec![])
    }

    pub fn with_state(books: Vec<Book>, reviews: Vec<Review>) -> Self {
        let next_id = reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            reviews: Mutex::new(reviews),
            books: Mutex::new(books),
            next_id: AtomicI32::new(next_id),
            inserts: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewStore for MockReviewStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_with_book(&self, id: i32) -> AppResult<Option<(Review, Option<Book>)>> {
        let review = match self.find_by_id(id).await? {
            Some(review) => review,
            None => return Ok(None),
        };
        let book = self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == review.book_id)
            .cloned();
        Ok(Some((review, book)))
    }

    async fn insert(&self, review: &NewReview) -> AppResult<Review> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let created = Review {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            book_id: review.book_id,
            reviewer_name: review.reviewer_name.clone(),
            ratings: review.ratings,
            review: review.review.clone(),
            created_at: now,
            updated_at: now,
        };
        self.reviews.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, patch: &ReviewPatch) -> AppResult<Review> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut reviews = self.reviews.lock().unwrap();
        let review = reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::ReviewNotFound(id))?;
        if let Some(ref reviewer_name) = patch.reviewer_name {
            review.reviewer_name = reviewer_name.clone();
        }
        if let Some(ratings) = patch.ratings {
            review.ratings = ratings;
        }
        if let Some(ref text) = patch.review {
            review.review = text.clone();
        }
        review.updated_at = Utc::now();
        Ok(review.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut reviews = self.reviews.lock().unwrap();
        let before = reviews.len();
        reviews.retain(|r| r.id != id);
        if reviews.len() == before {
            return Err(AppError::ReviewNotFound(id));
        }
        Ok(())
    }
}

/// In-memory cache storing serialized JSON, like the real backend
pub struct MockCache {
    entries: Mutex<HashMap<String, String>>,
    fail: bool,
}

impl MockCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail: false,
        }
    }

    /// A cache that errors on every call
    pub fn failing() -> Self {
        let mut cache = Self::new();
        cache.fail = true;
        cache
    }

    pub fn seed<T: Serialize>(&self, key: &str, value: &T) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), serde_json::to_string(value).unwrap());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    fn check(&self) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Cache("cache unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheService for MockCache {
    async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        self.check()?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(key)
            .map(|json| serde_json::from_str(json).unwrap()))
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        _ttl_secs: u64,
    ) -> AppResult<()> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), serde_json::to_string(value).unwrap());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        self.check()?;
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }
}
