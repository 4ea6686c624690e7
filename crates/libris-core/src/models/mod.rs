//! Domain models for libris
//!
//! This module contains the book and review entities, the payload types used
//! by the stores, and the response projections served (and cached) by the
//! services.

pub mod book;
pub mod review;

pub use book::{Book, BookDetail, BookPatch, BookSummary, NewBook};
pub use review::{NewReview, Review, ReviewDetail, ReviewPatch, ReviewSummary};
