//! Book handlers
//!
//! HTTP handlers for the book endpoints. Each handler builds the service
//! over the request-scoped pool handle and the injected cache client.

use crate::dto::{
    ApiResponse, BookQueryParams, CreateBookRequest, DeleteBookParams, UpdateBookRequest,
};
use actix_web::{web, HttpResponse};
use libris_cache::RedisCache;
use libris_core::{AppConfig, AppError};
use libris_db::PgBookRepository;
use libris_services::{BookCreation, BookService};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Build a book service for the current request
fn service(
    pool: &PgPool,
    cache: &RedisCache,
    config: &AppConfig,
) -> BookService<PgBookRepository, RedisCache> {
    BookService::new(
        Arc::new(PgBookRepository::new(pool.clone())),
        Arc::new(cache.clone()),
        config.redis.default_ttl_secs,
    )
}

/// Create a book
///
/// POST /api/books
#[instrument(skip(pool, cache, config, req))]
pub async fn create_book(
    pool: web::Data<PgPool>,
    cache: web::Data<RedisCache>,
    config: web::Data<AppConfig>,
    req: web::Json<CreateBookRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Book creation validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(book_name = %req.book_name, author = %req.author, "Creating book");

    let svc = service(&pool, &cache, &config);

    match svc.create(req.into_inner().into()).await? {
        BookCreation::AlreadyPresent(book) => {
            debug!(id = book.id, "Book already present");
            Ok(HttpResponse::Ok().json(ApiResponse::with_data(
                "Book is already present",
                book,
            )))
        }
        BookCreation::Created => {
            info!("Book created successfully");
            Ok(HttpResponse::Ok().json(ApiResponse::message("Book created successfully")))
        }
    }
}

/// Partially update a book, keyed by id
///
/// PATCH /api/books
#[instrument(skip(pool, cache, config, req))]
pub async fn update_book(
    pool: web::Data<PgPool>,
    cache: web::Data<RedisCache>,
    config: web::Data<AppConfig>,
    req: web::Json<UpdateBookRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Book update validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let book_id = req.book_id;
    debug!(id = book_id, "Updating book");

    let svc = service(&pool, &cache, &config);
    svc.update(book_id, req.into_inner().into()).await?;

    info!(id = book_id, "Book updated successfully");

    Ok(HttpResponse::Ok().json(ApiResponse::message("Book updated successfully")))
}

/// Fetch a single book with its reviews, or list all books
///
/// GET /api/books?book_id=<id>   (book_id optional)
#[instrument(skip(pool, cache, config))]
pub async fn get_books(
    pool: web::Data<PgPool>,
    cache: web::Data<RedisCache>,
    config: web::Data<AppConfig>,
    query: web::Query<BookQueryParams>,
) -> Result<HttpResponse, AppError> {
    let svc = service(&pool, &cache, &config);

    match query.book_id {
        Some(book_id) => {
            debug!(id = book_id, "Getting book with reviews");
            let detail = svc.get(book_id).await?;
            Ok(HttpResponse::Ok().json(ApiResponse::with_data(
                "Book and its reviews fetched successfully",
                detail,
            )))
        }
        None => {
            debug!("Listing all books");
            let listing = svc.list().await?;
            Ok(HttpResponse::Ok().json(ApiResponse::with_data(
                "All books fetched successfully",
                listing,
            )))
        }
    }
}

/// Delete a book (and, by cascade, its reviews)
///
/// DELETE /api/books?book_id=<id>
#[instrument(skip(pool, cache, config))]
pub async fn delete_book(
    pool: web::Data<PgPool>,
    cache: web::Data<RedisCache>,
    config: web::Data<AppConfig>,
    query: web::Query<DeleteBookParams>,
) -> Result<HttpResponse, AppError> {
    let book_id = query.book_id;
    debug!(id = book_id, "Deleting book");

    let svc = service(&pool, &cache, &config);
    svc.delete(book_id).await?;

    info!(id = book_id, "Book deleted successfully");

    Ok(HttpResponse::Ok().json(ApiResponse::message("Book deleted successfully")))
}

/// Configure book routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/books")
            .route("", web::post().to(create_book))
            .route("", web::patch().to(update_book))
            .route("", web::get().to(get_books))
            .route("", web::delete().to(delete_book)),
    );
}
