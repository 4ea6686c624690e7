//! Review handlers
//!
//! HTTP handlers for the review endpoints.

use crate::dto::{ApiResponse, PostReviewRequest, ReviewQueryParams, UpdateReviewRequest};
use actix_web::{web, HttpResponse};
use libris_cache::RedisCache;
use libris_core::AppError;
use libris_db::PgReviewRepository;
use libris_services::ReviewService;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Build a review service for the current request
fn service(pool: &PgPool, cache: &RedisCache) -> ReviewService<PgReviewRepository, RedisCache> {
    ReviewService::new(
        Arc::new(PgReviewRepository::new(pool.clone())),
        Arc::new(cache.clone()),
    )
}

/// Post a review on a book
///
/// POST /api/reviews
#[instrument(skip(pool, cache, req))]
pub async fn post_review(
    pool: web::Data<PgPool>,
    cache: web::Data<RedisCache>,
    req: web::Json<PostReviewRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Review validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(book_id = req.book_id, "Posting review");

    let svc = service(&pool, &cache);
    let created = svc.create(req.into_inner().into()).await?;

    info!(id = created.id, book_id = created.book_id, "Review posted successfully");

    Ok(HttpResponse::Ok().json(ApiResponse::message("Review posted successfully")))
}

/// Partially update a review, keyed by id
///
/// PATCH /api/reviews
#[instrument(skip(pool, cache, req))]
pub async fn update_review(
    pool: web::Data<PgPool>,
    cache: web::Data<RedisCache>,
    req: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Review update validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let review_id = req.review_id;
    debug!(id = review_id, "Updating review");

    let svc = service(&pool, &cache);
    svc.update(review_id, req.into_inner().into()).await?;

    info!(id = review_id, "Review updated successfully");

    Ok(HttpResponse::Ok().json(ApiResponse::message("Review updated successfully")))
}

/// Fetch a review with its parent book
///
/// GET /api/reviews?review_id=<id>
#[instrument(skip(pool, cache))]
pub async fn get_review(
    pool: web::Data<PgPool>,
    cache: web::Data<RedisCache>,
    query: web::Query<ReviewQueryParams>,
) -> Result<HttpResponse, AppError> {
    let review_id = query.review_id;
    debug!(id = review_id, "Getting review");

    let svc = service(&pool, &cache);
    let detail = svc.get(review_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_data(
        "Review fetched successfully",
        detail,
    )))
}

/// Delete a review
///
/// DELETE /api/reviews?review_id=<id>
#[instrument(skip(pool, cache))]
pub async fn delete_review(
    pool: web::Data<PgPool>,
    cache: web::Data<RedisCache>,
    query: web::Query<ReviewQueryParams>,
) -> Result<HttpResponse, AppError> {
    let review_id = query.review_id;
    debug!(id = review_id, "Deleting review");

    let svc = service(&pool, &cache);
    svc.delete(review_id).await?;

    info!(id = review_id, "Review deleted successfully");

    Ok(HttpResponse::Ok().json(ApiResponse::message("Review deleted successfully")))
}

/// Configure review routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
            .route("", web::post().to(post_review))
            .route("", web::patch().to(update_review))
            .route("", web::get().to(get_review))
            .route("", web::delete().to(delete_review)),
    );
}
