//! JSON routes under `/api/examples`.

pub mod envelope;
pub mod posts;
pub mod products;

use crate::app::AppState;
use crate::error::AppError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/examples/posts",
            get(posts::list_posts).post(posts::create_post),
        )
        .route(
            "/api/examples/posts/{id}",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/api/examples/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/examples/products/{id}",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
}

/// Unwraps a JSON body, turning axum's rejection into the failure envelope.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Same as [`body`] for query strings, so a malformed query still gets the envelope.
fn params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
