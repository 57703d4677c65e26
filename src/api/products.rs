use super::{body, params};
use crate::actions::{ProductInput, PRODUCT_PATHS};
use crate::api::envelope::ApiResponse;
use crate::app::AppState;
use crate::clients::CollectionApi;
use crate::error::AppError;
use crate::filters::ProductListQuery;
use crate::model::{Product, ProductUpdate};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

/// `GET /api/examples/products`: filtered by category, stock, featured, price
/// range and search text.
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Product>>>, AppError> {
    let query = params(query)?;
    let api = state.local_api().await?;
    let args = query.paging.find_args(query.filter());
    let page = api.products.find(args).await?;
    Ok(Json(ApiResponse::page(page)))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), AppError> {
    let input = body(payload)?;
    if let Some(missing) = input.missing_required() {
        return Err(AppError::BadRequest(missing));
    }
    let api = state.local_api().await?;
    let product = api.products.create_product(input.into_create()).await?;
    state.views.invalidate(&PRODUCT_PATHS).await;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(product).with_message("Product created successfully")),
    ))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let api = state.local_api().await?;
    api.products
        .get(id)
        .await?
        .map(|product| Json(ApiResponse::ok(product)))
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let update = body(payload)?;
    let api = state.local_api().await?;
    let product = api.products.update_product(id, update).await?;
    state.views.invalidate(&PRODUCT_PATHS).await;
    Ok(Json(
        ApiResponse::ok(product).with_message("Product updated successfully"),
    ))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let api = state.local_api().await?;
    let product = api.products.delete(id).await?;
    state.views.invalidate(&PRODUCT_PATHS).await;
    Ok(Json(
        ApiResponse::ok(product).with_message("Product deleted successfully"),
    ))
}
