use super::{body, params};
use crate::actions::{PostInput, POST_PATHS};
use crate::api::envelope::ApiResponse;
use crate::app::AppState;
use crate::clients::CollectionApi;
use crate::error::AppError;
use crate::filters::PostListQuery;
use crate::model::{Post, PostUpdate};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

/// `GET /api/examples/posts`: filtered, sorted, paginated; drafts included.
pub async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<PostListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Post>>>, AppError> {
    let query = params(query)?;
    let api = state.local_api().await?;
    let args = query.paging.find_args(query.filter());
    let page = api.posts.find(args).await?;
    Ok(Json(ApiResponse::page(page)))
}

pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<PostInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), AppError> {
    let input = body(payload)?;
    if let Some(missing) = input.missing_required() {
        return Err(AppError::BadRequest(missing));
    }
    let api = state.local_api().await?;
    let post = api.posts.create_post(input.into_create()).await?;
    state.views.invalidate(&POST_PATHS).await;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(post).with_message("Post created successfully")),
    ))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let api = state.local_api().await?;
    match api.posts.get(id).await? {
        Some(post) => Ok(Json(ApiResponse::ok(post))),
        None => Err(AppError::NotFound("Post not found".to_string())),
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PostUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let update = body(payload)?;
    let api = state.local_api().await?;
    let post = api.posts.update_post(id, update).await?;
    state.views.invalidate(&POST_PATHS).await;
    Ok(Json(
        ApiResponse::ok(post).with_message("Post updated successfully"),
    ))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let api = state.local_api().await?;
    let post = api.posts.delete(id).await?;
    state.views.invalidate(&POST_PATHS).await;
    Ok(Json(
        ApiResponse::ok(post).with_message("Post deleted successfully"),
    ))
}
