use crate::{
    AppState,
    dto::{CreatePostRequest, ListPostsQuery, PostListResponse, PostResponse, UpdatePostRequest},
    errors::ApiError,
    extract::ApiJson,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::{info, warn};

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Post {} not found", id))
}

/// GET /posts?title=...
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<PostListResponse>, ApiError> {
    let posts = state.store.list(query.into()).await?;

    Ok(Json(PostListResponse {
        posts: posts.iter().map(|post| post.api_response()).collect(),
    }))
}

/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state.store.get(&id).await?.ok_or_else(|| not_found(&id))?;

    Ok(Json(post.api_response()))
}

/// POST /posts
/// Body: { "title": "...", "content": "...", "author": { "firstName": "...", "lastName": "..." } }
pub async fn create_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let post = payload.into_post().inspect_err(|e| warn!("Rejected post: {:?}", e))?;

    let post = state.store.insert(post).await?;

    info!("Post created: {}", post.id);

    Ok((StatusCode::CREATED, Json(post.api_response())))
}

/// PUT /posts/:id
/// Body: { "id": "...", ...any of title, content, author.firstName, author.lastName }
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    payload
        .check_id(&id)
        .inspect_err(|e| warn!("Rejected update: {:?}", e))?;
    let patch = payload.into_patch()?;

    let post = state
        .store
        .update(&id, patch)
        .await?
        .ok_or_else(|| not_found(&id))?;

    info!("Post updated: {}", id);

    Ok(Json(post.api_response()))
}

/// DELETE /posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete(&id).await? {
        return Err(not_found(&id));
    }

    info!("Item with Id: {} has been deleted.", id);

    Ok(StatusCode::NO_CONTENT)
}
