use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use shared::{CategoryListResponse, CreateCategoryRequest};
use tracing::info;

use crate::rest::{domain_error_response, AppState, AuthUser};

/// Axum handler for GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    info!("GET /api/categories - user: {}", user.id);

    match state.categories.list(user.id).await {
        Ok(categories) => {
            (StatusCode::OK, Json(CategoryListResponse { categories })).into_response()
        }
        Err(err) => domain_error_response(err),
    }
}

/// Axum handler for POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    info!("POST /api/categories - user: {}, name: {}", user.id, request.name);

    match state.categories.create(user.id, &request.name).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// Axum handler for DELETE /api/categories/:id
pub async fn remove_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/categories/{} - user: {}", category_id, user.id);

    match state.categories.remove(user.id, category_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => domain_error_response(err),
    }
}
