use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{LoginRequest, LoginResponse, RegisterRequest, TokenUser, User};
use tracing::info;

use crate::rest::{domain_error_response, AppState};

/// Axum handler for POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> impl IntoResponse {
    info!("POST /api/users/register - username: {}", request.username);

    match state.users.register(request).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// Axum handler for POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/users/login - username: {}", request.username);

    let user = match state
        .users
        .authenticate(&request.username, &request.password)
        .await
    {
        Ok(user) => user,
        Err(err) => return domain_error_response(err),
    };

    match state.tokens.issue(user.id, &user.username) {
        Ok(token) => (
            StatusCode::OK,
            Json(LoginResponse {
                token,
                user: TokenUser {
                    id: user.id,
                    username: user.username,
                },
            }),
        )
            .into_response(),
        Err(err) => domain_error_response(err.into()),
    }
}

/// Axum handler for GET /api/users/:username
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}", username);

    match state.users.find_by_username(&username).await {
        // The stored digest stays behind the boundary
        Ok(user) => (
            StatusCode::OK,
            Json(User {
                id: user.id,
                username: user.username,
                email: user.email,
            }),
        )
            .into_response(),
        Err(err) => domain_error_response(err),
    }
}
