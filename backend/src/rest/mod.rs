use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use crate::auth::JwtService;
use crate::domain::{CategoryService, DomainError, ExpenseService, UserService};

pub mod category_apis;
pub mod expense_apis;
pub mod user_apis;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub categories: CategoryService,
    pub expenses: ExpenseService,
    pub tokens: Arc<JwtService>,
}

/// The trusted caller identity established by the bearer middleware
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// Build the API router; every route below /api/categories and
/// /api/expenses sits behind the bearer-token gate
pub fn api_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/users/:username", get(user_apis::get_user))
        .route(
            "/categories",
            get(category_apis::list_categories).post(category_apis::create_category),
        )
        .route("/categories/:id", delete(category_apis::remove_category))
        .route(
            "/expenses",
            get(expense_apis::list_expenses).post(expense_apis::create_expense),
        )
        .route(
            "/expenses/:id",
            get(expense_apis::get_expense)
                .put(expense_apis::update_expense)
                .delete(expense_apis::remove_expense),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/users/register", post(user_apis::register))
        .route("/users/login", post(user_apis::login))
        .merge(protected)
        .with_state(state)
}

/// Verify the bearer token once per request and hand the trusted
/// identity to the handlers via request extensions
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return unauthorized("Missing or invalid Authorization header");
    };

    match state.tokens.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser {
                id: claims.sub,
                username: claims.username,
            });
            next.run(request).await
        }
        Err(_) => unauthorized("Invalid or expired token"),
    }
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
}

/// Map a domain error to its transport status
pub fn domain_error_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(message) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
        DomainError::NotFound(message) => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
        }
        DomainError::Unexpected(err) => {
            tracing::error!("Unexpected error: {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_domain_errors_map_to_expected_statuses() {
        let response = domain_error_response(DomainError::validation("bad input"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = domain_error_response(DomainError::not_found("missing"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = domain_error_response(anyhow::anyhow!("boom").into());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
