use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use shared::{CreateExpenseRequest, ExpenseListResponse, UpdateExpenseRequest};
use tracing::info;

use crate::rest::{domain_error_response, AppState, AuthUser};

/// Query parameters for the expense list endpoint.
///
/// Both bounds are required; presence is checked by the service so the
/// failure surfaces as the domain's validation error.
#[derive(Deserialize, Debug)]
pub struct ExpenseListQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Axum handler for GET /api/expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ExpenseListQuery>,
) -> impl IntoResponse {
    info!("GET /api/expenses - user: {}, query: {:?}", user.id, query);

    match state
        .expenses
        .list(user.id, query.from.as_deref(), query.to.as_deref())
        .await
    {
        Ok(expenses) => (StatusCode::OK, Json(ExpenseListResponse { expenses })).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// Axum handler for POST /api/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses - user: {}", user.id);

    match state.expenses.create(user.id, request).await {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// Axum handler for GET /api/expenses/:id
pub async fn get_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(expense_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/expenses/{} - user: {}", expense_id, user.id);

    match state.expenses.get_by_id(user.id, expense_id).await {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// Axum handler for PUT /api/expenses/:id
pub async fn update_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(expense_id): Path<i64>,
    Json(patch): Json<UpdateExpenseRequest>,
) -> impl IntoResponse {
    info!("PUT /api/expenses/{} - user: {}", expense_id, user.id);

    match state.expenses.update(user.id, expense_id, patch).await {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// Axum handler for DELETE /api/expenses/:id
pub async fn remove_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(expense_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/{} - user: {}", expense_id, user.id);

    match state.expenses.remove(user.id, expense_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => domain_error_response(err),
    }
}
