use serde::{Deserialize, Serialize};

/// A registered user as exposed to callers.
///
/// The stored credential digest is backend-internal and never appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

/// A named spending category owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

/// A dated expense record, optionally tied to one of the owner's categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    /// Category owned by the same user, or None for uncategorized
    pub category_id: Option<i64>,
    /// Strictly positive
    pub amount: f64,
    /// Calendar date in YYYY-MM-DD form, no timezone
    pub date: String,
    pub description: Option<String>,
    /// Store-assigned creation timestamp
    pub created_at: String,
}

/// Request to register a new user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

/// Request to log in with username/password
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Identity payload returned alongside an issued token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUser {
    pub id: i64,
    pub username: String,
}

/// Response to a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: TokenUser,
}

/// Request to create a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

/// Request to create an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub category_id: Option<i64>,
    pub amount: f64,
    pub date: String,
    pub description: Option<String>,
}

/// Partial update for an expense. Fields left absent keep their prior value.
///
/// `category_id` and `description` distinguish "absent" (outer None, keep)
/// from an explicit JSON null (Some(None), clear the field).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

/// Deserializes a present field into `Some(...)`, mapping JSON null to
/// `Some(None)` so it stays distinct from the `#[serde(default)]` outer None.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}
