use shared::{CreateExpenseRequest, Expense, UpdateExpenseRequest};
use tracing::{info, warn};

use crate::domain::category_service::CategoryService;
use crate::domain::errors::{is_foreign_key_violation, DomainError, DomainResult};
use crate::storage::expense_repository::ExpenseRepository;
use crate::storage::DbConnection;

/// Service for a user's dated expense records
#[derive(Clone)]
pub struct ExpenseService {
    expenses: ExpenseRepository,
    categories: CategoryService,
}

impl ExpenseService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            expenses: ExpenseRepository::new(db.clone()),
            categories: CategoryService::new(db),
        }
    }

    /// Create an expense for the user.
    ///
    /// A supplied category must exist and belong to the same user.
    pub async fn create(&self, user_id: i64, request: CreateExpenseRequest) -> DomainResult<Expense> {
        if !(request.amount > 0.0) {
            return Err(DomainError::validation("Amount must be a positive number"));
        }
        if request.date.is_empty() {
            return Err(DomainError::validation("Date is required"));
        }

        if let Some(category_id) = request.category_id {
            if !self.categories.exists(user_id, category_id).await? {
                return Err(DomainError::validation("Invalid categoryId"));
            }
        }

        let id = self
            .expenses
            .insert(
                user_id,
                request.category_id,
                request.amount,
                &request.date,
                request.description.as_deref(),
            )
            .await?;

        info!("Created expense {} for user {}", id, user_id);

        // Re-read so the caller sees the store-assigned created_at
        self.expenses
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| DomainError::Unexpected(anyhow::anyhow!("Expense {} vanished after insert", id)))
    }

    /// List the user's expenses with date inside [from, to], newest first.
    ///
    /// Both bounds are required and inclusive.
    pub async fn list(
        &self,
        user_id: i64,
        from: Option<&str>,
        to: Option<&str>,
    ) -> DomainResult<Vec<Expense>> {
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => (from, to),
            _ => return Err(DomainError::validation("Both from and to dates are required")),
        };

        let expenses = self.expenses.list_in_range(user_id, from, to).await?;
        Ok(expenses)
    }

    /// Get a single expense owned by the user
    pub async fn get_by_id(&self, user_id: i64, expense_id: i64) -> DomainResult<Expense> {
        self.expenses
            .find_by_id(user_id, expense_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Expense {} not found", expense_id)))
    }

    /// Apply a partial patch to the user's expense.
    ///
    /// Fields absent from the patch keep their prior value; an explicit
    /// null clears category_id or description. The merged amount must
    /// stay positive, and a newly supplied category gets the same
    /// ownership check as on create, with the store's foreign key as
    /// the backstop.
    pub async fn update(
        &self,
        user_id: i64,
        expense_id: i64,
        patch: UpdateExpenseRequest,
    ) -> DomainResult<Expense> {
        let existing = self.get_by_id(user_id, expense_id).await?;

        let category_id = match patch.category_id {
            Some(category_id) => category_id,
            None => existing.category_id,
        };
        let amount = patch.amount.unwrap_or(existing.amount);
        let date = match patch.date {
            Some(date) if !date.is_empty() => date,
            _ => existing.date,
        };
        let description = match patch.description {
            Some(description) => description,
            None => existing.description,
        };

        if !(amount > 0.0) {
            return Err(DomainError::validation("Amount must be a positive number"));
        }
        if let Some(Some(new_category)) = patch.category_id {
            if !self.categories.exists(user_id, new_category).await? {
                return Err(DomainError::validation("Invalid categoryId"));
            }
        }

        let affected = match self
            .expenses
            .update(user_id, expense_id, category_id, amount, &date, description.as_deref())
            .await
        {
            Ok(affected) => affected,
            Err(err) if is_foreign_key_violation(&err) => {
                warn!("Category {:?} rejected by store for user {}", category_id, user_id);
                return Err(DomainError::validation("Invalid categoryId"));
            }
            Err(err) => return Err(err.into()),
        };
        // The row can vanish between the load and the write
        if affected == 0 {
            return Err(DomainError::not_found(format!(
                "Expense {} not found",
                expense_id
            )));
        }

        info!("Updated expense {} for user {}", expense_id, user_id);

        Ok(Expense {
            id: expense_id,
            user_id,
            category_id,
            amount,
            date,
            description,
            created_at: existing.created_at,
        })
    }

    /// Delete the user's expense
    pub async fn remove(&self, user_id: i64, expense_id: i64) -> DomainResult<()> {
        let affected = self.expenses.delete(user_id, expense_id).await?;
        if affected == 0 {
            return Err(DomainError::not_found(format!(
                "Expense {} not found",
                expense_id
            )));
        }

        info!("Deleted expense {} for user {}", expense_id, user_id);
        Ok(())
    }
}
