use shared::Expense;
use sqlx::Row;

use crate::storage::DbConnection;

/// Repository for expense rows
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Expense {
    Expense {
        id: row.get("id"),
        user_id: row.get("user_id"),
        category_id: row.get("category_id"),
        amount: row.get("amount"),
        date: row.get("date"),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert an expense and return the store-assigned id.
    ///
    /// One fixed statement shape; an absent category is a NULL bind.
    pub async fn insert(
        &self,
        user_id: i64,
        category_id: Option<i64>,
        amount: f64,
        date: &str,
        description: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (user_id, category_id, amount, date, description)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .bind(amount)
        .bind(date)
        .bind(description)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a single expense owned by the user
    pub async fn find_by_id(
        &self,
        user_id: i64,
        expense_id: i64,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, category_id, amount, date, description, created_at
            FROM expenses
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(expense_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(row_to_expense))
    }

    /// List the user's expenses with date in [from, to], newest first
    pub async fn list_in_range(
        &self,
        user_id: i64,
        from: &str,
        to: &str,
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, category_id, amount, date, description, created_at
            FROM expenses
            WHERE user_id = ?
              AND date BETWEEN ? AND ?
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_expense).collect())
    }

    /// Persist a merged expense record, returning affected rows so the
    /// caller can tell whether the row still existed.
    ///
    /// Surfaces the raw store error so the service can classify a
    /// foreign-key violation on category_id.
    pub async fn update(
        &self,
        user_id: i64,
        expense_id: i64,
        category_id: Option<i64>,
        amount: f64,
        date: &str,
        description: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET category_id = ?, amount = ?, date = ?, description = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(category_id)
        .bind(amount)
        .bind(date)
        .bind(description)
        .bind(user_id)
        .bind(expense_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete the expense if owned by the user, returning affected rows
    pub async fn delete(&self, user_id: i64, expense_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(expense_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> ExpenseRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        sqlx::query("INSERT INTO users (username, password) VALUES ('alice', 'hash')")
            .execute(db.pool())
            .await
            .expect("Failed to seed user");
        ExpenseRepository::new(db)
    }

    #[tokio::test]
    async fn test_update_reports_affected_rows() {
        let repo = setup_test().await;
        let user_id = 1;

        let id = repo
            .insert(user_id, None, 10.0, "2025-07-01", None)
            .await
            .expect("Insert should succeed");

        let affected = repo
            .update(user_id, id, None, 20.0, "2025-07-02", None)
            .await
            .expect("Update should succeed");
        assert_eq!(affected, 1);

        // A row deleted out from under the caller yields zero affected
        // rows, never a silent success
        repo.delete(user_id, id).await.expect("Delete should succeed");
        let affected = repo
            .update(user_id, id, None, 30.0, "2025-07-03", None)
            .await
            .expect("Update of a missing row is not a store error");
        assert_eq!(affected, 0);
    }
}
