use shared::Category;
use sqlx::Row;

use crate::storage::DbConnection;

/// Repository for category rows
#[derive(Clone)]
pub struct CategoryRepository {
    db: DbConnection,
}

impl CategoryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a category and return the store-assigned id.
    ///
    /// Surfaces the raw store error so the service can classify a lost
    /// race on the (user_id, name) unique constraint.
    pub async fn insert(&self, user_id: i64, name: &str) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO categories (user_id, name)
            VALUES (?, ?)
            "#,
        )
        .bind(user_id)
        .bind(name)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Check whether the user already has a category with this name
    pub async fn name_exists(&self, user_id: i64, name: &str) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM categories WHERE user_id = ? AND name = ?")
            .bind(user_id)
            .bind(name)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.is_some())
    }

    /// Check whether a category exists and is owned by the user
    pub async fn exists(&self, user_id: i64, category_id: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM categories WHERE id = ? AND user_id = ?")
            .bind(category_id)
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.is_some())
    }

    /// List the user's categories, newest first
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Category>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name
            FROM categories
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        let categories = rows
            .iter()
            .map(|row| Category {
                id: row.get("id"),
                user_id: row.get("user_id"),
                name: row.get("name"),
            })
            .collect();

        Ok(categories)
    }

    /// Delete the category if owned by the user, returning affected rows
    pub async fn delete(&self, user_id: i64, category_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(category_id)
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }
}
