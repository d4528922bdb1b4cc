use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;

/// DbConnection manages the pooled SQLite handle shared by all repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection and set up the schema
    pub async fn new(url: &str) -> Result<Self> {
        // Foreign keys must be enabled per connection for the
        // ON DELETE SET NULL / CASCADE clauses to fire
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                username   TEXT    NOT NULL UNIQUE,
                password   TEXT    NOT NULL,
                email      TEXT    UNIQUE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id    INTEGER NOT NULL,
                name       TEXT    NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
                UNIQUE (user_id, name)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id     INTEGER NOT NULL,
                category_id INTEGER,
                amount      REAL    NOT NULL,
                date        TEXT    NOT NULL,
                description TEXT,
                created_at  DATETIME DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (user_id)     REFERENCES users(id)      ON DELETE CASCADE,
                FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE SET NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Get the underlying SQLite pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> DbConnection {
        DbConnection::init_test().await.expect("Failed to create test database")
    }

    #[tokio::test]
    async fn test_schema_creates_all_tables() {
        let db = setup_test().await;

        for table in ["users", "categories", "expenses"] {
            let row: Option<(String,)> = sqlx::query_as(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_optional(db.pool())
            .await
            .expect("Failed to query sqlite_master");

            assert!(row.is_some(), "Table {} should exist", table);
        }
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let db = setup_test().await;

        // Inserting a category for a user that does not exist must fail
        let result = sqlx::query("INSERT INTO categories (user_id, name) VALUES (?, ?)")
            .bind(9999_i64)
            .bind("Orphan")
            .execute(db.pool())
            .await;

        assert!(result.is_err(), "Foreign key violation should be rejected");
    }

    #[tokio::test]
    async fn test_deleting_category_nulls_expense_reference() {
        let db = setup_test().await;

        sqlx::query("INSERT INTO users (username, password) VALUES ('u', 'h')")
            .execute(db.pool())
            .await
            .expect("Failed to insert user");
        let cat = sqlx::query("INSERT INTO categories (user_id, name) VALUES (1, 'Food')")
            .execute(db.pool())
            .await
            .expect("Failed to insert category");
        let cat_id = cat.last_insert_rowid();
        sqlx::query("INSERT INTO expenses (user_id, category_id, amount, date) VALUES (1, ?, 5.0, '2025-07-01')")
            .bind(cat_id)
            .execute(db.pool())
            .await
            .expect("Failed to insert expense");

        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(cat_id)
            .execute(db.pool())
            .await
            .expect("Failed to delete category");

        let (category_id,): (Option<i64>,) =
            sqlx::query_as("SELECT category_id FROM expenses WHERE user_id = 1")
                .fetch_one(db.pool())
                .await
                .expect("Expense should still exist");
        assert_eq!(category_id, None, "Reference should be cleared, not cascaded");
    }
}
