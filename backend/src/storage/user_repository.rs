use sqlx::Row;

use crate::storage::DbConnection;

/// A user row as stored, including the credential digest.
///
/// Never leaves the backend; the public `shared::User` carries no hash.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
}

/// Repository for user rows
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a user and return the store-assigned id.
    ///
    /// Surfaces the raw store error so the service can classify
    /// uniqueness violations.
    pub async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password, email)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Look up a user by username, digest included
    pub async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password, email
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| StoredUser {
            id: r.get("id"),
            username: r.get("username"),
            password_hash: r.get("password"),
            email: r.get("email"),
        }))
    }

    /// Check whether a username is already taken
    pub async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.is_some())
    }
}
