use shared::Category;
use tracing::{info, warn};

use crate::domain::errors::{is_unique_violation, DomainError, DomainResult};
use crate::storage::category_repository::CategoryRepository;
use crate::storage::DbConnection;

/// Service for a user's named spending categories
#[derive(Clone)]
pub struct CategoryService {
    categories: CategoryRepository,
}

impl CategoryService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            categories: CategoryRepository::new(db),
        }
    }

    /// Create a category for the user.
    ///
    /// The (user_id, name) duplicate pre-check gives the better error
    /// message; the store's unique constraint backstops a lost race.
    pub async fn create(&self, user_id: i64, name: &str) -> DomainResult<Category> {
        if name.is_empty() {
            return Err(DomainError::validation("Category name is required"));
        }

        if self.categories.name_exists(user_id, name).await? {
            return Err(DomainError::validation("Category name already exists"));
        }

        let id = match self.categories.insert(user_id, name).await {
            Ok(id) => id,
            Err(err) if is_unique_violation(&err) => {
                warn!("Lost duplicate-name race for user {} name {}", user_id, name);
                return Err(DomainError::validation("Category name already exists"));
            }
            Err(err) => return Err(err.into()),
        };

        info!("Created category {} ({}) for user {}", name, id, user_id);

        Ok(Category {
            id,
            user_id,
            name: name.to_string(),
        })
    }

    /// List the user's categories, newest first
    pub async fn list(&self, user_id: i64) -> DomainResult<Vec<Category>> {
        let categories = self.categories.list_for_user(user_id).await?;
        Ok(categories)
    }

    /// Whether a category exists and is owned by the user.
    ///
    /// The existence-check contract the expense service consumes for
    /// cross-reference validation.
    pub async fn exists(&self, user_id: i64, category_id: i64) -> DomainResult<bool> {
        Ok(self.categories.exists(user_id, category_id).await?)
    }

    /// Delete the user's category.
    ///
    /// A category that does not exist and one owned by someone else are
    /// both reported as not found. Expenses referencing the category
    /// keep existing with their reference cleared by the store.
    pub async fn remove(&self, user_id: i64, category_id: i64) -> DomainResult<()> {
        let affected = self.categories.delete(user_id, category_id).await?;
        if affected == 0 {
            return Err(DomainError::not_found(format!(
                "Category {} not found",
                category_id
            )));
        }

        info!("Deleted category {} for user {}", category_id, user_id);
        Ok(())
    }
}
