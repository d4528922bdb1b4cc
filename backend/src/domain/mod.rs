pub mod category_service;
pub mod errors;
pub mod expense_service;
pub mod user_service;

pub use category_service::CategoryService;
pub use errors::{DomainError, DomainResult};
pub use expense_service::ExpenseService;
pub use user_service::UserService;

#[cfg(test)]
mod tests {
    use shared::{CreateExpenseRequest, RegisterRequest, UpdateExpenseRequest};

    use super::*;
    use crate::auth::JwtService;
    use crate::storage::DbConnection;

    struct TestApp {
        users: UserService,
        categories: CategoryService,
        expenses: ExpenseService,
        tokens: JwtService,
    }

    async fn setup_app() -> TestApp {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        TestApp {
            users: UserService::new(db.clone()),
            categories: CategoryService::new(db.clone()),
            expenses: ExpenseService::new(db),
            tokens: JwtService::new(b"test-secret", 24),
        }
    }

    #[tokio::test]
    async fn test_register_login_track_and_recategorize() {
        let app = setup_app().await;

        // Register and log in as alice
        let registered = app
            .users
            .register(RegisterRequest {
                username: "alice".to_string(),
                password: "secret1".to_string(),
                email: None,
            })
            .await
            .expect("Registration should succeed");

        let user = app
            .users
            .authenticate("alice", "secret1")
            .await
            .expect("Login should succeed");
        let token = app
            .tokens
            .issue(user.id, &user.username)
            .expect("Token issuance should succeed");

        // The identity a gatekeeper would extract from the token
        let claims = app.tokens.verify(&token).expect("Token should verify");
        assert_eq!(claims.sub, registered.id);
        let user_id = claims.sub;

        // Create a category and an expense under it
        let food = app
            .categories
            .create(user_id, "Food")
            .await
            .expect("Category creation should succeed");
        assert!(food.id > 0);

        let expense = app
            .expenses
            .create(
                user_id,
                CreateExpenseRequest {
                    category_id: Some(food.id),
                    amount: 12.5,
                    date: "2025-07-20".to_string(),
                    description: Some("lunch".to_string()),
                },
            )
            .await
            .expect("Expense creation should succeed");
        assert_eq!(expense.category_id, Some(food.id));

        // The July listing contains exactly that expense
        let listed = app
            .expenses
            .list(user_id, Some("2025-07-01"), Some("2025-07-31"))
            .await
            .expect("Listing should succeed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].description.as_deref(), Some("lunch"));

        // Deleting the category clears the reference but keeps the expense
        app.categories
            .remove(user_id, food.id)
            .await
            .expect("Category removal should succeed");

        let reloaded = app
            .expenses
            .get_by_id(user_id, expense.id)
            .await
            .expect("Expense should survive");
        assert_eq!(reloaded.category_id, None);
    }

    #[tokio::test]
    async fn test_cross_user_references_are_rejected() {
        let app = setup_app().await;

        let alice = app
            .users
            .register(RegisterRequest {
                username: "alice".to_string(),
                password: "secret1".to_string(),
                email: None,
            })
            .await
            .unwrap();
        let bob = app
            .users
            .register(RegisterRequest {
                username: "bob".to_string(),
                password: "secret2".to_string(),
                email: None,
            })
            .await
            .unwrap();

        let bobs_category = app.categories.create(bob.id, "Rent").await.unwrap();

        // Alice cannot attach her expense to bob's category
        let err = app
            .expenses
            .create(
                alice.id,
                CreateExpenseRequest {
                    category_id: Some(bobs_category.id),
                    amount: 10.0,
                    date: "2025-07-01".to_string(),
                    description: None,
                },
            )
            .await
            .expect_err("Cross-user category reference should fail");
        assert!(matches!(err, DomainError::Validation(_)));

        // Alice cannot see, patch, or delete bob's expense
        let bobs_expense = app
            .expenses
            .create(
                bob.id,
                CreateExpenseRequest {
                    category_id: None,
                    amount: 99.0,
                    date: "2025-07-02".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();

        let err = app
            .expenses
            .get_by_id(alice.id, bobs_expense.id)
            .await
            .expect_err("Fetch should fail");
        assert!(matches!(err, DomainError::NotFound(_)));

        let err = app
            .expenses
            .update(alice.id, bobs_expense.id, UpdateExpenseRequest::default())
            .await
            .expect_err("Update should fail");
        assert!(matches!(err, DomainError::NotFound(_)));

        let err = app
            .expenses
            .remove(alice.id, bobs_expense.id)
            .await
            .expect_err("Delete should fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
