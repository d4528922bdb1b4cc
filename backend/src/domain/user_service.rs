use shared::{RegisterRequest, User};
use tracing::{info, warn};

use crate::auth::password;
use crate::domain::errors::{is_unique_violation, DomainError, DomainResult};
use crate::storage::user_repository::{StoredUser, UserRepository};
use crate::storage::DbConnection;

/// Service for registration, authentication and user lookup
#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            users: UserRepository::new(db),
        }
    }

    /// Register a new user, hashing the password before it is stored.
    ///
    /// The duplicate-username pre-check gives the better error message;
    /// the store's unique constraint is the backstop for a lost race
    /// and is reported the same way.
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<User> {
        info!("Registering user: {}", request.username);

        if request.username.is_empty() {
            return Err(DomainError::validation("Username is required"));
        }
        if request.password.is_empty() {
            return Err(DomainError::validation("Password is required"));
        }

        if self.users.username_exists(&request.username).await? {
            return Err(DomainError::validation("Username already exists"));
        }

        let password_hash = password::hash_password(&request.password)?;

        let id = match self
            .users
            .insert(&request.username, &password_hash, request.email.as_deref())
            .await
        {
            Ok(id) => id,
            Err(err) if is_unique_violation(&err) => {
                warn!("Uniqueness violation registering {}", request.username);
                return Err(DomainError::validation("Username or email already exists"));
            }
            Err(err) => return Err(err.into()),
        };

        info!("Registered user {} with id {}", request.username, id);

        Ok(User {
            id,
            username: request.username,
            email: request.email,
        })
    }

    /// Verify a username/password pair and return the matching user.
    ///
    /// A missing username is reported as not found while a wrong
    /// password is a validation failure, matching the existing external
    /// contract.
    pub async fn authenticate(&self, username: &str, plain_password: &str) -> DomainResult<User> {
        if username.is_empty() {
            return Err(DomainError::validation("Username is required"));
        }
        if plain_password.is_empty() {
            return Err(DomainError::validation("Password is required"));
        }

        let user = self.find_by_username(username).await?;

        let ok = password::verify_password(plain_password, &user.password_hash)?;
        if !ok {
            warn!("Failed login attempt for {}", username);
            return Err(DomainError::validation("Invalid password"));
        }

        info!("Authenticated user {}", username);

        Ok(User {
            id: user.id,
            username: user.username,
            email: user.email,
        })
    }

    /// Look up a user by username, credential digest included.
    ///
    /// Backend-internal: the digest must not cross the REST boundary.
    pub async fn find_by_username(&self, username: &str) -> DomainResult<StoredUser> {
        if username.is_empty() {
            return Err(DomainError::validation("Username is required"));
        }

        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", username)))
    }
}
