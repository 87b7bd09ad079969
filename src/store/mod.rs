/// Credential Store
///
/// Persists user records and looks them up by username. Handlers only see
/// the `CredentialStore` trait; the concrete store is chosen at startup.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;

pub use memory::InMemoryCredentialStore;
pub use postgres::PostgresCredentialStore;

/// A registered user. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    /// `StoreError::Duplicate` if the username is taken
    async fn create_user(&self, user: &User) -> Result<(), StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}
