use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use super::{CredentialStore, User};
use crate::error::StoreError;

/// Process-local store keyed by username. Used by the test suite and for
/// running without a database.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("user map lock poisoned".to_string())
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(poisoned)?;
        match users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(format!(
                "username {} already registered",
                user.username
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryCredentialStore::new();
        let user = User::new("alice", "$2b$04$hash");

        store.create_user(&user).await.expect("Failed to create user");

        let found = store.find_by_username("alice").await.expect("Lookup failed");
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let store = InMemoryCredentialStore::new();

        let found = store.find_by_username("nobody").await.expect("Lookup failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_keeps_original() {
        let store = InMemoryCredentialStore::new();
        store
            .create_user(&User::new("alice", "first"))
            .await
            .expect("Failed to create user");

        let result = store.create_user(&User::new("alice", "second")).await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));

        let found = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "first");
    }
}
