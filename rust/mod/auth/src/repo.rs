use std::sync::Arc;

use taskhub_core::ServiceError;
use taskhub_kv::KVStore;
use taskhub_store::Collection;

use crate::model::User;

/// Sole reader and writer of the `users` collection.
#[derive(Clone)]
pub struct UserRepository {
    users: Collection<User>,
}

impl UserRepository {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            users: Collection::new(kv),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<User>, ServiceError> {
        self.users.find_all().await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        self.users.find_by_unique("username", username).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        self.users.find_by_unique("email", email).await
    }

    /// Fails with `Conflict` when the username or email is already taken.
    pub async fn insert(&self, user: User) -> Result<User, ServiceError> {
        self.users.insert(user).await
    }

    pub async fn count(&self) -> Result<usize, ServiceError> {
        self.users.count().await
    }
}
