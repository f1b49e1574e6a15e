use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Role, User};
use crate::errors::ServiceError;

/// Credential Store: persistence of users keyed by unique email.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user; `AlreadyExists` when the email is taken.
    async fn save_user(&self, email: &str, password_hash: &str, role: Role) -> Result<Uuid, ServiceError>;
    /// `NotFound` when no user has this email.
    async fn get_user(&self, email: &str) -> Result<User, ServiceError>;
}

/// Simple in-memory mock store for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCredentialStore {
        users: Mutex<HashMap<String, User>>, // key: email
    }

    #[async_trait]
    impl CredentialStore for MockCredentialStore {
        async fn save_user(&self, email: &str, password_hash: &str, role: Role) -> Result<Uuid, ServiceError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(email) {
                return Err(ServiceError::AlreadyExists);
            }
            let user = User { id: Uuid::new_v4(), email: email.to_string(), password_hash: password_hash.to_string(), role };
            let id = user.id;
            users.insert(email.to_string(), user);
            Ok(id)
        }

        async fn get_user(&self, email: &str) -> Result<User, ServiceError> {
            let users = self.users.lock().unwrap();
            users.get(email).cloned().ok_or(ServiceError::NotFound("user"))
        }
    }
}
