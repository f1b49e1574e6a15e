use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::domain::{Role, User};
use crate::auth::repository::CredentialStore;
use crate::errors::ServiceError;
use models::errors::ModelError;

pub struct SeaOrmCredentialStore {
    pub db: DatabaseConnection,
}

impl SeaOrmCredentialStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_user(m: models::user::Model) -> Result<User, ServiceError> {
    let role = m.role.parse::<Role>().map_err(|e| ServiceError::Internal(format!("stored {e}")))?;
    Ok(User { id: m.id, email: m.email, password_hash: m.password_hash, role })
}

#[async_trait]
impl CredentialStore for SeaOrmCredentialStore {
    async fn save_user(&self, email: &str, password_hash: &str, role: Role) -> Result<Uuid, ServiceError> {
        const OP: &str = "store.user.save_user";
        match models::user::create(&self.db, email, password_hash, role.as_str()).await {
            Ok(created) => Ok(created.id),
            Err(ModelError::Duplicate(_)) => Err(ServiceError::AlreadyExists),
            Err(e) => Err(ServiceError::internal(OP, e)),
        }
    }

    async fn get_user(&self, email: &str) -> Result<User, ServiceError> {
        const OP: &str = "store.user.get_user";
        let found = models::user::find_by_email(&self.db, email)
            .await
            .map_err(|e| ServiceError::internal(OP, e))?
            .ok_or(ServiceError::NotFound("user"))?;
        to_user(found).map_err(|e| e.context(OP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn save_and_get_user() -> Result<(), anyhow::Error> {
        let store = SeaOrmCredentialStore::new(get_db().await?);

        let id = store.save_user("bob@example.com", "$argon2id$h", Role::User).await?;
        let user = store.get_user("bob@example.com").await?;
        assert_eq!(user.id, id);
        assert_eq!(user.role, Role::User);
        assert_eq!(user.password_hash, "$argon2id$h");
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_maps_to_already_exists() -> Result<(), anyhow::Error> {
        let store = SeaOrmCredentialStore::new(get_db().await?);

        store.save_user("dup@example.com", "h", Role::Admin).await?;
        let err = store.save_user("dup@example.com", "h", Role::User).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists), "{err}");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_email_maps_to_not_found() -> Result<(), anyhow::Error> {
        let store = SeaOrmCredentialStore::new(get_db().await?);
        let err = store.get_user("ghost@example.com").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("user")));
        Ok(())
    }
}
