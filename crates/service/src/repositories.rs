//! Composition of the two store capabilities and the services built on them.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::{repo::seaorm::SeaOrmCredentialStore, repository::CredentialStore, AuthConfig, AuthService};
use crate::computer::{repo::seaorm::SeaOrmResourceStore, repository::ResourceStore, ComputerService};

/// User and computer persistence, kept as two independent capabilities.
pub struct Repositories<C: CredentialStore, R: ResourceStore> {
    pub users: Arc<C>,
    pub computers: Arc<R>,
}

/// Repositories backed by the relational database.
pub type DbRepositories = Repositories<SeaOrmCredentialStore, SeaOrmResourceStore>;

impl<C: CredentialStore, R: ResourceStore> Repositories<C, R> {
    pub fn from_parts(users: Arc<C>, computers: Arc<R>) -> Self {
        Self { users, computers }
    }
}

impl DbRepositories {
    /// Both stores share the injected connection pool.
    pub fn new(db: DatabaseConnection) -> Self {
        Self::from_parts(
            Arc::new(SeaOrmCredentialStore::new(db.clone())),
            Arc::new(SeaOrmResourceStore::new(db)),
        )
    }
}

/// Service aggregate handed to the API layer.
pub struct Services<C: CredentialStore, R: ResourceStore> {
    pub auth: Arc<AuthService<C>>,
    pub computers: Arc<ComputerService<R>>,
}

impl<C: CredentialStore, R: ResourceStore> Clone for Services<C, R> {
    fn clone(&self) -> Self {
        Self { auth: Arc::clone(&self.auth), computers: Arc::clone(&self.computers) }
    }
}

impl<C: CredentialStore, R: ResourceStore> Services<C, R> {
    pub fn new(repos: &Repositories<C, R>, auth: AuthConfig) -> Self {
        Self {
            auth: Arc::new(AuthService::new(Arc::clone(&repos.users), auth)),
            computers: Arc::new(ComputerService::new(Arc::clone(&repos.computers))),
        }
    }
}
