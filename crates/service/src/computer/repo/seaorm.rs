use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::computer::domain::Computer;
use crate::computer::repository::ResourceStore;
use crate::errors::ServiceError;
use models::computer::{self, ReserveOutcome};

pub struct SeaOrmResourceStore {
    pub db: DatabaseConnection,
}

impl SeaOrmResourceStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ResourceStore for SeaOrmResourceStore {
    async fn add_computer(&self, os: &str, cpu: &str, ram: i32) -> Result<(Uuid, String), ServiceError> {
        let created = computer::create(&self.db, os, cpu, ram)
            .await
            .map_err(|e| ServiceError::internal("store.computer.add_computer", e))?;
        Ok((created.id, created.ssh))
    }

    async fn get_computer(&self, id: Uuid) -> Result<Computer, ServiceError> {
        computer::find(&self.db, id)
            .await
            .map_err(|e| ServiceError::internal("store.computer.get_computer", e))?
            .map(Computer::from)
            .ok_or(ServiceError::NotFound("computer"))
    }

    async fn reserve_computer(&self, id: Uuid) -> Result<(), ServiceError> {
        let outcome = computer::reserve(&self.db, id)
            .await
            .map_err(|e| ServiceError::internal("store.computer.reserve_computer", e))?;
        match outcome {
            ReserveOutcome::Reserved => Ok(()),
            ReserveOutcome::AlreadyReserved => Err(ServiceError::AlreadyReserved),
            ReserveOutcome::Missing => Err(ServiceError::NotFound("computer")),
        }
    }

    async fn relieve_computer(&self, id: Uuid) -> Result<(), ServiceError> {
        let matched = computer::relieve(&self.db, id)
            .await
            .map_err(|e| ServiceError::internal("store.computer.relieve_computer", e))?;
        if matched { Ok(()) } else { Err(ServiceError::NotFound("computer")) }
    }

    async fn get_all_computers(&self) -> Result<Vec<Computer>, ServiceError> {
        let rows = computer::list(&self.db)
            .await
            .map_err(|e| ServiceError::internal("store.computer.get_all_computers", e))?;
        Ok(rows.into_iter().map(Computer::from).collect())
    }
}
