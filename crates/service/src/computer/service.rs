use std::sync::Arc;

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::domain::{Computer, ComputerStatus, NewComputer};
use super::repository::ResourceStore;
use crate::errors::ServiceError;

/// Application service over the Resource Store.
///
/// Holds no computer state between calls; reservation is delegated to the store's single
/// conditional update, never composed here from a read and a write.
pub struct ComputerService<R: ResourceStore> {
    store: Arc<R>,
}

fn log_failure(err: &ServiceError, msg: &str) {
    if err.is_internal() {
        error!(error = %err, "{msg}");
    } else {
        warn!(error = %err, "{msg}");
    }
}

impl<R: ResourceStore> ComputerService<R> {
    pub fn new(store: Arc<R>) -> Self { Self { store } }

    #[instrument(skip(self, input), fields(op = "service.computer.add", os = %input.os, cpu = %input.cpu, ram = input.ram))]
    pub async fn add_computer(&self, input: NewComputer) -> Result<Computer, ServiceError> {
        const OP: &str = "service.computer.add";
        input.validate()?;

        let (id, ssh) = self.store.add_computer(&input.os, &input.cpu, input.ram).await.map_err(|e| {
            log_failure(&e, "failed to add computer");
            e.context(OP)
        })?;

        info!(computer_id = %id, "computer_added");
        Ok(Computer { id, os: input.os, cpu: input.cpu, ram: input.ram, status: ComputerStatus::Available.into(), ssh })
    }

    #[instrument(skip(self), fields(op = "service.computer.get"))]
    pub async fn get_computer(&self, id: Uuid) -> Result<Computer, ServiceError> {
        self.store.get_computer(id).await.map_err(|e| {
            log_failure(&e, "failed to get computer");
            e.context("service.computer.get")
        })
    }

    #[instrument(skip(self), fields(op = "service.computer.reserve"))]
    pub async fn reserve_computer(&self, id: Uuid) -> Result<(), ServiceError> {
        self.store.reserve_computer(id).await.map_err(|e| {
            log_failure(&e, "failed to reserve computer");
            e.context("service.computer.reserve")
        })?;
        info!(computer_id = %id, "computer_reserved");
        Ok(())
    }

    #[instrument(skip(self), fields(op = "service.computer.relieve"))]
    pub async fn relieve_computer(&self, id: Uuid) -> Result<(), ServiceError> {
        self.store.relieve_computer(id).await.map_err(|e| {
            log_failure(&e, "failed to relieve computer");
            e.context("service.computer.relieve")
        })?;
        info!(computer_id = %id, "computer_relieved");
        Ok(())
    }

    #[instrument(skip(self), fields(op = "service.computer.list"))]
    pub async fn get_all_computers(&self) -> Result<Vec<Computer>, ServiceError> {
        let computers = self.store.get_all_computers().await.map_err(|e| {
            log_failure(&e, "failed to get all computers");
            e.context("service.computer.list")
        })?;
        info!(count = computers.len(), "computers_listed");
        Ok(computers)
    }
}
