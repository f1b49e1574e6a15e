use async_trait::async_trait;
use uuid::Uuid;

use super::domain::Computer;
use crate::errors::ServiceError;

/// Resource Store: computer rows and their reservation primitives.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Insert an available computer; returns its id and generated ssh string.
    async fn add_computer(&self, os: &str, cpu: &str, ram: i32) -> Result<(Uuid, String), ServiceError>;
    async fn get_computer(&self, id: Uuid) -> Result<Computer, ServiceError>;
    /// Atomic available -> reserved transition; `AlreadyReserved` when another caller holds it.
    async fn reserve_computer(&self, id: Uuid) -> Result<(), ServiceError>;
    /// Set available; idempotent for existing ids, `NotFound` for an unknown id.
    async fn relieve_computer(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn get_all_computers(&self) -> Result<Vec<Computer>, ServiceError>;
}

/// Simple in-memory mock store for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Rows kept in insertion order; the mutex makes each transition atomic.
    #[derive(Default)]
    pub struct MockResourceStore {
        computers: Mutex<Vec<Computer>>,
    }

    #[async_trait]
    impl ResourceStore for MockResourceStore {
        async fn add_computer(&self, os: &str, cpu: &str, ram: i32) -> Result<(Uuid, String), ServiceError> {
            let mut computers = self.computers.lock().unwrap();
            let c = Computer {
                id: Uuid::new_v4(),
                os: os.to_string(),
                cpu: cpu.to_string(),
                ram,
                status: true,
                ssh: models::computer::random_ssh(),
            };
            let out = (c.id, c.ssh.clone());
            computers.push(c);
            Ok(out)
        }

        async fn get_computer(&self, id: Uuid) -> Result<Computer, ServiceError> {
            let computers = self.computers.lock().unwrap();
            computers.iter().find(|c| c.id == id).cloned().ok_or(ServiceError::NotFound("computer"))
        }

        async fn reserve_computer(&self, id: Uuid) -> Result<(), ServiceError> {
            let mut computers = self.computers.lock().unwrap();
            let c = computers.iter_mut().find(|c| c.id == id).ok_or(ServiceError::NotFound("computer"))?;
            if !c.status {
                return Err(ServiceError::AlreadyReserved);
            }
            c.status = false;
            Ok(())
        }

        async fn relieve_computer(&self, id: Uuid) -> Result<(), ServiceError> {
            let mut computers = self.computers.lock().unwrap();
            let c = computers.iter_mut().find(|c| c.id == id).ok_or(ServiceError::NotFound("computer"))?;
            c.status = true;
            Ok(())
        }

        async fn get_all_computers(&self) -> Result<Vec<Computer>, ServiceError> {
            Ok(self.computers.lock().unwrap().clone())
        }
    }
}
