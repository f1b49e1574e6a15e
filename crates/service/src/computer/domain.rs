use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Typed view of the boolean reservation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputerStatus {
    Available,
    Reserved,
}

impl From<bool> for ComputerStatus {
    fn from(status: bool) -> Self {
        if status { ComputerStatus::Available } else { ComputerStatus::Reserved }
    }
}

impl From<ComputerStatus> for bool {
    fn from(status: ComputerStatus) -> Self {
        status == ComputerStatus::Available
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Computer {
    pub id: Uuid,
    pub os: String,
    pub cpu: String,
    pub ram: i32,
    /// true = available, false = reserved
    pub status: bool,
    pub ssh: String,
}

impl Computer {
    pub fn state(&self) -> ComputerStatus {
        ComputerStatus::from(self.status)
    }
}

impl From<models::computer::Model> for Computer {
    fn from(m: models::computer::Model) -> Self {
        Self { id: m.id, os: m.os, cpu: m.cpu, ram: m.ram, status: m.status, ssh: m.ssh }
    }
}

/// Input for adding a computer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComputer {
    pub os: String,
    pub cpu: String,
    pub ram: i32,
}

impl NewComputer {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.os.trim().is_empty() {
            return Err(ServiceError::Validation("os required".into()));
        }
        if self.cpu.trim().is_empty() {
            return Err(ServiceError::Validation("cpu required".into()));
        }
        if self.ram <= 0 {
            return Err(ServiceError::Validation("ram must be > 0".into()));
        }
        Ok(())
    }
}
