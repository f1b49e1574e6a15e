//! Computer module: inventory and the atomic reservation flag.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo {
    pub mod seaorm;
}

pub use service::ComputerService;
