//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration hashes the password and persists the user; login verifies it and mints a token.

pub mod domain;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;
pub mod repo {
    pub mod seaorm;
}

pub use service::{AuthConfig, AuthService};
