//! Service layer: authentication and computer reservation on top of `models`.
//! - Stores translate persistence failures into [`errors::ServiceError`] variants.
//! - Services orchestrate stores and add operation context to internal failures.
//! - Nothing here knows about HTTP.

pub mod errors;
pub mod auth;
pub mod computer;
pub mod repositories;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use repositories::{DbRepositories, Repositories, Services};
