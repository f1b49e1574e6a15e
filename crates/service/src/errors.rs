use std::fmt::Display;

use thiserror::Error;

/// Domain errors shared by both services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user already exists")]
    AlreadyExists,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("computer already reserved")]
    AlreadyReserved,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::AlreadyExists => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::InvalidCredentials => 1004,
            ServiceError::InvalidToken(_) => 1005,
            ServiceError::AlreadyReserved => 1006,
            ServiceError::Internal(_) => 1200,
        }
    }

    pub fn internal(op: &str, err: impl Display) -> Self {
        ServiceError::Internal(format!("{op}: {err}"))
    }

    /// Prefix an internal failure with the operation that observed it; domain errors pass through.
    pub fn context(self, op: &str) -> Self {
        match self {
            ServiceError::Internal(msg) => ServiceError::Internal(format!("{op}: {msg}")),
            other => other,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ServiceError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_only_wraps_internal() {
        let e = ServiceError::Internal("connection reset".into()).context("service.computer.get");
        assert_eq!(e.to_string(), "internal error: service.computer.get: connection reset");

        let e = ServiceError::AlreadyReserved.context("service.computer.reserve");
        assert!(matches!(e, ServiceError::AlreadyReserved));
    }

    #[test]
    fn codes_are_distinct() {
        let all = [
            ServiceError::Validation(String::new()),
            ServiceError::AlreadyExists,
            ServiceError::NotFound("user"),
            ServiceError::InvalidCredentials,
            ServiceError::InvalidToken(String::new()),
            ServiceError::AlreadyReserved,
            ServiceError::Internal(String::new()),
        ];
        let mut codes: Vec<u16> = all.iter().map(ServiceError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }
}
