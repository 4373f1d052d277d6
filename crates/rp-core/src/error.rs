//! # AppError
//!
//! Centralized error handling for the Rusty-Posts ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all rp-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The addressed entity does not exist (e.g., Post, Comment)
    #[error("{entity} not found with ID {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Malformed request input (e.g., a required parameter is missing)
    #[error("validation error: {0}")]
    Validation(String),

    /// Infrastructure failure (e.g., DB down, constraint violation)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Wraps any infrastructure error without classifying it further.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A specialized Result type for Rusty-Posts logic.
pub type Result<T> = std::result::Result<T, AppError>;
