//! # Service Error Type
//!
//! Unified error type for the service layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError (botica-core) ──┐                                      │
//! │                                  ├──► ServiceError ──► caller           │
//! │  StoreError (botica-store) ──────┘                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller (UI adapter, command handler) decides how to surface each
//! variant; this crate does not retry and does not mask backend failures.

use thiserror::Error;

use botica_core::ValidationError;
use botica_store::StoreError;

/// Errors produced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input or business-rule validation failed (including duplicate
    /// names detected by the read-then-check pattern).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Document store operation failed (passed through unchanged).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
