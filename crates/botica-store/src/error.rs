//! # Store Error Types
//!
//! Error types for document store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (botica-services) ← Adds validation failures             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller decides: retry, user message, bail                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store never swallows errors: every backend failure is categorized
//! and passed through with its message intact. Retrying is entirely the
//! caller's responsibility.

use thiserror::Error;

/// Document store operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with that id in the collection.
    ///
    /// ## When This Occurs
    /// - `update` targets an id that was never added (or was removed)
    ///
    /// Note: `get` returns `Ok(None)` for a missing id, it never raises
    /// this error.
    #[error("{store}: record not found: {id}")]
    NotFound { store: String, id: String },

    /// A record with that id already exists in the collection.
    ///
    /// ## When This Occurs
    /// - `add` with an id already present (ids are expected to be
    ///   generated fresh, so hitting this usually means a logic bug)
    #[error("{store}: record '{id}' already exists")]
    DuplicateKey { store: String, id: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A record body could not be encoded or decoded as JSON.
    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a NotFound error for a given collection and id.
    pub fn not_found(store: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            store: store.into(),
            id: id.into(),
        }
    }

    /// Creates a DuplicateKey error for a given collection and id.
    pub fn duplicate_key(store: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::DuplicateKey {
            store: store.into(),
            id: id.into(),
        }
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → QueryFailed (message passed through)
/// sqlx::Error::PoolTimedOut   → PoolExhausted
/// sqlx::Error::PoolClosed     → ConnectionFailed
/// Other                       → Internal
/// ```
///
/// Duplicate-key detection happens at the call site (`Collection::add`)
/// where the collection name and record id are known; by the time an
/// error reaches this conversion it is a plain backend failure.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
