//! # Sequence Store
//!
//! Persistent monotonic counters for human-facing codes.
//!
//! ## Why Not Timestamps?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Code Minting Strategy                                │
//! │                                                                         │
//! │  ❌ WRONG: timestamp-derived codes                                     │
//! │     SUPP-{timestamp % 10000}  → collisions, gaps, not human-friendly   │
//! │                                                                         │
//! │  ✅ CORRECT: persistent counter                                        │
//! │     next_value("supplier_code") → 1, 2, 3, ...                          │
//! │     format!("SUPP-{:03}")       → SUPP-001, SUPP-002, SUPP-003          │
//! │                                                                         │
//! │  The increment-and-persist happens in ONE SQL statement, so either     │
//! │  the new value is durable when the call returns, or the counter is     │
//! │  left at its prior value. No partial state.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;

/// Handle for the persistent sequence counters.
///
/// Obtained from [`LocalStore::sequences`](crate::LocalStore::sequences).
/// Counters are keyed by name and independent of each other. The handle
/// is injectable (constructed over a pool) rather than process-global, so
/// tests get a fresh counter space per in-memory store.
#[derive(Debug, Clone)]
pub struct SequenceStore {
    pool: SqlitePool,
}

impl SequenceStore {
    /// Creates a new SequenceStore over the given pool.
    pub(crate) fn new(pool: SqlitePool) -> Self {
        SequenceStore { pool }
    }

    /// Issues the next value for the named sequence.
    ///
    /// ## Guarantees
    /// - A fresh sequence name starts at 1
    /// - Sequential calls return strictly increasing values with no gaps
    ///   and no repeats
    /// - The increment and the persist are one SQL statement: if the
    ///   write fails, the counter is unchanged and no value was issued
    ///
    /// ## Example
    /// ```rust,ignore
    /// let n = sequences.next_value("supplier_code").await?; // 1, then 2, ...
    /// let code = format!("SUPP-{:03}", n);
    /// ```
    pub async fn next_value(&self, name: &str) -> StoreResult<i64> {
        let value: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO sequences (name, last_value) VALUES (?1, 1)
            ON CONFLICT(name) DO UPDATE SET last_value = last_value + 1
            RETURNING last_value
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        debug!(sequence = %name, value = %value, "Issued sequence value");

        Ok(value)
    }

    /// Returns the last issued value for the named sequence.
    ///
    /// A sequence that was never used reports 0. Diagnostic only - use
    /// [`SequenceStore::next_value`] to actually claim a value.
    pub async fn current_value(&self, name: &str) -> StoreResult<i64> {
        let value: Option<i64> =
            sqlx::query_scalar("SELECT last_value FROM sequences WHERE name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value.unwrap_or(0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
