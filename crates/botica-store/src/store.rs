//! # Store Handle & Configuration
//!
//! Connection pool creation, configuration and the collection registry.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      LocalStore Lifecycle                               │
//! │                                                                         │
//! │  App startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(path) ← Configure pool settings                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LocalStore::open(config).await ← Create pool + run migrations         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.collection::<Category>().await ← Open-or-create by name         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Collection<Category> handle ← CRUD + queries                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Better crash recovery

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::record::Entity;
use crate::sequence::SequenceStore;

// =============================================================================
// Configuration
// =============================================================================

/// Document store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/botica.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a local back-office app)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on open.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a new store configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it
    ///   doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on open.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory store configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let store = LocalStore::open(StoreConfig::in_memory()).await?;
    /// // Store is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// LocalStore
// =============================================================================

/// Main store handle providing collection and sequence access.
///
/// ## Design
/// One `LocalStore` per installation; cheap to clone (the pool is shared).
/// Collections are opened by name through [`LocalStore::collection`],
/// which registers the name in the `stores` table on first use.
///
/// ## Concurrency
/// Operations are async and awaited to completion, so a single caller
/// observes its own operations in issuance order. The store assumes one
/// writer per installation; check-then-insert patterns in the service
/// layer are not atomic across concurrent writers.
#[derive(Debug, Clone)]
pub struct LocalStore {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl LocalStore {
    /// Opens the document store.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous (balance of safety/speed)
    ///    - Foreign keys enabled
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    ///
    /// ## Returns
    /// * `Ok(LocalStore)` - Ready-to-use store handle
    /// * `Err(StoreError)` - Connection or migration failed
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening local document store"
        );

        // sqlite://path creates file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            // WAL mode: readers don't block writers
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: safe from corruption, may lose the last
            // transaction on power failure
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Store pool created"
        );

        let store = LocalStore { pool };

        if config.run_migrations {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Runs database migrations.
    ///
    /// Idempotent: automatically called by `open()` unless disabled in
    /// the config.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        info!("Running store migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Opens (or creates) the collection for entity type `T`.
    ///
    /// ## Registry Semantics
    /// The collection name (`T::STORE`) is recorded in the `stores` table
    /// the first time it is opened; opening an already-registered
    /// collection is a no-op. The returned handle is cheap to clone.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let categories = store.collection::<Category>().await?;
    /// ```
    pub async fn collection<T: Entity>(&self) -> StoreResult<Collection<T>> {
        let now = Utc::now();

        debug!(store = T::STORE, "Opening collection");

        sqlx::query("INSERT INTO stores (name, created_at) VALUES (?1, ?2) ON CONFLICT(name) DO NOTHING")
            .bind(T::STORE)
            .bind(now.to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(Collection::new(self.pool.clone()))
    }

    /// Lists the names of all registered collections.
    pub async fn store_names(&self) -> StoreResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM stores ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(names)
    }

    /// Returns the sequence store.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let n = store.sequences().next_value("supplier_code").await?;
    /// ```
    pub fn sequences(&self) -> SequenceStore {
        SequenceStore::new(self.pool.clone())
    }

    /// Returns a reference to the connection pool.
    ///
    /// For advanced queries not covered by collections. Prefer collection
    /// methods when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the store's connection pool.
    ///
    /// After calling close, all collection operations will fail.
    pub async fn close(&self) {
        info!("Closing store connection pool");
        self.pool.close().await;
    }

    /// Checks if the store is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use botica_core::Category;

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = LocalStore::open(StoreConfig::in_memory()).await.unwrap();

        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = StoreConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
    }

    #[tokio::test]
    async fn test_collection_registers_store_name() {
        let store = LocalStore::open(StoreConfig::in_memory()).await.unwrap();

        let _ = store.collection::<Category>().await.unwrap();
        // Opening again is a no-op, not an error
        let _ = store.collection::<Category>().await.unwrap();

        let names = store.store_names().await.unwrap();
        assert_eq!(names, vec!["categories".to_string()]);
    }
}
