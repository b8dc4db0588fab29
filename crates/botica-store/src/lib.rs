//! # botica-store: Local Document Store for Botica
//!
//! This crate provides local persistence for the Botica back office.
//! It uses SQLite for storage with sqlx for async operations, and models
//! the data as named collections ("stores") of JSON records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Botica Data Flow                                │
//! │                                                                         │
//! │  Service call (categories.create(...))                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   botica-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────┐  ┌────────────────┐  ┌──────────────────┐   │   │
//! │  │  │  LocalStore  │  │ Collection<T>  │  │  SequenceStore   │   │   │
//! │  │  │  (store.rs)  │  │(collection.rs) │  │  (sequence.rs)   │   │   │
//! │  │  │              │  │                │  │                  │   │   │
//! │  │  │ SqlitePool   │◄─│ add/get/update │  │ next_value       │   │   │
//! │  │  │ Registry     │  │ remove/get_all │  │ current_value    │   │   │
//! │  │  │ Migrations   │  │ index/filters  │  │                  │   │   │
//! │  │  └──────────────┘  └────────────────┘  └──────────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: records(store, id, body) + stores + sequences          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Pool configuration, the [`LocalStore`] handle, collection registry
//! - [`collection`] - Typed CRUD and query operations per collection
//! - [`record`] - The [`Entity`] trait and the [`Filters`] builder
//! - [`sequence`] - Persistent monotonic counters
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//!
//! ## Ordering Guarantee
//!
//! Every operation is awaited to completion before it returns, so
//! operations issued sequentially by a single caller are observed in
//! issuance order. The service layer's check-then-insert patterns depend
//! on this. Multi-step patterns are NOT atomic across concurrent callers;
//! this store assumes a single writer per installation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use botica_store::{LocalStore, StoreConfig};
//!
//! let store = LocalStore::open(StoreConfig::new("path/to/botica.db")).await?;
//!
//! let categories = store.collection::<Category>().await?;
//! categories.add(&category).await?;
//! let found = categories.get_by_index("name", "Analgésicos").await?;
//!
//! let code = store.sequences().next_value("supplier_code").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collection;
pub mod error;
pub mod migrations;
pub mod record;
pub mod sequence;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use collection::Collection;
pub use error::{StoreError, StoreResult};
pub use record::{Entity, Filters};
pub use sequence::SequenceStore;
pub use store::{LocalStore, StoreConfig};
