//! # botica-services: Service Layer for Botica
//!
//! Domain services for the pharmacy back office. Each service owns the
//! [`Collection`](botica_store::Collection) handle for its entity and
//! composes the store primitives: validate input, run read-then-check
//! rules, mint ids and timestamps, insert or replace records.
//!
//! ## Service Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Create Flow (all services)                          │
//! │                                                                         │
//! │  create(input)                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate input (botica-core rules)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  uniqueness check: get_by_index("name", input.name)                    │
//! │       │   non-empty? → ValidationError::Duplicate                      │
//! │       ▼                                                                 │
//! │  mint id (uuid v4) + created_at/updated_at                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  collection.add(&record)                                               │
//! │                                                                         │
//! │  NOTE: check-then-insert is NOT atomic across concurrent writers.      │
//! │  This layer assumes a single writer per installation.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Update Contract
//!
//! Updates are whole-record replacement: the service loads the record,
//! applies the complete new state, refreshes `updated_at`, and calls
//! [`Collection::update`](botica_store::Collection::update). There are no
//! partial-merge updates anywhere in this crate.
//!
//! ## Services
//!
//! - [`CategoryService`] - categories with unique names
//! - [`SupplierService`] - suppliers with minted `SUPP-NNN` codes
//! - [`ProductService`] - catalog products, stock adjustments
//! - [`PrescriptionService`] - upload and review workflow
//! - [`SettingsService`] - the settings singleton

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod error;
pub mod prescription;
pub mod product;
pub mod settings;
pub mod supplier;

// =============================================================================
// Re-exports
// =============================================================================

pub use category::{CategoryService, CategoryUpdate, NewCategory};
pub use error::{ServiceError, ServiceResult};
pub use prescription::{NewPrescription, PrescriptionService};
pub use product::{NewProduct, ProductService, ProductUpdate};
pub use settings::{SettingsService, SettingsUpdate};
pub use supplier::{NewSupplier, SupplierService, SupplierUpdate};
