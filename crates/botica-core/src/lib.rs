//! # botica-core: Pure Domain Model for Botica
//!
//! This crate is the **heart** of the Botica pharmacy back office. It
//! contains the domain model and validation rules as pure code with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Botica Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  botica-services (Service Layer)                │   │
//! │  │   CategoryService, SupplierService, PrescriptionService, ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  botica-store (Document Store)                  │   │
//! │  │        Collections, CRUD, index/filter queries, sequences       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ botica-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌────────────┐      ┌───────────┐         │   │
//! │  │   │   types   │      │ validation │      │   error   │         │   │
//! │  │   │ Category  │      │   rules    │      │ Validation│         │   │
//! │  │   │ Supplier  │      │   checks   │      │   Error   │         │   │
//! │  │   └───────────┘      └────────────┘      └───────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Category, Supplier, Product, Prescription, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Dual-Key Identity**: entities carry an immutable uuid `id` plus a
//!    human-readable business key where one exists (supplier code, name)

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use botica_core::Category` instead of
// `use botica_core::types::Category`

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length for entity names (categories, suppliers, products).
///
/// ## Business Reason
/// Keeps labels printable on receipts and report columns.
pub const MAX_NAME_LEN: usize = 120;

/// Maximum length for free-text fields (descriptions, notes).
pub const MAX_TEXT_LEN: usize = 1000;

/// File extensions accepted for prescription uploads.
///
/// ## Business Reason
/// The back office only needs to display the document; anything beyond
/// a scan or a PDF is rejected at the door.
pub const PRESCRIPTION_FILE_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];
