//! # Supplier Service
//!
//! Suppliers carry a human-facing code minted from the `supplier_code`
//! sequence at creation time.
//!
//! ## Code Minting
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create("Droguería Central")                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sequences.next_value("supplier_code") → 42                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  format!("SUPP-{:03}") → "SUPP-042"                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add record { code: "SUPP-042", ... }                                   │
//! │                                                                         │
//! │  The code is immutable after creation; updates never touch it.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use botica_core::validation::{validate_email, validate_name, validate_text};
use botica_core::{generate_id, Supplier, ValidationError};
use botica_store::{Collection, LocalStore, SequenceStore};

use crate::error::ServiceResult;

/// Sequence name used to mint supplier codes.
const SUPPLIER_CODE_SEQUENCE: &str = "supplier_code";

/// Input for creating a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Complete new state for an existing supplier (whole-record update).
///
/// The minted `code` is not part of the update surface - it is immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierUpdate {
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
}

/// Service for supplier management.
#[derive(Debug, Clone)]
pub struct SupplierService {
    suppliers: Collection<Supplier>,
    sequences: SequenceStore,
}

impl SupplierService {
    /// Opens the service over the given store.
    pub async fn new(store: &LocalStore) -> ServiceResult<Self> {
        Ok(SupplierService {
            suppliers: store.collection().await?,
            sequences: store.sequences(),
        })
    }

    /// Creates a supplier, minting its `SUPP-NNN` code.
    ///
    /// ## Errors
    /// * `ValidationError::Required` / `TooLong` / `InvalidFormat` - bad input
    /// * `ValidationError::Duplicate` - a supplier with that name exists
    pub async fn create(&self, input: NewSupplier) -> ServiceResult<Supplier> {
        validate_name(&input.name)?;
        validate_email(input.email.as_deref())?;
        validate_text("address", input.address.as_deref())?;

        self.ensure_unique_name(&input.name, None).await?;

        // Mint the code only after validation passes; a failed create
        // should not burn a sequence value for bad input. (A backend
        // failure after this point still burns one - gaps from failed
        // inserts are acceptable, reuse is not.)
        let number = self.sequences.next_value(SUPPLIER_CODE_SEQUENCE).await?;
        let code = format!("SUPP-{:03}", number);

        let now = Utc::now();
        let supplier = Supplier {
            id: generate_id(),
            code,
            name: input.name,
            contact_name: input.contact_name,
            phone: input.phone,
            email: input.email,
            address: input.address,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %supplier.id, code = %supplier.code, "Creating supplier");

        self.suppliers.add(&supplier).await?;
        Ok(supplier)
    }

    /// Gets a supplier by id.
    pub async fn get(&self, id: &str) -> ServiceResult<Option<Supplier>> {
        Ok(self.suppliers.get(id).await?)
    }

    /// Finds a supplier by its minted code (e.g. "SUPP-042").
    pub async fn find_by_code(&self, code: &str) -> ServiceResult<Option<Supplier>> {
        let mut hits = self.suppliers.get_by_index("code", code).await?;
        Ok(hits.pop())
    }

    /// Lists all suppliers in insertion order.
    pub async fn list(&self) -> ServiceResult<Vec<Supplier>> {
        Ok(self.suppliers.get_all().await?)
    }

    /// Replaces a supplier with the given new state.
    ///
    /// Keeps `id`, `code` and `created_at`; refreshes `updated_at`.
    pub async fn update(&self, id: &str, input: SupplierUpdate) -> ServiceResult<Supplier> {
        validate_name(&input.name)?;
        validate_email(input.email.as_deref())?;
        validate_text("address", input.address.as_deref())?;

        self.ensure_unique_name(&input.name, Some(id)).await?;

        let Some(existing) = self.suppliers.get(id).await? else {
            return Err(
                botica_store::StoreError::not_found(self.suppliers.name(), id).into(),
            );
        };

        let supplier = Supplier {
            id: existing.id,
            code: existing.code,
            name: input.name,
            contact_name: input.contact_name,
            phone: input.phone,
            email: input.email,
            address: input.address,
            is_active: input.is_active,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        debug!(id = %supplier.id, "Updating supplier");

        self.suppliers.update(&supplier).await?;
        Ok(supplier)
    }

    /// Deletes a supplier. Idempotent.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        debug!(id = %id, "Deleting supplier");
        Ok(self.suppliers.remove(id).await?)
    }

    /// Fails with `ValidationError::Duplicate` when another supplier
    /// already uses the name.
    async fn ensure_unique_name(&self, name: &str, exclude_id: Option<&str>) -> ServiceResult<()> {
        let hits = self.suppliers.get_by_index("name", name).await?;

        let taken = hits.iter().any(|s| Some(s.id.as_str()) != exclude_id);

        if taken {
            return Err(ValidationError::Duplicate {
                field: "name".to_string(),
                value: name.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
