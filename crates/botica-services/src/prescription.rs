//! # Prescription Service
//!
//! Upload and review workflow for customer prescriptions.
//!
//! ## Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  upload(customer, "receta.pdf")                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Prescription { status: Pending }                                       │
//! │       │                                                                 │
//! │       ├── approve(id, notes) → status: Approved                        │
//! │       │                                                                 │
//! │       └── reject(id, notes)  → status: Rejected                        │
//! │                                                                         │
//! │  Review refreshes updated_at; upload time stays in created_at.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use botica_core::validation::{validate_name, validate_prescription_file, validate_text};
use botica_core::{generate_id, Prescription, PrescriptionStatus};
use botica_store::{Collection, Filters, LocalStore};

use crate::error::ServiceResult;

/// Input for uploading a prescription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrescription {
    pub customer_name: String,
    pub doctor_name: Option<String>,
    pub file_name: String,
    pub notes: Option<String>,
}

/// Service for the prescription workflow.
#[derive(Debug, Clone)]
pub struct PrescriptionService {
    prescriptions: Collection<Prescription>,
}

impl PrescriptionService {
    /// Opens the service over the given store.
    pub async fn new(store: &LocalStore) -> ServiceResult<Self> {
        Ok(PrescriptionService {
            prescriptions: store.collection().await?,
        })
    }

    /// Records an uploaded prescription; review starts Pending.
    ///
    /// ## Errors
    /// * `ValidationError::NotAllowed` - file extension outside
    ///   pdf/jpg/jpeg/png
    pub async fn upload(&self, input: NewPrescription) -> ServiceResult<Prescription> {
        validate_name(&input.customer_name)?;
        validate_prescription_file(&input.file_name)?;
        validate_text("notes", input.notes.as_deref())?;

        let now = Utc::now();
        let prescription = Prescription {
            id: generate_id(),
            customer_name: input.customer_name,
            doctor_name: input.doctor_name,
            file_name: input.file_name,
            status: PrescriptionStatus::Pending,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %prescription.id, file = %prescription.file_name, "Uploading prescription");

        self.prescriptions.add(&prescription).await?;
        Ok(prescription)
    }

    /// Gets a prescription by id.
    pub async fn get(&self, id: &str) -> ServiceResult<Option<Prescription>> {
        Ok(self.prescriptions.get(id).await?)
    }

    /// Lists all prescriptions in insertion order.
    pub async fn list(&self) -> ServiceResult<Vec<Prescription>> {
        Ok(self.prescriptions.get_all().await?)
    }

    /// Lists prescriptions with the given review status.
    pub async fn list_by_status(
        &self,
        status: PrescriptionStatus,
    ) -> ServiceResult<Vec<Prescription>> {
        Ok(self
            .prescriptions
            .get_by_index("status", status.as_str())
            .await?)
    }

    /// Lists a customer's prescriptions awaiting review.
    pub async fn pending_for_customer(
        &self,
        customer_name: &str,
    ) -> ServiceResult<Vec<Prescription>> {
        let filters = Filters::new()
            .eq("customer_name", customer_name)
            .eq("status", PrescriptionStatus::Pending.as_str());

        Ok(self.prescriptions.query_with_filters(&filters).await?)
    }

    /// Marks a prescription as approved.
    pub async fn approve(&self, id: &str, notes: Option<String>) -> ServiceResult<Prescription> {
        self.review(id, PrescriptionStatus::Approved, notes).await
    }

    /// Marks a prescription as rejected (reason goes in `notes`).
    pub async fn reject(&self, id: &str, notes: Option<String>) -> ServiceResult<Prescription> {
        self.review(id, PrescriptionStatus::Rejected, notes).await
    }

    /// Deletes a prescription. Idempotent.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        debug!(id = %id, "Deleting prescription");
        Ok(self.prescriptions.remove(id).await?)
    }

    /// Applies a review verdict and refreshes `updated_at`.
    async fn review(
        &self,
        id: &str,
        status: PrescriptionStatus,
        notes: Option<String>,
    ) -> ServiceResult<Prescription> {
        validate_text("notes", notes.as_deref())?;

        let Some(mut prescription) = self.prescriptions.get(id).await? else {
            return Err(
                botica_store::StoreError::not_found(self.prescriptions.name(), id).into(),
            );
        };

        prescription.status = status;
        prescription.notes = notes;
        prescription.updated_at = Utc::now();

        debug!(id = %id, status = status.as_str(), "Reviewing prescription");

        self.prescriptions.update(&prescription).await?;
        Ok(prescription)
    }
}
