//! # Domain Types
//!
//! Core domain entities used throughout Botica.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │    Supplier     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name (unique)  │   │  code (minted)  │   │  category_id    │       │
//! │  │  parent_id      │   │  name (unique)  │   │  price_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌───────────────────┐   ┌──────────────────┐   │
//! │  │  Prescription   │   │PrescriptionStatus │   │ PharmacySettings │   │
//! │  │  ─────────────  │   │  ───────────────  │   │  ──────────────  │   │
//! │  │  id (UUID)      │   │  Pending          │   │  singleton id    │   │
//! │  │  customer_name  │   │  Approved         │   │  currency        │   │
//! │  │  file_name      │   │  Rejected         │   │  tax_rate_bps    │   │
//! │  └─────────────────┘   └───────────────────┘   └──────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for record identity in the store
//! - Business key where one exists: supplier `code`, category `name`
//!
//! ## Timestamps
//! `created_at` / `updated_at` are `DateTime<Utc>` and serialize to
//! RFC 3339 (ISO-8601) strings inside the JSON record body. Services must
//! refresh `updated_at` on every update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a fresh record id (UUID v4 string).
///
/// ## Usage
/// ```rust
/// use botica_core::generate_id;
///
/// let id = generate_id();
/// assert_eq!(id.len(), 36);
/// ```
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Category
// =============================================================================

/// A product category (e.g. "Analgésicos").
///
/// Names are unique per the service-layer contract; the store itself does
/// not enforce it. `parent_id` is a loose reference - a category pointing
/// at a nonexistent parent is not rejected (no cross-store referential
/// integrity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique among categories (service-layer contract).
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Optional parent category id (not referentially enforced).
    pub parent_id: Option<String>,

    /// Whether the category is shown in the storefront.
    pub is_active: bool,

    /// When the category was created.
    pub created_at: DateTime<Utc>,

    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier the pharmacy orders stock from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-facing code minted from the `supplier_code` sequence
    /// (e.g. "SUPP-042"). Immutable once assigned.
    pub code: String,

    /// Company name, unique among suppliers (service-layer contract).
    pub name: String,

    /// Contact person name.
    pub contact_name: Option<String>,

    /// Contact phone number.
    pub phone: Option<String>,

    /// Contact email address.
    pub email: Option<String>,

    /// Postal address.
    pub address: Option<String>,

    /// Whether the supplier is available for new purchase orders.
    pub is_active: bool,

    /// When the supplier was created.
    pub created_at: DateTime<Utc>,

    /// When the supplier was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the pharmacy catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the storefront.
    pub name: String,

    /// Category this product belongs to (not referentially enforced).
    pub category_id: Option<String>,

    /// Price in cents (smallest currency unit - never floats).
    pub price_cents: i64,

    /// Units currently on hand.
    pub stock: i64,

    /// Whether a prescription must be on file before sale.
    pub requires_prescription: bool,

    /// Whether the product is visible in the catalog (soft on/off).
    pub is_active: bool,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Prescription
// =============================================================================

/// Review status of an uploaded prescription.
///
/// ## Lifecycle
/// ```text
/// upload ──► Pending ──► Approved
///                   └──► Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    /// Uploaded, awaiting pharmacist review.
    Pending,
    /// Reviewed and accepted.
    Approved,
    /// Reviewed and refused (reason in `notes`).
    Rejected,
}

impl PrescriptionStatus {
    /// Stable string form, matching the serde representation.
    ///
    /// Used for filter queries against the JSON record body.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrescriptionStatus::Pending => "pending",
            PrescriptionStatus::Approved => "approved",
            PrescriptionStatus::Rejected => "rejected",
        }
    }
}

/// A prescription uploaded by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Name of the customer the prescription belongs to.
    pub customer_name: String,

    /// Prescribing doctor, when provided.
    pub doctor_name: Option<String>,

    /// Original file name of the uploaded document (pdf/jpg/jpeg/png).
    pub file_name: String,

    /// Current review status.
    pub status: PrescriptionStatus,

    /// Pharmacist notes (e.g. rejection reason).
    pub notes: Option<String>,

    /// When the prescription was uploaded.
    pub created_at: DateTime<Utc>,

    /// When the prescription was last updated (review refreshes this).
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Pharmacy Settings
// =============================================================================

/// Fixed id of the settings singleton record.
///
/// ## Why a constant?
/// Settings are a single record per installation. Using a fixed id lets
/// the service do a plain `get` instead of scanning the collection.
pub const SETTINGS_ID: &str = "settings";

/// Installation-wide pharmacy settings (singleton record).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacySettings {
    /// Always [`SETTINGS_ID`].
    pub id: String,

    /// Pharmacy name printed on receipts.
    pub pharmacy_name: String,

    /// ISO 4217 currency code (e.g. "USD", "PEN").
    pub currency: String,

    /// Tax rate in basis points (825 = 8.25%).
    pub tax_rate_bps: u32,

    /// Stock level at or below which a product is flagged as low.
    pub low_stock_threshold: i64,

    /// Optional footer line printed on receipts.
    pub receipt_footer: Option<String>,

    /// When the settings record was created.
    pub created_at: DateTime<Utc>,

    /// When the settings record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl PharmacySettings {
    /// Returns the default settings for a fresh installation.
    pub fn default_settings() -> Self {
        let now = Utc::now();
        PharmacySettings {
            id: SETTINGS_ID.to_string(),
            pharmacy_name: "Botica".to_string(),
            currency: "USD".to_string(),
            tax_rate_bps: 0,
            low_stock_threshold: 10,
            receipt_footer: None,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_prescription_status_serializes_lowercase() {
        let json = serde_json::to_string(&PrescriptionStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");

        let back: PrescriptionStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(back, PrescriptionStatus::Rejected);
    }

    #[test]
    fn test_prescription_status_as_str_matches_serde() {
        for status in [
            PrescriptionStatus::Pending,
            PrescriptionStatus::Approved,
            PrescriptionStatus::Rejected,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json.as_str().unwrap(), status.as_str());
        }
    }

    #[test]
    fn test_timestamps_serialize_as_iso8601() {
        let settings = PharmacySettings::default_settings();
        let json = serde_json::to_value(&settings).unwrap();

        let created = json["created_at"].as_str().unwrap();
        // RFC 3339: 2026-01-31T12:00:00...Z
        assert!(created.contains('T'));
        assert!(created.ends_with('Z') || created.contains('+'));
    }

    #[test]
    fn test_default_settings_use_fixed_id() {
        let settings = PharmacySettings::default_settings();
        assert_eq!(settings.id, SETTINGS_ID);
    }
}
