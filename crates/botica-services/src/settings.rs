//! # Settings Service
//!
//! The settings singleton: one record with the fixed id
//! [`SETTINGS_ID`](botica_core::SETTINGS_ID) in the `settings`
//! collection. `load` never fails on a fresh installation - it falls back
//! to defaults without persisting them (defaults are only written when
//! the user saves).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use botica_core::validation::{validate_name, validate_tax_rate_bps, validate_text};
use botica_core::{PharmacySettings, SETTINGS_ID};
use botica_store::{Collection, LocalStore};

use crate::error::ServiceResult;

/// Complete new state for the settings record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub pharmacy_name: String,
    pub currency: String,
    pub tax_rate_bps: u32,
    pub low_stock_threshold: i64,
    pub receipt_footer: Option<String>,
}

/// Service for the pharmacy settings singleton.
#[derive(Debug, Clone)]
pub struct SettingsService {
    settings: Collection<PharmacySettings>,
}

impl SettingsService {
    /// Opens the service over the given store.
    pub async fn new(store: &LocalStore) -> ServiceResult<Self> {
        Ok(SettingsService {
            settings: store.collection().await?,
        })
    }

    /// Loads the settings, falling back to defaults on a fresh install.
    pub async fn load(&self) -> ServiceResult<PharmacySettings> {
        match self.settings.get(SETTINGS_ID).await? {
            Some(settings) => Ok(settings),
            None => Ok(PharmacySettings::default_settings()),
        }
    }

    /// Saves the settings (insert on first save, replace afterwards).
    pub async fn save(&self, input: SettingsUpdate) -> ServiceResult<PharmacySettings> {
        validate_name(&input.pharmacy_name)?;
        validate_tax_rate_bps(input.tax_rate_bps)?;
        validate_text("receipt_footer", input.receipt_footer.as_deref())?;

        let now = Utc::now();
        let existing = self.settings.get(SETTINGS_ID).await?;

        let settings = PharmacySettings {
            id: SETTINGS_ID.to_string(),
            pharmacy_name: input.pharmacy_name,
            currency: input.currency,
            tax_rate_bps: input.tax_rate_bps,
            low_stock_threshold: input.low_stock_threshold,
            receipt_footer: input.receipt_footer,
            created_at: existing
                .as_ref()
                .map(|s| s.created_at)
                .unwrap_or(now),
            updated_at: now,
        };

        debug!(first_save = existing.is_none(), "Saving settings");

        match existing {
            Some(_) => self.settings.update(&settings).await?,
            None => self.settings.add(&settings).await?,
        }

        Ok(settings)
    }
}
