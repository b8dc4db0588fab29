//! # Category Service
//!
//! Categories organize the product catalog ("Analgésicos",
//! "Antibióticos", ...). Names are unique; the check happens here via
//! `get_by_index`, not in the store.
//!
//! ## Uniqueness Check
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create("Analgésicos")                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  get_by_index("name", "Analgésicos")                                   │
//! │       │                                                                 │
//! │       ├── non-empty → ValidationError::Duplicate                       │
//! │       │                                                                 │
//! │       └── empty → add record                                           │
//! │                                                                         │
//! │  Read-then-check-then-write: NOT atomic across writers. Accepted       │
//! │  under the single-writer assumption of this installation model.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use botica_core::validation::{validate_name, validate_text};
use botica_core::{generate_id, Category, ValidationError};
use botica_store::{Collection, LocalStore};

use crate::error::ServiceResult;

/// Input for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<String>,
}

/// Complete new state for an existing category (whole-record update).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<String>,
    pub is_active: bool,
}

/// Service for category management.
#[derive(Debug, Clone)]
pub struct CategoryService {
    categories: Collection<Category>,
}

impl CategoryService {
    /// Opens the service over the given store.
    pub async fn new(store: &LocalStore) -> ServiceResult<Self> {
        Ok(CategoryService {
            categories: store.collection().await?,
        })
    }

    /// Creates a category.
    ///
    /// ## Errors
    /// * `ValidationError::Required` / `TooLong` - bad input
    /// * `ValidationError::Duplicate` - a category with that name exists
    pub async fn create(&self, input: NewCategory) -> ServiceResult<Category> {
        validate_name(&input.name)?;
        validate_text("description", input.description.as_deref())?;

        self.ensure_unique_name(&input.name, None).await?;

        let now = Utc::now();
        let category = Category {
            id: generate_id(),
            name: input.name,
            description: input.description,
            parent_id: input.parent_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %category.id, name = %category.name, "Creating category");

        self.categories.add(&category).await?;
        Ok(category)
    }

    /// Gets a category by id.
    pub async fn get(&self, id: &str) -> ServiceResult<Option<Category>> {
        Ok(self.categories.get(id).await?)
    }

    /// Lists all categories in insertion order.
    pub async fn list(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.categories.get_all().await?)
    }

    /// Finds categories by exact name.
    pub async fn find_by_name(&self, name: &str) -> ServiceResult<Vec<Category>> {
        Ok(self.categories.get_by_index("name", name).await?)
    }

    /// Replaces a category with the given new state.
    ///
    /// Refreshes `updated_at`; `created_at` and `id` are preserved.
    ///
    /// ## Errors
    /// * `StoreError::NotFound` - no category with that id
    /// * `ValidationError::Duplicate` - the new name belongs to another
    ///   category
    pub async fn update(&self, id: &str, input: CategoryUpdate) -> ServiceResult<Category> {
        validate_name(&input.name)?;
        validate_text("description", input.description.as_deref())?;

        // Uniqueness must exclude the record being updated: renaming a
        // category to its own name is fine.
        self.ensure_unique_name(&input.name, Some(id)).await?;

        let Some(existing) = self.categories.get(id).await? else {
            return Err(botica_store::StoreError::not_found(
                self.categories.name(),
                id,
            )
            .into());
        };

        let category = Category {
            id: existing.id,
            name: input.name,
            description: input.description,
            parent_id: input.parent_id,
            is_active: input.is_active,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        debug!(id = %category.id, "Updating category");

        self.categories.update(&category).await?;
        Ok(category)
    }

    /// Deletes a category. Idempotent.
    ///
    /// Products referencing the category keep their dangling
    /// `category_id` - no cross-store referential integrity.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        debug!(id = %id, "Deleting category");
        Ok(self.categories.remove(id).await?)
    }

    /// Fails with `ValidationError::Duplicate` when another category
    /// already uses the name.
    async fn ensure_unique_name(&self, name: &str, exclude_id: Option<&str>) -> ServiceResult<()> {
        let hits = self.categories.get_by_index("name", name).await?;

        let taken = hits
            .iter()
            .any(|c| Some(c.id.as_str()) != exclude_id);

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
