//! # Product Service
//!
//! Catalog products. Names are unique like categories; listing by
//! category and by prescription requirement uses the store's filter
//! queries.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use botica_core::validation::{validate_name, validate_price_cents, validate_stock};
use botica_core::{generate_id, Product, ValidationError};
use botica_store::{Collection, Filters, LocalStore};

use crate::error::ServiceResult;

/// Input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category_id: Option<String>,
    pub price_cents: i64,
    pub stock: i64,
    pub requires_prescription: bool,
}

/// Complete new state for an existing product (whole-record update).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub category_id: Option<String>,
    pub price_cents: i64,
    pub stock: i64,
    pub requires_prescription: bool,
    pub is_active: bool,
}

/// Service for catalog product management.
#[derive(Debug, Clone)]
pub struct ProductService {
    products: Collection<Product>,
}

impl ProductService {
    /// Opens the service over the given store.
    pub async fn new(store: &LocalStore) -> ServiceResult<Self> {
        Ok(ProductService {
            products: store.collection().await?,
        })
    }

    /// Creates a product.
    pub async fn create(&self, input: NewProduct) -> ServiceResult<Product> {
        validate_name(&input.name)?;
        validate_price_cents(input.price_cents)?;
        validate_stock(input.stock)?;

        self.ensure_unique_name(&input.name, None).await?;

        let now = Utc::now();
        let product = Product {
            id: generate_id(),
            name: input.name,
            category_id: input.category_id,
            price_cents: input.price_cents,
            stock: input.stock,
            requires_prescription: input.requires_prescription,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "Creating product");

        self.products.add(&product).await?;
        Ok(product)
    }

    /// Gets a product by id.
    pub async fn get(&self, id: &str) -> ServiceResult<Option<Product>> {
        Ok(self.products.get(id).await?)
    }

    /// Lists all products in insertion order.
    pub async fn list(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.products.get_all().await?)
    }

    /// Lists active products in a category.
    pub async fn list_by_category(&self, category_id: &str) -> ServiceResult<Vec<Product>> {
        let filters = Filters::new()
            .eq("category_id", category_id)
            .eq("is_active", true);

        Ok(self.products.query_with_filters(&filters).await?)
    }

    /// Lists active products that require a prescription on file.
    pub async fn list_prescription_only(&self) -> ServiceResult<Vec<Product>> {
        let filters = Filters::new()
            .eq("requires_prescription", true)
            .eq("is_active", true);

        Ok(self.products.query_with_filters(&filters).await?)
    }

    /// Replaces a product with the given new state.
    pub async fn update(&self, id: &str, input: ProductUpdate) -> ServiceResult<Product> {
        validate_name(&input.name)?;
        validate_price_cents(input.price_cents)?;
        validate_stock(input.stock)?;

        self.ensure_unique_name(&input.name, Some(id)).await?;

        let Some(existing) = self.products.get(id).await? else {
            return Err(
                botica_store::StoreError::not_found(self.products.name(), id).into(),
            );
        };

        let product = Product {
            id: existing.id,
            name: input.name,
            category_id: input.category_id,
            price_cents: input.price_cents,
            stock: input.stock,
            requires_prescription: input.requires_prescription,
            is_active: input.is_active,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        debug!(id = %product.id, "Updating product");

        self.products.update(&product).await?;
        Ok(product)
    }

    /// Adjusts stock by a delta (negative for sales, positive for
    /// restocking). The resulting level must not go negative.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> ServiceResult<Product> {
        let Some(mut product) = self.products.get(id).await? else {
            return Err(
                botica_store::StoreError::not_found(self.products.name(), id).into(),
            );
        };

        let new_stock = product.stock + delta;
        validate_stock(new_stock)?;

        product.stock = new_stock;
        product.updated_at = Utc::now();

        debug!(id = %id, delta = %delta, stock = %new_stock, "Adjusting stock");

        self.products.update(&product).await?;
        Ok(product)
    }

    /// Deletes a product. Idempotent.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        debug!(id = %id, "Deleting product");
        Ok(self.products.remove(id).await?)
    }

    /// Fails with `ValidationError::Duplicate` when another product
    /// already uses the name.
    async fn ensure_unique_name(&self, name: &str, exclude_id: Option<&str>) -> ServiceResult<()> {
        let hits = self.products.get_by_index("name", name).await?;

        let taken = hits.iter().any(|p| Some(p.id.as_str()) != exclude_id);

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
