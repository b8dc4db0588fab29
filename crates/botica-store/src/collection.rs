//! # Collection Operations
//!
//! Typed CRUD and query operations for one logical collection.
//!
//! ## Query Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                How Secondary Lookups Work                               │
//! │                                                                         │
//! │  get_by_index("name", "Analgésicos")                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT body FROM records WHERE store = 'categories' ORDER BY rowid    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ { "name": "Analgésicos", ... }          │ ← MATCH (exact equality)  │
//! │  │ { "name": "Antibióticos", ... }         │                           │
//! │  │ { "name": "Analgésicos infantiles" }    │ ← no match (not substring)│
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results: [Analgésicos]                                                │
//! │                                                                         │
//! │  Full scan, O(n) per call - fine for small single-tenant collections.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;
use sqlx::SqlitePool;
use std::marker::PhantomData;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::record::{field_equals, Entity, Filters};

/// Typed handle for one collection of the document store.
///
/// Obtained from [`LocalStore::collection`](crate::LocalStore::collection).
/// Cheap to clone; all clones share the same pool.
///
/// ## Usage
/// ```rust,ignore
/// let categories: Collection<Category> = store.collection().await?;
///
/// categories.add(&category).await?;
/// let found = categories.get(&category.id).await?;
/// let all = categories.get_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Collection<T: Entity> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Collection<T> {
    /// Creates a collection handle over the given pool.
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Collection {
            pool,
            _entity: PhantomData,
        }
    }

    /// Name of this collection.
    pub fn name(&self) -> &'static str {
        T::STORE
    }

    /// Inserts a new record.
    ///
    /// ## Returns
    /// * `Ok(())` - Record persisted, visible to subsequent reads
    /// * `Err(StoreError::DuplicateKey)` - A record with this id already
    ///   exists in the collection (ids are expected to be generated
    ///   fresh, so this usually signals a logic bug)
    pub async fn add(&self, record: &T) -> StoreResult<()> {
        let id = record.id();
        let body = serde_json::to_string(record)?;

        debug!(store = T::STORE, id = %id, "Adding record");

        let result = sqlx::query("INSERT INTO records (store, id, body) VALUES (?1, ?2, ?3)")
            .bind(T::STORE)
            .bind(id)
            .bind(body)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            // UNIQUE constraint on (store, id): the id is already taken
            Err(sqlx::Error::Database(db_err))
                if db_err.message().contains("UNIQUE constraint failed") =>
            {
                Err(StoreError::duplicate_key(T::STORE, id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Gets a record by id.
    ///
    /// ## Returns
    /// * `Ok(Some(record))` - Record found
    /// * `Ok(None)` - No record with that id (never an error)
    pub async fn get(&self, id: &str) -> StoreResult<Option<T>> {
        let body: Option<String> =
            sqlx::query_scalar("SELECT body FROM records WHERE store = ?1 AND id = ?2")
                .bind(T::STORE)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    /// Returns every record in the collection, in insertion order.
    ///
    /// An empty collection yields an empty vec, not an error.
    pub async fn get_all(&self) -> StoreResult<Vec<T>> {
        let bodies: Vec<String> =
            sqlx::query_scalar("SELECT body FROM records WHERE store = ?1 ORDER BY rowid")
                .bind(T::STORE)
                .fetch_all(&self.pool)
                .await?;

        debug!(store = T::STORE, count = bodies.len(), "Scanned collection");

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(StoreError::from))
            .collect()
    }

    /// Replaces the stored record matching `record.id()` wholesale.
    ///
    /// This is NOT an upsert: updating an id that was never added fails.
    /// Callers creating records must use [`Collection::add`].
    ///
    /// ## Returns
    /// * `Ok(())` - Record replaced
    /// * `Err(StoreError::NotFound)` - No record with that id; the
    ///   collection is unchanged
    pub async fn update(&self, record: &T) -> StoreResult<()> {
        let id = record.id();
        let body = serde_json::to_string(record)?;

        debug!(store = T::STORE, id = %id, "Updating record");

        let result = sqlx::query("UPDATE records SET body = ?3 WHERE store = ?1 AND id = ?2")
            .bind(T::STORE)
            .bind(id)
            .bind(body)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(T::STORE, id));
        }

        Ok(())
    }

    /// Deletes the record with the given id.
    ///
    /// Idempotent: removing a nonexistent id is a no-op, not an error.
    pub async fn remove(&self, id: &str) -> StoreResult<()> {
        debug!(store = T::STORE, id = %id, "Removing record");

        sqlx::query("DELETE FROM records WHERE store = ?1 AND id = ?2")
            .bind(T::STORE)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns all records whose named field strictly equals a value.
    ///
    /// Exact JSON equality: case-sensitive, never substring matching.
    /// Used by the service layer for read-then-check uniqueness rules
    /// (e.g. category names). Full scan over the collection.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let hits = categories.get_by_index("name", "Analgésicos").await?;
    /// ```
    pub async fn get_by_index(
        &self,
        field: &str,
        value: impl Into<Value>,
    ) -> StoreResult<Vec<T>> {
        let expected = value.into();

        debug!(store = T::STORE, field = %field, "Index lookup");

        self.scan_matching(|doc| field_equals(doc, field, &expected))
            .await
    }

    /// Returns all records matching EVERY filter clause (logical AND,
    /// exact equality per field).
    ///
    /// No ranges, no OR, no nested fields - callers needing those
    /// post-filter in memory. An empty filter set matches every record.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let filters = Filters::new()
    ///     .eq("category_id", "cat-1")
    ///     .eq("requires_prescription", true);
    /// let hits = products.query_with_filters(&filters).await?;
    /// ```
    pub async fn query_with_filters(&self, filters: &Filters) -> StoreResult<Vec<T>> {
        debug!(
            store = T::STORE,
            clauses = filters.len(),
            "Filter query"
        );

        self.scan_matching(|doc| filters.matches(doc)).await
    }

    /// Counts records in the collection (for diagnostics).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM records WHERE store = ?1")
            .bind(T::STORE)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Full scan keeping records whose JSON document satisfies `keep`.
    ///
    /// Matching happens on the raw document so that field comparisons see
    /// exactly what the entity serialized to; matches are then decoded
    /// into `T`.
    async fn scan_matching<F>(&self, keep: F) -> StoreResult<Vec<T>>
    where
        F: Fn(&Value) -> bool,
    {
        let bodies: Vec<String> =
            sqlx::query_scalar("SELECT body FROM records WHERE store = ?1 ORDER BY rowid")
                .bind(T::STORE)
                .fetch_all(&self.pool)
                .await?;

        let mut matches = Vec::new();
        for body in &bodies {
            let doc: Value = serde_json::from_str(body)?;
            if keep(&doc) {
                matches.push(serde_json::from_value(doc)?);
            }
        }

        Ok(matches)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LocalStore, StoreConfig};
    use botica_core::{generate_id, Category, Product};
    use chrono::Utc;

    async fn open_store() -> LocalStore {
        LocalStore::open(StoreConfig::in_memory()).await.unwrap()
    }

    fn sample_category(name: &str) -> Category {
        let now = Utc::now();
        Category {
            id: generate_id(),
            name: name.to_string(),
            description: None,
            parent_id: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_product(name: &str, category_id: &str, requires_prescription: bool) -> Product {
        let now = Utc::now();
        Product {
            id: generate_id(),
            name: name.to_string(),
            category_id: Some(category_id.to_string()),
            price_cents: 1099,
            stock: 20,
            requires_prescription,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_add_then_get_returns_equal_record() {
        let store = open_store().await;
        let categories = store.collection::<Category>().await.unwrap();

        let category = sample_category("Analgésicos");
        categories.add(&category).await.unwrap();

        let found = categories.get(&category.id).await.unwrap().unwrap();
        assert_eq!(found, category);
    }

    #[tokio::test]
    async fn test_add_duplicate_id_fails() {
        let store = open_store().await;
        let categories = store.collection::<Category>().await.unwrap();

        let category = sample_category("Analgésicos");
        categories.add(&category).await.unwrap();

        let err = categories.add(&category).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }

    #[tokio::test]
    async fn test_get_missing_id_is_none() {
        let store = open_store().await;
        let categories = store.collection::<Category>().await.unwrap();

        let found = categories.get("no-such-id").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_all_preserves_insertion_order() {
        let store = open_store().await;
        let categories = store.collection::<Category>().await.unwrap();

        let names = ["Analgésicos", "Antibióticos", "Vitaminas"];
        for name in names {
            categories.add(&sample_category(name)).await.unwrap();
        }

        let all = categories.get_all().await.unwrap();
        assert_eq!(all.len(), 3);
        let got: Vec<&str> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(got, names);
    }

    #[tokio::test]
    async fn test_get_all_empty_collection() {
        let store = open_store().await;
        let categories = store.collection::<Category>().await.unwrap();

        let all = categories.get_all().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_wholesale() {
        let store = open_store().await;
        let categories = store.collection::<Category>().await.unwrap();

        let mut category = sample_category("Analgésicos");
        categories.add(&category).await.unwrap();

        category.name = "Analgésicos y antipiréticos".to_string();
        category.description = Some("Dolor y fiebre".to_string());
        categories.update(&category).await.unwrap();

        let found = categories.get(&category.id).await.unwrap().unwrap();
        assert_eq!(found, category);
    }

    #[tokio::test]
    async fn test_update_missing_id_fails_and_leaves_store_unchanged() {
        let store = open_store().await;
        let categories = store.collection::<Category>().await.unwrap();

        categories.add(&sample_category("Analgésicos")).await.unwrap();

        let phantom = sample_category("Fantasma");
        let err = categories.update(&phantom).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        // No upsert: the phantom record was not created
        assert_eq!(categories.count().await.unwrap(), 1);
        assert!(categories.get(&phantom.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = open_store().await;
        let categories = store.collection::<Category>().await.unwrap();

        let category = sample_category("Analgésicos");
        categories.add(&category).await.unwrap();

        categories.remove(&category.id).await.unwrap();
        assert!(categories.get(&category.id).await.unwrap().is_none());

        // Removing again (or a never-existing id) is a no-op
        categories.remove(&category.id).await.unwrap();
        categories.remove("never-existed").await.unwrap();
    }

    #[tokio::test]
    async fn test_get_by_index_is_exact_match() {
        let store = open_store().await;
        let categories = store.collection::<Category>().await.unwrap();

        categories.add(&sample_category("Analgésicos")).await.unwrap();
        categories
            .add(&sample_category("Analgésicos infantiles"))
            .await
            .unwrap();
        categories.add(&sample_category("analgésicos")).await.unwrap();

        // Exact, case-sensitive equality: the substring and lowercase
        // variants are excluded
        let hits = categories
            .get_by_index("name", "Analgésicos")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Analgésicos");
    }

    #[tokio::test]
    async fn test_query_with_filters_is_conjunctive() {
        let store = open_store().await;
        let products = store.collection::<Product>().await.unwrap();

        products
            .add(&sample_product("Amoxicilina 500mg", "cat-antibiotics", true))
            .await
            .unwrap();
        products
            .add(&sample_product("Ibuprofeno 400mg", "cat-antibiotics", false))
            .await
            .unwrap();
        products
            .add(&sample_product("Insulina", "cat-hormones", true))
            .await
            .unwrap();

        let filters = Filters::new()
            .eq("category_id", "cat-antibiotics")
            .eq("requires_prescription", true);

        // Records matching only one clause are excluded
        let hits = products.query_with_filters(&filters).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Amoxicilina 500mg");
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let store = open_store().await;
        let categories = store.collection::<Category>().await.unwrap();
        let products = store.collection::<Product>().await.unwrap();

        categories.add(&sample_category("Analgésicos")).await.unwrap();

        assert_eq!(categories.count().await.unwrap(), 1);
        assert_eq!(products.count().await.unwrap(), 0);
    }
}
