//! # Records, Entities and Filters
//!
//! The store persists each record as a JSON document. This module defines
//! the [`Entity`] trait that ties a Rust type to its collection, and the
//! [`Filters`] builder used for conjunctive equality queries.
//!
//! ## Record Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  records table row                                                      │
//! │                                                                         │
//! │  store: "categories"                                                   │
//! │  id:    "550e8400-e29b-41d4-a716-446655440000"                         │
//! │  body:  { "id": "550e...", "name": "Analgésicos",                      │
//! │           "is_active": true, "created_at": "2026-08-23T10:00:00Z" }    │
//! │                                                                         │
//! │  The `id` field inside the body always equals the key column.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use botica_core::{Category, PharmacySettings, Prescription, Product, Supplier};

// =============================================================================
// Entity Trait
// =============================================================================

/// A domain type that lives in a named collection of the store.
///
/// ## Contract
/// - `STORE` names the logical collection the type lives in
/// - `id()` returns the record's unique identifier; it must be stable for
///   the lifetime of the record and unique within the collection
///
/// ## Example
/// ```rust,ignore
/// impl Entity for Category {
///     const STORE: &'static str = "categories";
///     fn id(&self) -> &str { &self.id }
/// }
/// ```
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + Unpin {
    /// Name of the collection this entity is stored in.
    const STORE: &'static str;

    /// The record's unique identifier within its collection.
    fn id(&self) -> &str;
}

impl Entity for Category {
    const STORE: &'static str = "categories";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Supplier {
    const STORE: &'static str = "suppliers";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Product {
    const STORE: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Prescription {
    const STORE: &'static str = "prescriptions";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for PharmacySettings {
    const STORE: &'static str = "settings";

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Filters
// =============================================================================

/// A conjunction of field/value equality clauses.
///
/// Used by [`Collection::query_with_filters`](crate::Collection::query_with_filters)
/// to select records where EVERY clause matches (logical AND, strict JSON
/// equality per field). There is no support for ranges, OR-combinations
/// or nested fields - callers needing those post-filter in memory.
///
/// ## Example
/// ```rust
/// use botica_store::Filters;
///
/// let filters = Filters::new()
///     .eq("category_id", "cat-1")
///     .eq("requires_prescription", true);
/// assert_eq!(filters.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Filters {
    clauses: Vec<(String, Value)>,
}

impl Filters {
    /// Creates an empty filter set. An empty set matches every record.
    pub fn new() -> Self {
        Filters::default()
    }

    /// Adds an equality clause: `field == value`.
    ///
    /// The value is converted to its JSON representation, so comparisons
    /// happen against exactly what the entity serializes to (strings stay
    /// case-sensitive, numbers compare as JSON numbers).
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    /// Number of clauses in the set.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// True when no clauses have been added.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Checks whether a JSON document satisfies every clause.
    ///
    /// A clause on a field the document does not carry never matches
    /// (absent is not equal to anything, including JSON null).
    pub fn matches(&self, doc: &Value) -> bool {
        self.clauses
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

/// Checks whether a JSON document's named field strictly equals a value.
///
/// This is the single-clause form used by
/// [`Collection::get_by_index`](crate::Collection::get_by_index):
/// exact JSON equality, case-sensitive, never substring matching.
pub fn field_equals(doc: &Value, field: &str, expected: &Value) -> bool {
    doc.get(field) == Some(expected)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filters_match_all_clauses() {
        let filters = Filters::new().eq("a", 1).eq("b", 2);

        assert!(filters.matches(&json!({ "a": 1, "b": 2, "c": 3 })));
        // A record matching only one clause is excluded
        assert!(!filters.matches(&json!({ "a": 1, "b": 9 })));
        assert!(!filters.matches(&json!({ "b": 2 })));
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let filters = Filters::new();
        assert!(filters.is_empty());
        assert!(filters.matches(&json!({ "anything": "goes" })));
    }

    #[test]
    fn test_field_equals_is_exact_not_substring() {
        let doc = json!({ "name": "Analgésicos infantiles" });

        assert!(field_equals(
            &doc,
            "name",
            &json!("Analgésicos infantiles")
        ));
        // Substring of the stored value must not match
        assert!(!field_equals(&doc, "name", &json!("Analgésicos")));
        // Case matters
        assert!(!field_equals(&doc, "name", &json!("analgésicos infantiles")));
    }

    #[test]
    fn test_absent_field_never_matches() {
        let doc = json!({ "name": "X" });
        assert!(!field_equals(&doc, "missing", &json!(null)));
        assert!(!Filters::new().eq("missing", 1).matches(&doc));
    }

    #[test]
    fn test_entity_store_names() {
        assert_eq!(Category::STORE, "categories");
        assert_eq!(Supplier::STORE, "suppliers");
        assert_eq!(Product::STORE, "products");
        assert_eq!(Prescription::STORE, "prescriptions");
        assert_eq!(PharmacySettings::STORE, "settings");
    }
}
