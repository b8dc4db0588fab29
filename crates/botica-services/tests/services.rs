//! End-to-end service scenarios over an in-memory store.

use botica_core::{PrescriptionStatus, ValidationError};
use botica_services::{
    CategoryService, CategoryUpdate, NewCategory, NewPrescription, NewProduct, NewSupplier,
    PrescriptionService, ProductService, ServiceError, SettingsService, SettingsUpdate,
    SupplierService,
};
use botica_store::{LocalStore, StoreConfig, StoreError};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn open_store() -> LocalStore {
    init_tracing();
    LocalStore::open(StoreConfig::in_memory()).await.unwrap()
}

fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: None,
        parent_id: None,
    }
}

fn new_supplier(name: &str) -> NewSupplier {
    NewSupplier {
        name: name.to_string(),
        contact_name: Some("María Quispe".to_string()),
        phone: Some("+51 999 111 222".to_string()),
        email: Some("ventas@proveedor.com".to_string()),
        address: None,
    }
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn duplicate_category_name_is_rejected() {
    let store = open_store().await;
    let categories = CategoryService::new(&store).await.unwrap();

    categories.create(new_category("Analgésicos")).await.unwrap();
    categories.create(new_category("Antibióticos")).await.unwrap();

    let err = categories
        .create(new_category("Analgésicos"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Duplicate { .. })
    ));

    // The duplicate attempt must not have created anything
    assert_eq!(categories.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn category_update_allows_own_name_but_not_anothers() {
    let store = open_store().await;
    let categories = CategoryService::new(&store).await.unwrap();

    let analgesicos = categories.create(new_category("Analgésicos")).await.unwrap();
    categories.create(new_category("Antibióticos")).await.unwrap();

    // Re-saving under its own name is fine
    let updated = categories
        .update(
            &analgesicos.id,
            CategoryUpdate {
                name: "Analgésicos".to_string(),
                description: Some("Dolor y fiebre".to_string()),
                parent_id: None,
                is_active: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("Dolor y fiebre"));
    assert_eq!(updated.created_at, analgesicos.created_at);
    assert!(updated.updated_at >= analgesicos.updated_at);

    // Taking another category's name is not
    let err = categories
        .update(
            &analgesicos.id,
            CategoryUpdate {
                name: "Antibióticos".to_string(),
                description: None,
                parent_id: None,
                is_active: true,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Duplicate { .. })
    ));
}

#[tokio::test]
async fn category_update_of_missing_id_is_not_found() {
    let store = open_store().await;
    let categories = CategoryService::new(&store).await.unwrap();

    let err = categories
        .update(
            "no-such-id",
            CategoryUpdate {
                name: "Vitaminas".to_string(),
                description: None,
                parent_id: None,
                is_active: true,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Store(StoreError::NotFound { .. })
    ));

    // No upsert
    assert!(categories.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn category_delete_is_idempotent() {
    let store = open_store().await;
    let categories = CategoryService::new(&store).await.unwrap();

    let category = categories.create(new_category("Vitaminas")).await.unwrap();

    categories.delete(&category.id).await.unwrap();
    assert!(categories.get(&category.id).await.unwrap().is_none());

    // Deleting again is a no-op
    categories.delete(&category.id).await.unwrap();
}

// =============================================================================
// Suppliers
// =============================================================================

#[tokio::test]
async fn supplier_codes_are_minted_in_sequence() {
    let store = open_store().await;
    let suppliers = SupplierService::new(&store).await.unwrap();

    let a = suppliers.create(new_supplier("Droguería Central")).await.unwrap();
    let b = suppliers.create(new_supplier("Laboratorios Sur")).await.unwrap();
    let c = suppliers.create(new_supplier("Distribuidora Norte")).await.unwrap();

    assert_eq!(a.code, "SUPP-001");
    assert_eq!(b.code, "SUPP-002");
    assert_eq!(c.code, "SUPP-003");

    let found = suppliers.find_by_code("SUPP-002").await.unwrap().unwrap();
    assert_eq!(found.name, "Laboratorios Sur");
}

#[tokio::test]
async fn invalid_supplier_input_does_not_burn_a_code() {
    let store = open_store().await;
    let suppliers = SupplierService::new(&store).await.unwrap();

    suppliers.create(new_supplier("Droguería Central")).await.unwrap();

    // Validation fails before the sequence is touched
    let mut bad = new_supplier("Laboratorios Sur");
    bad.email = Some("not-an-email".to_string());
    assert!(suppliers.create(bad).await.is_err());

    let next = suppliers.create(new_supplier("Laboratorios Sur")).await.unwrap();
    assert_eq!(next.code, "SUPP-002");
}

#[tokio::test]
async fn supplier_code_survives_updates() {
    let store = open_store().await;
    let suppliers = SupplierService::new(&store).await.unwrap();

    let supplier = suppliers.create(new_supplier("Droguería Central")).await.unwrap();

    let updated = suppliers
        .update(
            &supplier.id,
            botica_services::SupplierUpdate {
                name: "Droguería Central S.A.C.".to_string(),
                contact_name: None,
                phone: None,
                email: None,
                address: Some("Av. Grau 123, Lima".to_string()),
                is_active: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.code, supplier.code);
    assert_eq!(updated.name, "Droguería Central S.A.C.");
    assert!(!updated.is_active);
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn product_filter_queries_are_conjunctive() {
    let store = open_store().await;
    let products = ProductService::new(&store).await.unwrap();

    products
        .create(NewProduct {
            name: "Amoxicilina 500mg".to_string(),
            category_id: Some("cat-antibiotics".to_string()),
            price_cents: 2500,
            stock: 40,
            requires_prescription: true,
        })
        .await
        .unwrap();
    products
        .create(NewProduct {
            name: "Ibuprofeno 400mg".to_string(),
            category_id: Some("cat-analgesics".to_string()),
            price_cents: 800,
            stock: 100,
            requires_prescription: false,
        })
        .await
        .unwrap();
    products
        .create(NewProduct {
            name: "Insulina glargina".to_string(),
            category_id: Some("cat-hormones".to_string()),
            price_cents: 9900,
            stock: 12,
            requires_prescription: true,
        })
        .await
        .unwrap();

    let antibiotics = products.list_by_category("cat-antibiotics").await.unwrap();
    assert_eq!(antibiotics.len(), 1);
    assert_eq!(antibiotics[0].name, "Amoxicilina 500mg");

    let controlled = products.list_prescription_only().await.unwrap();
    let names: Vec<&str> = controlled.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Amoxicilina 500mg", "Insulina glargina"]);
}

#[tokio::test]
async fn stock_adjustment_never_goes_negative() {
    let store = open_store().await;
    let products = ProductService::new(&store).await.unwrap();

    let product = products
        .create(NewProduct {
            name: "Paracetamol 500mg".to_string(),
            category_id: None,
            price_cents: 500,
            stock: 10,
            requires_prescription: false,
        })
        .await
        .unwrap();

    let after_sale = products.adjust_stock(&product.id, -3).await.unwrap();
    assert_eq!(after_sale.stock, 7);

    let err = products.adjust_stock(&product.id, -8).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // The failed adjustment left the stock untouched
    let unchanged = products.get(&product.id).await.unwrap().unwrap();
    assert_eq!(unchanged.stock, 7);
}

// =============================================================================
// Prescriptions
// =============================================================================

#[tokio::test]
async fn prescription_review_workflow() {
    let store = open_store().await;
    let prescriptions = PrescriptionService::new(&store).await.unwrap();

    let uploaded = prescriptions
        .upload(NewPrescription {
            customer_name: "Rosa Mendoza".to_string(),
            doctor_name: Some("Dr. Salazar".to_string()),
            file_name: "receta-enero.pdf".to_string(),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(uploaded.status, PrescriptionStatus::Pending);

    let pending = prescriptions
        .pending_for_customer("Rosa Mendoza")
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);

    let approved = prescriptions
        .approve(&uploaded.id, Some("Vigente hasta marzo".to_string()))
        .await
        .unwrap();
    assert_eq!(approved.status, PrescriptionStatus::Approved);
    assert!(approved.updated_at >= uploaded.updated_at);
    assert_eq!(approved.created_at, uploaded.created_at);

    // No longer pending
    assert!(prescriptions
        .pending_for_customer("Rosa Mendoza")
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        prescriptions
            .list_by_status(PrescriptionStatus::Approved)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn prescription_upload_rejects_bad_file_types() {
    let store = open_store().await;
    let prescriptions = PrescriptionService::new(&store).await.unwrap();

    let err = prescriptions
        .upload(NewPrescription {
            customer_name: "Rosa Mendoza".to_string(),
            doctor_name: None,
            file_name: "receta.exe".to_string(),
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::NotAllowed { .. })
    ));

    assert!(prescriptions.list().await.unwrap().is_empty());
}

// =============================================================================
// Settings
// =============================================================================

#[tokio::test]
async fn settings_load_defaults_then_round_trip() {
    let store = open_store().await;
    let settings = SettingsService::new(&store).await.unwrap();

    // Fresh install: defaults, nothing persisted yet
    let defaults = settings.load().await.unwrap();
    assert_eq!(defaults.pharmacy_name, "Botica");
    assert_eq!(defaults.tax_rate_bps, 0);

    let saved = settings
        .save(SettingsUpdate {
            pharmacy_name: "Botica San Martín".to_string(),
            currency: "PEN".to_string(),
            tax_rate_bps: 1800,
            low_stock_threshold: 5,
            receipt_footer: Some("Gracias por su compra".to_string()),
        })
        .await
        .unwrap();

    let loaded = settings.load().await.unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.currency, "PEN");

    // Second save replaces but keeps created_at
    let resaved = settings
        .save(SettingsUpdate {
            pharmacy_name: "Botica San Martín".to_string(),
            currency: "PEN".to_string(),
            tax_rate_bps: 1800,
            low_stock_threshold: 8,
            receipt_footer: None,
        })
        .await
        .unwrap();
    assert_eq!(resaved.created_at, saved.created_at);
    assert_eq!(settings.load().await.unwrap().low_stock_threshold, 8);
}

// =============================================================================
// Cross-service
// =============================================================================

#[tokio::test]
async fn services_share_one_store_with_independent_collections() {
    let store = open_store().await;
    let categories = CategoryService::new(&store).await.unwrap();
    let suppliers = SupplierService::new(&store).await.unwrap();

    categories.create(new_category("Analgésicos")).await.unwrap();
    suppliers.create(new_supplier("Droguería Central")).await.unwrap();

    let names = store.store_names().await.unwrap();
    assert!(names.contains(&"categories".to_string()));
    assert!(names.contains(&"suppliers".to_string()));

    assert_eq!(categories.list().await.unwrap().len(), 1);
    assert_eq!(suppliers.list().await.unwrap().len(), 1);
}
