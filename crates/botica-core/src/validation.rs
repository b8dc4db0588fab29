//! # Validation Module
//!
//! Input validation utilities for Botica.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Service input (THIS MODULE)                                  │
//! │  ├── Format checks (empty, length, allowed extensions)                 │
//! │  └── Runs before any store operation                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service rules (read-then-check)                              │
//! │  └── Uniqueness checks via get_by_index                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store (SQLite)                                               │
//! │  └── PRIMARY KEY (store, id) - duplicate ids rejected                  │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use botica_core::validation::{validate_name, validate_price_cents};
//!
//! validate_name("Analgésicos").unwrap();
//! validate_price_cents(1099).unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_NAME_LEN, MAX_TEXT_LEN, PRESCRIPTION_FILE_EXTENSIONS};

// =============================================================================
// String Validators
// =============================================================================

/// Validates an entity name (category, supplier, product).
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use botica_core::validation::validate_name;
///
/// assert!(validate_name("Paracetamol 500mg").is_ok());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an optional free-text field (description, notes).
///
/// ## Rules
/// - May be absent
/// - Must be at most [`MAX_TEXT_LEN`] characters when present
pub fn validate_text(field: &str, text: Option<&str>) -> ValidationResult<()> {
    if let Some(text) = text {
        if text.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: MAX_TEXT_LEN,
            });
        }
    }

    Ok(())
}

/// Validates an email address shape.
///
/// ## Rules
/// - May be absent
/// - Must contain exactly one '@' with non-empty local part and a domain
///   containing a '.'
///
/// Not a full RFC 5322 parse - the goal is catching typos, not policing
/// deliverability.
pub fn validate_email(email: Option<&str>) -> ValidationResult<()> {
    let Some(email) = email else {
        return Ok(());
    };

    let email = email.trim();
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates an uploaded prescription file name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most [`MAX_NAME_LEN`] characters
/// - Extension must be one of [`PRESCRIPTION_FILE_EXTENSIONS`]
///   (case-insensitive)
///
/// ## Example
/// ```rust
/// use botica_core::validation::validate_prescription_file;
///
/// assert!(validate_prescription_file("receta-enero.pdf").is_ok());
/// assert!(validate_prescription_file("receta.exe").is_err());
/// ```
pub fn validate_prescription_file(file_name: &str) -> ValidationResult<()> {
    let file_name = file_name.trim();

    if file_name.is_empty() {
        return Err(ValidationError::Required {
            field: "file_name".to_string(),
        });
    }

    if file_name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "file_name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    let extension = file_name.rsplit('.').next().unwrap_or("").to_lowercase();
    let allowed = file_name.contains('.')
        && PRESCRIPTION_FILE_EXTENSIONS
            .iter()
            .any(|ext| *ext == extension);

    if !allowed {
        return Err(ValidationError::NotAllowed {
            field: "file_name".to_string(),
            allowed: PRESCRIPTION_FILE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, samples)
///
/// ## Example
/// ```rust
/// use botica_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());  // $10.99
/// assert!(validate_price_cents(0).is_ok());     // Free sample
/// assert!(validate_price_cents(-100).is_err()); // Invalid
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative; the catalog never records negative stock
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        // Valid names
        assert!(validate_name("Analgésicos").is_ok());
        assert!(validate_name("Paracetamol 500mg").is_ok());

        // Invalid names
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_text() {
        assert!(validate_text("description", None).is_ok());
        assert!(validate_text("description", Some("short note")).is_ok());
        assert!(validate_text("description", Some(&"x".repeat(2000))).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email(None).is_ok());
        assert!(validate_email(Some("ventas@proveedor.com")).is_ok());

        assert!(validate_email(Some("no-at-sign")).is_err());
        assert!(validate_email(Some("@domain.com")).is_err());
        assert!(validate_email(Some("name@nodot")).is_err());
    }

    #[test]
    fn test_validate_prescription_file() {
        assert!(validate_prescription_file("receta.pdf").is_ok());
        assert!(validate_prescription_file("scan.JPG").is_ok());
        assert!(validate_prescription_file("photo.jpeg").is_ok());

        assert!(validate_prescription_file("").is_err());
        assert!(validate_prescription_file("receta.exe").is_err());
        assert!(validate_prescription_file("no-extension").is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(42).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(825).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }
}
