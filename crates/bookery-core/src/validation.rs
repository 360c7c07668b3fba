//! # Validation Module
//!
//! Input validation utilities for Bookery.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Client                                                       │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API handler (Rust)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints (email)                                        │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_PURCHASE_QUANTITY, MAX_SEARCH_TERM_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a purchase quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_PURCHASE_QUANTITY (999)
///
/// Stock coverage is deliberately NOT checked here: that check only counts
/// when it is atomic with the decrement, inside the purchase transaction.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Purchase request                                                       │
/// │                                                                         │
/// │  Client sends quantity: 3                                              │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(3) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: out of range                             │
/// │       │                                                                 │
/// │       └── OK → hand off to PurchaseRepository::purchase                │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_PURCHASE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_PURCHASE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an absolute stock level for the restock endpoint.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero means "out of stock", which is valid
pub fn validate_stock_quantity(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock_quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog search term.
///
/// ## Rules
/// - Can be empty (returns the full catalog)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed term.
pub fn validate_search_term(term: &str) -> ValidationResult<String> {
    let term = term.trim();

    if term.len() > MAX_SEARCH_TERM_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_SEARCH_TERM_LEN,
        });
    }

    Ok(term.to_string())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain exactly one '@' with non-empty local and domain parts
/// - Maximum 254 characters (RFC 5321 envelope limit)
///
/// Intentionally shallow: the mailbox either exists or it doesn't, and no
/// regex can tell us. This catches typos, not liars.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(email.to_string())
}

/// Validates a person-name field (first_name / last_name).
///
/// ## Rules
/// - Must not be empty
/// - Maximum 100 characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(value.to_string())
}

/// Validates a password at registration.
///
/// ## Rules
/// - Minimum 8 characters (the original accepted anything, including "")
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.len() < 8 {
        return Err(ValidationError::InvalidFormat {
            field: "password".to_string(),
            reason: "must be at least 8 characters".to_string(),
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
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(500).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert_eq!(
            validate_email("  ada@example.com  ").unwrap(),
            "ada@example.com"
        );

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@").is_err());
        assert!(validate_email("ada@nodot").is_err());
    }

    #[test]
    fn test_validate_search_term() {
        assert_eq!(validate_search_term("  harry  ").unwrap(), "harry");
        assert!(validate_search_term("").is_ok());
        assert!(validate_search_term(&"a".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("first_name", "Ada").is_ok());
        assert!(validate_name("first_name", "   ").is_err());
        assert!(validate_name("last_name", &"x".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("correct horse").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("").is_err());
    }
}
