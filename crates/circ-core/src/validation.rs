//! # Validation Module
//!
//! Input validation for caller-supplied ids, names, and loan periods.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (external)                                       │
//! │  ├── Basic format checks (empty, length)                                │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (at registry insertion / borrow time)             │
//! │  ├── Id shape, title/name length, loan-period range                     │
//! │  └── Guarantees the model never holds malformed identities              │
//! │                                                                         │
//! │  Circulation logic itself (state machine, ledger coupling) runs only    │
//! │  on input that passed this layer.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use circ_core::validation::{validate_entity_id, validate_borrow_days};
//!
//! assert!(validate_entity_id("item id", "B001").is_ok());
//! assert!(validate_borrow_days(7).is_ok());
//! ```

use crate::error::ValidationError;
use crate::MAX_LOAN_DAYS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identity Validators
// =============================================================================

/// Validates an item or member id.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 32 characters
/// - Must contain only alphanumeric characters, hyphens, underscores
///
/// `field` names the id in the error payload ("item id" / "member id").
pub fn validate_entity_id(field: &str, id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.len() > 32 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 32,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item title.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a member name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_member_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested loan period in days.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_LOAN_DAYS`]
pub fn validate_borrow_days(days: i64) -> ValidationResult<()> {
    if days < 1 || days > MAX_LOAN_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "borrow_days".to_string(),
            min: 1,
            max: MAX_LOAN_DAYS,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
