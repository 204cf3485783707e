//! # Error Types
//!
//! Domain-specific error types for circ-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  circ-core errors (this file)                                           │
//! │  ├── CoreError        - Circulation outcomes (not-found, unavailable)   │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  Presentation errors (external collaborators)                           │
//! │  └── whatever the caller renders to a human                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller branches on the variant     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error payloads (item id, member id, limits)
//! 3. Errors are enum variants, never String
//! 4. Callers branch on the variant, NEVER on the message text - the
//!    `Display` output exists for logs and humans only
//!
//! Every core operation is total: a wrong-state request is an ordinary
//! `Err` value, never a panic, and never leaves the model half-mutated.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Circulation outcomes that are not plain successes.
///
/// Double-borrow and stray-return attempts are expected client behavior, not
/// corruption, so they live here as ordinary values rather than panics.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Item id does not resolve to a catalog entry.
    ///
    /// ## When This Occurs
    /// - Item id was never added to the registry
    /// - Caller mistyped the id
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Member id does not resolve to a roster entry.
    ///
    /// Resolution order is part of the contract: `borrow`/`return_item`
    /// resolve the member BEFORE the item, so a request with two bad ids
    /// reports the member.
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    /// Checkout attempted on an item that is already on loan.
    ///
    /// ## When This Occurs
    /// - A second member tries to borrow a loaned item
    /// - The current holder tries to borrow the same item again
    ///
    /// ## User Workflow
    /// ```text
    /// borrow(MEM002, B001)
    ///      │
    ///      ▼
    /// B001 state: OnLoan { member_id: "MEM001" }
    ///      │
    ///      ▼
    /// ItemUnavailable { item_id: "B001" }
    ///      │
    ///      ▼
    /// UI shows: "B001 is currently checked out"
    /// ```
    #[error("Item {item_id} is currently on loan")]
    ItemUnavailable { item_id: String },

    /// Check-in or return attempted without a matching loan.
    ///
    /// ## When This Occurs
    /// - Return requested for an item the member's ledger does not contain
    /// - `check_in` called on an item that is already available
    #[error("Item {item_id} is not on loan to the requesting member")]
    NotBorrowed { item_id: String },

    /// Catalog insertion with an id that already exists.
    ///
    /// Duplicate ids are rejected, never overwritten: silently replacing a
    /// catalog entry could orphan an open loan that references it.
    #[error("Duplicate item id: {0}")]
    DuplicateItemId(String),

    /// Roster insertion with an id that already exists.
    #[error("Duplicate member id: {0}")]
    DuplicateMemberId(String),

    /// Member already holds the maximum number of simultaneous loans.
    #[error("Member cannot hold more than {max} active loans")]
    LoanLimitReached { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-supplied input doesn't meet requirements.
/// Used for early validation before circulation logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., id with forbidden characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemUnavailable {
            item_id: "B001".to_string(),
        };
        assert_eq!(err.to_string(), "Item B001 is currently on loan");

        let err = CoreError::LoanLimitReached { max: 10 };
        assert_eq!(
            err.to_string(),
            "Member cannot hold more than 10 active loans"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::TooLong {
            field: "title".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "title must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
