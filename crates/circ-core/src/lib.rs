//! # circ-core: Pure Circulation Logic for Circulate
//!
//! This crate is the **heart** of Circulate. It models a small lending
//! registry - a catalog of circulating items and a roster of members who may
//! check items out and back in - as pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Circulate Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation / Persistence (external)              │   │
//! │  │     CLI ──► text rendering ──► JSON export ──► storage          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ structured outcomes only               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ circ-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   item    │  │  ledger   │  │ registry  │  │ validation│   │   │
//! │  │   │ ItemState │  │  Member   │  │  Registry │  │   rules   │   │   │
//! │  │   │ ItemKind  │  │LoanRecord │  │  Summary  │  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TEXT FORMATTING • PURE LOGIC        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`] - Circulating items and their checkout/return state machine
//! - [`ledger`] - Members and their active loan records
//! - [`registry`] - The catalog/roster owner that routes borrow/return requests
//! - [`state`] - Thread-safe wrapper for concurrent callers
//! - [`clock`] - Injectable time source
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Logic**: Every operation is deterministic given the injected clock
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Total Operations**: A wrong-state request (double borrow, stray
//!    return) is an ordinary `Err` outcome, and the model is never left in an
//!    inconsistent intermediate state
//!
//! ## Example Usage
//!
//! ```rust
//! use circ_core::{CirculatingItem, ItemKind, Member, Registry};
//!
//! let mut registry = Registry::new();
//! registry.add_item(CirculatingItem::new(
//!     "B001",
//!     "The Rust Programming Language",
//!     ItemKind::Book { author: "Steve Klabnik".to_string() },
//! )).unwrap();
//! registry.add_member(Member::new("MEM001", "Ada Lovelace")).unwrap();
//!
//! // Borrow for the default 7-day period
//! let loan = registry.borrow("MEM001", "B001").unwrap();
//! assert_eq!(loan.item_id, "B001");
//!
//! // Return it; the closed record is the success payload
//! let closed = registry.return_item("MEM001", "B001").unwrap();
//! assert_eq!(closed.id, loan.id);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod item;
pub mod ledger;
pub mod registry;
pub mod state;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use circ_core::Registry` instead of
// `use circ_core::registry::Registry`

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use item::{CirculatingItem, ItemDetails, ItemKind, ItemState};
pub use ledger::{LoanRecord, Member};
pub use registry::{ItemSummaryEntry, MemberSummaryEntry, Registry, RegistrySummary};
pub use state::SharedRegistry;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default loan period, in days, when the caller does not pick one.
///
/// ## Business Reason
/// The standard lending period for all item kinds. Callers that want a
/// different period pass it explicitly via [`Registry::borrow_for`].
pub const DEFAULT_LOAN_DAYS: i64 = 7;

/// Maximum loan period, in days, a caller may request.
///
/// ## Business Reason
/// Prevents accidental multi-year loans (e.g., typing 700 instead of 7).
/// Can be made configurable per-registry in future versions.
pub const MAX_LOAN_DAYS: i64 = 365;

/// Maximum simultaneous active loans per member.
///
/// ## Business Reason
/// Keeps any single member from draining the catalog. Configurable
/// per-registry in future versions.
pub const MAX_ACTIVE_LOANS: usize = 10;
