//! # Loan Ledger
//!
//! Members and their active loan records.
//!
//! ## Ledger/Item Coupling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              The Core Correctness Invariant                             │
//! │                                                                         │
//! │  open_loan(item)                      close_loan(item)                  │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  loan-limit check ── Err ──► STOP     ledger lookup ── miss ──► STOP    │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  item.check_out() ── Err ──► STOP     item.check_in() ── Err ──► STOP   │
//! │       │  (nothing mutated)                 │  (nothing mutated)         │
//! │       ▼                                    ▼                            │
//! │  append LoanRecord                    remove LoanRecord                 │
//! │                                                                         │
//! │  The ledger mutates ONLY after the item transition succeeds, so a       │
//! │  member's loan list and the item's state can never desynchronize.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A record for item X exists under member M if and only if X is
//! `OnLoan { member_id: M }`. Holder identity is implicit in *which* ledger
//! holds the record; the check-in path relies on that, not on re-checking ids.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::item::CirculatingItem;
use crate::MAX_ACTIVE_LOANS;

// =============================================================================
// Loan Record
// =============================================================================

/// An active loan: the association between a member, an item, and the
/// borrow/due timestamps.
///
/// ## Design Notes
/// - `item_id`: non-owning reference to the item (the registry owns items)
/// - `title`: frozen copy of the item title at checkout time, so the record
///   stays displayable even if catalog metadata is edited later
/// - `due_at` is descriptive metadata only - nothing in the core enforces it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    /// Unique record id (UUID v4).
    pub id: String,

    /// Id of the borrowed item.
    pub item_id: String,

    /// Item title at checkout time (frozen).
    pub title: String,

    /// When the loan was opened.
    pub checked_out_at: DateTime<Utc>,

    /// When the loan falls due: `checked_out_at + borrow_days`.
    pub due_at: DateTime<Utc>,
}

impl LoanRecord {
    /// Creates a record for `item` checked out at `now` for `borrow_days`.
    fn open(item: &CirculatingItem, borrow_days: i64, now: DateTime<Utc>) -> Self {
        LoanRecord {
            id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            title: item.title.clone(),
            checked_out_at: now,
            due_at: now + Duration::days(borrow_days),
        }
    }
}

// =============================================================================
// Member
// =============================================================================

/// A roster entry owning its ledger of active loans.
///
/// ## Invariants
/// - Loans are stored in insertion order (= borrow order)
/// - The ledger never contains two records for the same item id
/// - At most [`MAX_ACTIVE_LOANS`] records at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier - immutable after creation.
    pub id: String,

    /// Display name, immutable after creation.
    pub name: String,

    /// Active loans, oldest first.
    loans: Vec<LoanRecord>,
}

impl Member {
    /// Creates a member with an empty ledger.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Member {
            id: id.into(),
            name: name.into(),
            loans: Vec::new(),
        }
    }

    /// Opens a loan on `item` for this member.
    ///
    /// ## Behavior
    /// - Ledger full: `Err(LoanLimitReached)`, nothing mutated anywhere
    /// - Item already on loan: `Err(ItemUnavailable)` propagated unchanged,
    ///   ledger untouched
    /// - Otherwise the item transitions to on-loan and a record is appended;
    ///   a clone of the new record is the success payload
    pub fn open_loan(
        &mut self,
        item: &mut CirculatingItem,
        borrow_days: i64,
        now: DateTime<Utc>,
    ) -> CoreResult<LoanRecord> {
        // Limit first: the item must not be mutated for a doomed request.
        if self.loans.len() >= MAX_ACTIVE_LOANS {
            return Err(CoreError::LoanLimitReached {
                max: MAX_ACTIVE_LOANS,
            });
        }

        item.check_out(&self.id)?;

        // check_out succeeding guarantees no existing record for this item:
        // the item was Available, so no ledger anywhere referenced it.
        debug_assert!(!self.holds(&item.id));

        let record = LoanRecord::open(item, borrow_days, now);
        self.loans.push(record.clone());
        Ok(record)
    }

    /// Closes the loan on `item`, removing and returning its record.
    ///
    /// ## Behavior
    /// - No record for `item.id` in this ledger: `Err(NotBorrowed)`, nothing
    ///   mutated - this member does not hold the item
    /// - Otherwise the item transitions to available and the record is
    ///   removed; the closed record is the success payload
    pub fn close_loan(&mut self, item: &mut CirculatingItem) -> CoreResult<LoanRecord> {
        let position = match self.loans.iter().position(|r| r.item_id == item.id) {
            Some(position) => position,
            None => {
                return Err(CoreError::NotBorrowed {
                    item_id: item.id.clone(),
                })
            }
        };

        // Gate the ledger removal on the item transition succeeding.
        item.check_in()?;

        Ok(self.loans.remove(position))
    }

    /// The active loans, oldest first. An empty slice is a valid state.
    #[inline]
    pub fn active_loans(&self) -> &[LoanRecord] {
        &self.loans
    }

    /// Whether this member currently holds `item_id`.
    pub fn holds(&self, item_id: &str) -> bool {
        self.loans.iter().any(|r| r.item_id == item_id)
    }

    /// Number of active loans.
    #[inline]
    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
