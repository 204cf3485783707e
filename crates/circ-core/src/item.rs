//! # Circulating Items
//!
//! Catalog entries and their checkout/return state machine.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Item State Transitions                                 │
//! │                                                                         │
//! │                    check_out(member) ok                                 │
//! │   ┌───────────┐ ─────────────────────────► ┌───────────────────┐       │
//! │   │ Available │                            │ OnLoan { member } │       │
//! │   └───────────┘ ◄───────────────────────── └───────────────────┘       │
//! │         │              check_in() ok                 │                  │
//! │         │                                            │                  │
//! │    check_in()                                  check_out(any)           │
//! │         │                                            │                  │
//! │         ▼                                            ▼                  │
//! │    Err(NotBorrowed)                         Err(ItemUnavailable)        │
//! │    (self-transition,                        (self-transition,           │
//! │     no mutation)                             no mutation)               │
//! │                                                                         │
//! │  There is no terminal state: items cycle indefinitely.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why an Enum Instead of a Bool?
//! Older circulation systems carry `available: bool` PLUS a separately-held
//! ledger entry naming the holder - two sources of truth that can drift.
//! [`ItemState`] folds the holder into the state itself, so the flag and the
//! holder can never disagree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Item State
// =============================================================================

/// The loan state of a circulating item.
///
/// This is the single source of truth for loanability; no other field may
/// contradict it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ItemState {
    /// On the shelf, free to borrow.
    Available,
    /// Checked out. The holder is recorded here, not on a side channel.
    OnLoan { member_id: String },
}

impl Default for ItemState {
    fn default() -> Self {
        ItemState::Available
    }
}

// =============================================================================
// Item Kind
// =============================================================================

/// The closed set of item kinds the catalog circulates.
///
/// ## Why a Closed Enum?
/// One tag per kind keeps `match` exhaustive: adding a kind forces every
/// consumer (describe, summaries, renderers) to handle it at compile time,
/// where an open class hierarchy would fail at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ItemKind {
    /// A book with a single credited author.
    Book { author: String },
    /// A periodical issue (e.g., "2026-05" or "May 2026").
    Magazine { issue_date: String },
    /// Physical media: DVD, CD, audiobook, etc.
    Media {
        media_type: String,
        duration_minutes: u32,
    },
    /// A technical or annual report.
    Report { author: String, year: i32 },
}

impl ItemKind {
    /// Short label for summaries ("Book", "Magazine", ...).
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Book { .. } => "Book",
            ItemKind::Magazine { .. } => "Magazine",
            ItemKind::Media { .. } => "Media",
            ItemKind::Report { .. } => "Report",
        }
    }
}

// =============================================================================
// Item Details
// =============================================================================

/// Kind-specific structured description of an item.
///
/// This is a *view*, not text: rendering it to a human-readable line (or
/// JSON, or a table row) is the presentation layer's job. The core only
/// guarantees the fields are consistent with the item at the time of the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ItemDetails {
    Book {
        id: String,
        title: String,
        author: String,
    },
    Magazine {
        id: String,
        title: String,
        issue_date: String,
    },
    Media {
        id: String,
        title: String,
        media_type: String,
        duration_minutes: u32,
    },
    Report {
        id: String,
        title: String,
        author: String,
        year: i32,
    },
}

// =============================================================================
// Circulating Item
// =============================================================================

/// A catalog entry that can be checked out and returned.
///
/// ## Lifecycle
/// Created once at catalog-build time, mutated only by the
/// `check_out`/`check_in` transitions, never deleted while referenced by an
/// open loan (the registry rejects duplicate ids rather than overwriting for
/// exactly this reason).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CirculatingItem {
    /// Unique identifier - business id, immutable after creation.
    pub id: String,

    /// Display title, immutable after creation.
    pub title: String,

    /// Kind-specific detail set.
    pub kind: ItemKind,

    /// Loan state. Mutated only by `check_out`/`check_in`.
    pub state: ItemState,

    /// When the item entered the catalog.
    pub added_at: DateTime<Utc>,
}

impl CirculatingItem {
    /// Creates a new, available item.
    ///
    /// Id and title validation happens at registry insertion
    /// ([`crate::Registry::add_item`]), not here, so collaborators can build
    /// items freely before deciding where they go.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: ItemKind) -> Self {
        CirculatingItem {
            id: id.into(),
            title: title.into(),
            kind,
            state: ItemState::Available,
            added_at: Utc::now(),
        }
    }

    /// Attempts the Available → OnLoan transition.
    ///
    /// ## Behavior
    /// - Already on loan: `Err(ItemUnavailable)`, no mutation. A double
    ///   borrow is an expected client error, not corruption.
    /// - Available: records the holder and returns `Ok(())`. No side effect
    ///   beyond the state change.
    pub fn check_out(&mut self, member_id: &str) -> CoreResult<()> {
        match self.state {
            ItemState::OnLoan { .. } => Err(CoreError::ItemUnavailable {
                item_id: self.id.clone(),
            }),
            ItemState::Available => {
                self.state = ItemState::OnLoan {
                    member_id: member_id.to_string(),
                };
                Ok(())
            }
        }
    }

    /// Attempts the OnLoan → Available transition.
    ///
    /// ## Behavior
    /// - Already available: `Err(NotBorrowed)`, no mutation.
    /// - On loan: clears the state and returns the previous holder's id.
    ///
    /// Who may return the item is not checked here: holder routing is
    /// enforced one level up, by the ledger lookup in
    /// [`crate::Member::close_loan`].
    pub fn check_in(&mut self) -> CoreResult<String> {
        match std::mem::take(&mut self.state) {
            ItemState::Available => Err(CoreError::NotBorrowed {
                item_id: self.id.clone(),
            }),
            ItemState::OnLoan { member_id } => Ok(member_id),
        }
    }

    /// Whether the item can currently be borrowed. Pure query.
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self.state, ItemState::Available)
    }

    /// The current holder's member id, if any. Pure query.
    pub fn holder(&self) -> Option<&str> {
        match &self.state {
            ItemState::Available => None,
            ItemState::OnLoan { member_id } => Some(member_id),
        }
    }

    /// Produces the kind-specific detail view. Pure query.
    ///
    /// A single match on the kind tag - the whole "virtual describe" surface
    /// of a class hierarchy, kept exhaustively checkable.
    pub fn describe(&self) -> ItemDetails {
        match &self.kind {
            ItemKind::Book { author } => ItemDetails::Book {
                id: self.id.clone(),
                title: self.title.clone(),
                author: author.clone(),
            },
            ItemKind::Magazine { issue_date } => ItemDetails::Magazine {
                id: self.id.clone(),
                title: self.title.clone(),
                issue_date: issue_date.clone(),
            },
            ItemKind::Media {
                media_type,
                duration_minutes,
            } => ItemDetails::Media {
                id: self.id.clone(),
                title: self.title.clone(),
                media_type: media_type.clone(),
                duration_minutes: *duration_minutes,
            },
            ItemKind::Report { author, year } => ItemDetails::Report {
                id: self.id.clone(),
                title: self.title.clone(),
                author: author.clone(),
                year: *year,
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
