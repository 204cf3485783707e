//! # Registry
//!
//! The top-level owner of the catalog and the roster, and the routing point
//! for borrow/return requests.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Borrow/Return Routing                                │
//! │                                                                         │
//! │  borrow(member_id, item_id)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve member ── miss ──► Err(MemberNotFound)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve item ──── miss ──► Err(ItemNotFound)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  member.open_loan(item) ──► item.check_out + ledger append              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(LoanRecord)                                                         │
//! │                                                                         │
//! │  NOTE: member resolves BEFORE item. A request with two bad ids          │
//! │        reports the member; callers can rely on that order.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry is the only component that resolves ids to objects. Items
//! and members never hold references to each other - loans reference items
//! by id, and the holder lives inside the item's own state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, CoreResult};
use crate::item::CirculatingItem;
use crate::ledger::{LoanRecord, Member};
use crate::validation::{
    validate_borrow_days, validate_entity_id, validate_member_name, validate_title,
};
use crate::DEFAULT_LOAN_DAYS;

// =============================================================================
// Registry
// =============================================================================

/// Owner of the full catalog and member roster.
///
/// ## Design Notes
/// - `BTreeMap` keys give deterministic iteration, so two `summary()` calls
///   over the same state produce identical snapshots
/// - The clock is injected; production code uses [`SystemClock`], tests use
///   [`crate::FixedClock`] for exact due-date assertions
pub struct Registry {
    items: BTreeMap<String, CirculatingItem>,
    members: BTreeMap<String, Member>,
    clock: Box<dyn Clock>,
}

impl Registry {
    /// Creates an empty registry on the system clock.
    pub fn new() -> Self {
        Registry::with_clock(Box::new(SystemClock))
    }

    /// Creates an empty registry with an injected time source.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Registry {
            items: BTreeMap::new(),
            members: BTreeMap::new(),
            clock,
        }
    }

    // -------------------------------------------------------------------------
    // Catalog / roster construction
    // -------------------------------------------------------------------------

    /// Adds an item to the catalog.
    ///
    /// ## Duplicate Policy
    /// A duplicate id is rejected with `Err(DuplicateItemId)`; the existing
    /// entry is never overwritten. Overwriting could orphan an open loan that
    /// references the entry.
    pub fn add_item(&mut self, item: CirculatingItem) -> CoreResult<()> {
        validate_entity_id("item id", &item.id)?;
        validate_title(&item.title)?;

        if self.items.contains_key(&item.id) {
            return Err(CoreError::DuplicateItemId(item.id));
        }

        debug!(item_id = %item.id, kind = item.kind.label(), "Adding item to catalog");
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Adds a member to the roster. Same duplicate policy as [`add_item`].
    ///
    /// [`add_item`]: Registry::add_item
    pub fn add_member(&mut self, member: Member) -> CoreResult<()> {
        validate_entity_id("member id", &member.id)?;
        validate_member_name(&member.name)?;

        if self.members.contains_key(&member.id) {
            return Err(CoreError::DuplicateMemberId(member.id));
        }

        debug!(member_id = %member.id, "Adding member to roster");
        self.members.insert(member.id.clone(), member);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Looks up an item by id. Pure query.
    pub fn find_item(&self, item_id: &str) -> Option<&CirculatingItem> {
        self.items.get(item_id)
    }

    /// Looks up a member by id. Pure query.
    pub fn find_member(&self, member_id: &str) -> Option<&Member> {
        self.members.get(member_id)
    }

    /// A member's active loans, oldest first.
    pub fn member_loans(&self, member_id: &str) -> CoreResult<&[LoanRecord]> {
        self.members
            .get(member_id)
            .map(Member::active_loans)
            .ok_or_else(|| CoreError::MemberNotFound(member_id.to_string()))
    }

    // -------------------------------------------------------------------------
    // Circulation
    // -------------------------------------------------------------------------

    /// Borrows an item for the default loan period ([`DEFAULT_LOAN_DAYS`]).
    pub fn borrow(&mut self, member_id: &str, item_id: &str) -> CoreResult<LoanRecord> {
        self.borrow_for(member_id, item_id, DEFAULT_LOAN_DAYS)
    }

    /// Borrows an item for `borrow_days` days.
    ///
    /// Resolves the member first, then the item, then delegates to the
    /// member's ledger. The new loan record is the success payload.
    pub fn borrow_for(
        &mut self,
        member_id: &str,
        item_id: &str,
        borrow_days: i64,
    ) -> CoreResult<LoanRecord> {
        validate_borrow_days(borrow_days)?;

        let member = match self.members.get_mut(member_id) {
            Some(member) => member,
            None => return Err(CoreError::MemberNotFound(member_id.to_string())),
        };
        let item = match self.items.get_mut(item_id) {
            Some(item) => item,
            None => return Err(CoreError::ItemNotFound(item_id.to_string())),
        };

        let now = self.clock.now();
        let record = member.open_loan(item, borrow_days, now)?;

        debug!(
            member_id = %member_id,
            item_id = %item_id,
            due_at = %record.due_at,
            "Loan opened"
        );
        Ok(record)
    }

    /// Returns an item previously borrowed by `member_id`.
    ///
    /// Same resolution order as [`borrow_for`]; the closed loan record is the
    /// success payload.
    ///
    /// [`borrow_for`]: Registry::borrow_for
    pub fn return_item(&mut self, member_id: &str, item_id: &str) -> CoreResult<LoanRecord> {
        let member = match self.members.get_mut(member_id) {
            Some(member) => member,
            None => return Err(CoreError::MemberNotFound(member_id.to_string())),
        };
        let item = match self.items.get_mut(item_id) {
            Some(item) => item,
            None => return Err(CoreError::ItemNotFound(item_id.to_string())),
        };

        let record = member.close_loan(item)?;

        debug!(member_id = %member_id, item_id = %item_id, "Loan closed");
        Ok(record)
    }

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------

    /// A consistent point-in-time snapshot of the whole registry.
    ///
    /// Rendering this to text, a table, or JSON is the presentation layer's
    /// job; the core only guarantees the data is consistent and
    /// deterministically ordered (by id).
    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary {
            generated_at: self.clock.now(),
            items: self
                .items
                .values()
                .map(|item| ItemSummaryEntry {
                    id: item.id.clone(),
                    title: item.title.clone(),
                    kind: item.kind.label().to_string(),
                    available: item.is_available(),
                    held_by: item.holder().map(str::to_string),
                })
                .collect(),
            members: self
                .members
                .values()
                .map(|member| MemberSummaryEntry {
                    id: member.id.clone(),
                    name: member.name.clone(),
                    items_on_loan: member
                        .active_loans()
                        .iter()
                        .map(|r| r.item_id.clone())
                        .collect(),
                })
                .collect(),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The boxed clock has no useful Debug output
        f.debug_struct("Registry")
            .field("items", &self.items)
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Summary Types
// =============================================================================

/// Point-in-time snapshot of catalog and roster state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySummary {
    /// When the snapshot was taken (injected clock).
    pub generated_at: DateTime<Utc>,
    /// Every catalog entry, ordered by id.
    pub items: Vec<ItemSummaryEntry>,
    /// Every roster entry, ordered by id.
    pub members: Vec<MemberSummaryEntry>,
}

/// One catalog entry in a [`RegistrySummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummaryEntry {
    pub id: String,
    pub title: String,
    /// Kind label ("Book", "Magazine", "Media", "Report").
    pub kind: String,
    pub available: bool,
    /// Holder member id when not available.
    pub held_by: Option<String>,
}

/// One roster entry in a [`RegistrySummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummaryEntry {
    pub id: String,
    pub name: String,
    /// Ids of items currently on loan to this member, oldest first.
    pub items_on_loan: Vec<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::item::ItemKind;
    use chrono::{Duration, TimeZone};

    /// Opt-in log output: RUST_LOG=debug cargo test -- --nocapture
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
    }

    fn test_registry() -> Registry {
        Registry::with_clock(Box::new(FixedClock::new(fixed_now())))
    }

    fn book(id: &str) -> CirculatingItem {
        CirculatingItem::new(
            id,
            format!("Title {}", id),
            ItemKind::Book {
                author: "Some Author".to_string(),
            },
        )
    }

    fn seeded_registry() -> Registry {
        let mut registry = test_registry();
        registry.add_item(book("B001")).unwrap();
        registry
            .add_member(Member::new("MEM001", "Ada Lovelace"))
            .unwrap();
        registry
            .add_member(Member::new("MEM002", "Grace Hopper"))
            .unwrap();
        registry
    }

    #[test]
    fn test_add_and_find() {
        let registry = seeded_registry();

        assert!(registry.find_item("B001").is_some());
        assert!(registry.find_item("B999").is_none());
        assert_eq!(registry.find_member("MEM001").unwrap().name, "Ada Lovelace");
        assert!(registry.find_member("MEM999").is_none());
    }

    #[test]
    fn test_duplicate_item_id_is_rejected_and_original_kept() {
        let mut registry = seeded_registry();
        registry.borrow("MEM001", "B001").unwrap();

        let duplicate = book("B001");
        let err = registry.add_item(duplicate).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateItemId(ref id) if id == "B001"));

        // The original, on-loan entry is untouched
        assert_eq!(registry.find_item("B001").unwrap().holder(), Some("MEM001"));
    }

    #[test]
    fn test_duplicate_member_id_is_rejected() {
        let mut registry = seeded_registry();
        let err = registry
            .add_member(Member::new("MEM001", "Impostor"))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateMemberId(ref id) if id == "MEM001"));
        assert_eq!(registry.find_member("MEM001").unwrap().name, "Ada Lovelace");
    }

    #[test]
    fn test_add_item_validates_id() {
        let mut registry = test_registry();
        let err = registry.add_item(book("")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = registry.add_item(book("has space")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_borrow_resolves_member_before_item() {
        let mut registry = seeded_registry();

        // Both ids unknown: the member is reported
        let err = registry.borrow("MEM999", "B999").unwrap_err();
        assert!(matches!(err, CoreError::MemberNotFound(ref id) if id == "MEM999"));

        // Known member, unknown item
        let err = registry.borrow("MEM001", "B999").unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound(ref id) if id == "B999"));
    }

    #[test]
    fn test_borrow_uses_default_loan_period() {
        let mut registry = seeded_registry();
        let record = registry.borrow("MEM001", "B001").unwrap();
        assert_eq!(
            record.due_at,
            record.checked_out_at + Duration::days(DEFAULT_LOAN_DAYS)
        );
    }

    #[test]
    fn test_due_date_arithmetic_on_fixed_clock() {
        let mut registry = seeded_registry();
        let record = registry.borrow_for("MEM001", "B001", 10).unwrap();

        assert_eq!(record.checked_out_at, fixed_now());
        assert_eq!(record.due_at, fixed_now() + Duration::days(10));
    }

    #[test]
    fn test_borrow_days_out_of_range_is_rejected() {
        let mut registry = seeded_registry();

        let err = registry.borrow_for("MEM001", "B001", 0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = registry.borrow_for("MEM001", "B001", 1000).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        // Nothing was mutated by the rejected requests
        assert!(registry.find_item("B001").unwrap().is_available());
        assert!(registry.member_loans("MEM001").unwrap().is_empty());
    }

    #[test]
    fn test_borrow_return_round_trip() {
        let mut registry = seeded_registry();
        let before = registry.summary();

        let opened = registry.borrow("MEM001", "B001").unwrap();
        assert!(!registry.find_item("B001").unwrap().is_available());

        let closed = registry.return_item("MEM001", "B001").unwrap();
        assert_eq!(closed.id, opened.id);

        // The round trip restores the exact pre-borrow snapshot
        assert_eq!(registry.summary(), before);
    }

    #[test]
    fn test_return_without_loan_changes_nothing() {
        let mut registry = seeded_registry();
        registry.borrow("MEM001", "B001").unwrap();
        let before = registry.summary();

        // MEM002 never borrowed B001
        let err = registry.return_item("MEM002", "B001").unwrap_err();
        assert!(matches!(err, CoreError::NotBorrowed { ref item_id } if item_id == "B001"));

        assert_eq!(registry.summary(), before);
    }

    #[test]
    fn test_second_borrower_is_excluded() {
        let mut registry = seeded_registry();
        registry.borrow("MEM001", "B001").unwrap();

        let err = registry.borrow("MEM002", "B001").unwrap_err();
        assert!(matches!(err, CoreError::ItemUnavailable { ref item_id } if item_id == "B001"));
        assert!(registry.member_loans("MEM002").unwrap().is_empty());
    }

    #[test]
    fn test_availability_mirrors_ledger_contents() {
        let mut registry = seeded_registry();

        // Available <=> no ledger holds a record
        assert!(registry.find_item("B001").unwrap().is_available());
        assert!(!registry.find_member("MEM001").unwrap().holds("B001"));

        registry.borrow("MEM001", "B001").unwrap();
        assert!(!registry.find_item("B001").unwrap().is_available());
        assert!(registry.find_member("MEM001").unwrap().holds("B001"));
        assert!(!registry.find_member("MEM002").unwrap().holds("B001"));

        registry.return_item("MEM001", "B001").unwrap();
        assert!(registry.find_item("B001").unwrap().is_available());
        assert!(!registry.find_member("MEM001").unwrap().holds("B001"));
    }

    #[test]
    fn test_full_circulation_scenario() {
        // Item B001 cycles between MEM001 and MEM002 with custom periods.
        init_tracing();
        let mut registry = seeded_registry();

        let first = registry.borrow_for("MEM001", "B001", 10).unwrap();
        assert_eq!(first.due_at, fixed_now() + Duration::days(10));

        let err = registry.borrow("MEM002", "B001").unwrap_err();
        assert!(matches!(err, CoreError::ItemUnavailable { .. }));

        registry.return_item("MEM001", "B001").unwrap();
        assert!(registry.find_item("B001").unwrap().is_available());

        let second = registry.borrow_for("MEM002", "B001", 5).unwrap();
        assert_eq!(second.due_at, fixed_now() + Duration::days(5));

        let loans = registry.member_loans("MEM002").unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].item_id, "B001");
        assert!(registry.member_loans("MEM001").unwrap().is_empty());
    }

    #[test]
    fn test_summary_snapshot() {
        let mut registry = test_registry();
        registry.add_item(book("B002")).unwrap();
        registry.add_item(book("B001")).unwrap();
        registry
            .add_item(CirculatingItem::new(
                "M001",
                "Planet Earth II",
                ItemKind::Media {
                    media_type: "DVD".to_string(),
                    duration_minutes: 300,
                },
            ))
            .unwrap();
        registry
            .add_member(Member::new("MEM001", "Ada Lovelace"))
            .unwrap();
        registry.borrow("MEM001", "B002").unwrap();

        let summary = registry.summary();
        assert_eq!(summary.generated_at, fixed_now());

        // Ordered by id regardless of insertion order
        let ids: Vec<&str> = summary.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["B001", "B002", "M001"]);

        let b002 = &summary.items[1];
        assert!(!b002.available);
        assert_eq!(b002.held_by.as_deref(), Some("MEM001"));
        assert_eq!(b002.kind, "Book");

        let m001 = &summary.items[2];
        assert!(m001.available);
        assert_eq!(m001.kind, "Media");

        assert_eq!(summary.members.len(), 1);
        assert_eq!(summary.members[0].items_on_loan, vec!["B002".to_string()]);
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let mut registry = seeded_registry();
        registry.borrow("MEM001", "B001").unwrap();

        let json = serde_json::to_value(registry.summary()).unwrap();
        assert_eq!(json["items"][0]["id"], "B001");
        assert_eq!(json["items"][0]["available"], false);
        assert_eq!(json["items"][0]["held_by"], "MEM001");
        assert_eq!(json["members"][0]["items_on_loan"][0], "B001");
    }

    #[test]
    fn test_member_loans_for_unknown_member() {
        let registry = seeded_registry();
        let err = registry.member_loans("MEM999").unwrap_err();
        assert!(matches!(err, CoreError::MemberNotFound(_)));
    }
}
