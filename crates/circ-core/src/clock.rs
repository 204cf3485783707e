//! # Clock Module
//!
//! Injectable time source for the registry.
//!
//! ## Why Inject Time?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Time Injection                                       │
//! │                                                                         │
//! │  Production:  Registry ──► SystemClock ──► Utc::now()                   │
//! │                                                                         │
//! │  Tests:       Registry ──► FixedClock ──► 2026-01-15T09:00:00Z          │
//! │                                                                         │
//! │  Due-date arithmetic (checked_out_at + N days) becomes exactly          │
//! │  assertable: no sleeping, no "roughly now" comparisons.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The clock is the ONLY non-deterministic input to circ-core; with a
//! `FixedClock` every operation is a pure function of its arguments.

use chrono::{DateTime, Utc};

/// A source of the current instant.
///
/// `Send + Sync` so a boxed clock can live inside a [`crate::SharedRegistry`]
/// shared across threads.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

// =============================================================================
// System Clock
// =============================================================================

/// The real wall clock. Default for [`crate::Registry::new`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// =============================================================================
// Fixed Clock
// =============================================================================

/// A clock frozen at a configured instant.
///
/// ## Usage
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use circ_core::clock::{Clock, FixedClock};
///
/// let instant = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
/// let clock = FixedClock::new(instant);
/// assert_eq!(clock.now(), instant);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        FixedClock { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
