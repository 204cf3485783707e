//! # Shared Registry State
//!
//! Thread-safe wrapper for callers that use the registry concurrently.
//!
//! ## Thread Safety
//! The registry is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple callers may read/mutate the registry
//! 2. The `{item state, ledger contents}` pair for a request MUST be updated
//!    as one atomic unit - the lock spans the whole operation
//! 3. Concurrent borrow attempts on the same item therefore serialize:
//!    exactly one succeeds, the rest observe `ItemUnavailable`
//!
//! ## Why Not RwLock?
//! Registry operations are quick, and the interesting ones mutate state.
//! A RwLock would add complexity with minimal benefit.
//!
//! Single-threaded callers can use [`crate::Registry`] directly and skip the
//! lock entirely.

use std::sync::{Arc, Mutex};

use crate::registry::Registry;

/// Shared, lock-guarded registry handle.
///
/// ## Usage
/// ```rust
/// use circ_core::{CirculatingItem, ItemKind, Member, Registry, SharedRegistry};
///
/// let mut registry = Registry::new();
/// registry.add_item(CirculatingItem::new(
///     "B001",
///     "Dune",
///     ItemKind::Book { author: "Frank Herbert".to_string() },
/// )).unwrap();
/// registry.add_member(Member::new("MEM001", "Ada Lovelace")).unwrap();
///
/// let shared = SharedRegistry::new(registry);
/// let loan = shared.with_registry_mut(|r| r.borrow("MEM001", "B001")).unwrap();
/// assert_eq!(loan.item_id, "B001");
/// ```
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    registry: Arc<Mutex<Registry>>,
}

impl SharedRegistry {
    /// Wraps a registry for shared use.
    pub fn new(registry: Registry) -> Self {
        SharedRegistry {
            registry: Arc::new(Mutex::new(registry)),
        }
    }

    /// Executes a function with read access to the registry.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let summary = shared.with_registry(|r| r.summary());
    /// ```
    pub fn with_registry<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Registry) -> R,
    {
        let registry = self.registry.lock().expect("Registry mutex poisoned");
        f(&registry)
    }

    /// Executes a function with write access to the registry.
    ///
    /// The closure runs under the lock, so every multi-step mutation
    /// (resolve → item transition → ledger update) is observed atomically.
    pub fn with_registry_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Registry) -> R,
    {
        let mut registry = self.registry.lock().expect("Registry mutex poisoned");
        f(&mut registry)
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        SharedRegistry::new(Registry::new())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::item::{CirculatingItem, ItemKind};
    use crate::ledger::Member;

    fn seeded_shared() -> SharedRegistry {
        let mut registry = Registry::new();
        registry
            .add_item(CirculatingItem::new(
                "B001",
                "Dune",
                ItemKind::Book {
                    author: "Frank Herbert".to_string(),
                },
            ))
            .unwrap();
        for i in 1..=8 {
            registry
                .add_member(Member::new(format!("MEM{:03}", i), format!("Member {}", i)))
                .unwrap();
        }
        SharedRegistry::new(registry)
    }

    #[test]
    fn test_shared_borrow_and_summary() {
        let shared = seeded_shared();

        shared
            .with_registry_mut(|r| r.borrow("MEM001", "B001"))
            .unwrap();

        let summary = shared.with_registry(|r| r.summary());
        assert!(!summary.items[0].available);
        assert_eq!(summary.items[0].held_by.as_deref(), Some("MEM001"));
    }

    #[test]
    fn test_concurrent_borrowers_serialize_to_one_winner() {
        let shared = seeded_shared();

        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    let member_id = format!("MEM{:03}", i);
                    shared.with_registry_mut(|r| r.borrow(&member_id, "B001"))
                })
            })
            .collect();

        let mut successes = 0;
        let mut unavailable = 0;
        for handle in handles {
            match handle.join().unwrap() {
                Ok(_) => successes += 1,
                Err(CoreError::ItemUnavailable { .. }) => unavailable += 1,
                Err(other) => panic!("unexpected outcome: {:?}", other),
            }
        }

        // Exactly one winner, everyone else saw a clean rejection
        assert_eq!(successes, 1);
        assert_eq!(unavailable, 7);

        // The winner's ledger and the item state agree
        let holder = shared.with_registry(|r| {
            r.find_item("B001").unwrap().holder().map(str::to_string)
        });
        let holder = holder.expect("item must be on loan");
        assert!(shared.with_registry(|r| r.find_member(&holder).unwrap().holds("B001")));
    }
}
