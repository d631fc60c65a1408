//! Monotonic id allocation
//!
//! Ids come from an `AtomicU64` counter. The counter only moves forward:
//! deleting a record retires its id for good, it is never handed out again.

use keyguard_core::RecordId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe, monotonically increasing id counter
///
/// A store owns one by default. Wrap it in an `Arc` and pass it to several
/// stores to make their ids unique across all of them.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Counter whose first id is 0
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Counter whose first id is `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Hand out the next id
    pub fn allocate(&self) -> RecordId {
        RecordId::new(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// The id the next call to `allocate` will return
    pub fn peek(&self) -> RecordId {
        RecordId::new(self.next.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_allocates_sequentially_from_zero() {
        let ids = IdAllocator::new();
        assert_eq!(ids.allocate(), RecordId::new(0));
        assert_eq!(ids.allocate(), RecordId::new(1));
        assert_eq!(ids.peek(), RecordId::new(2));
    }

    #[test]
    fn test_starting_at() {
        let ids = IdAllocator::starting_at(2);
        assert_eq!(ids.allocate(), RecordId::new(2));
    }

    #[test]
    fn test_concurrent_allocation_is_unique() {
        let ids = Arc::new(IdAllocator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..500).map(|_| ids.allocate()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 4000);
    }
}
