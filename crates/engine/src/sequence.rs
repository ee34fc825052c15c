//! Tracking-ID sequence allocation.
//!
//! The original front end derived the tracking sequence from the length of
//! a locally cached record list, so two concurrent creators could mint the
//! same ID. Here the sequence lives server-side: one counter per record
//! type, seeded lazily from the store's current record count and bumped
//! under a lock on every create. Two independent engine processes over one
//! store can still collide; the tracking ID is display-only and the store
//! id stays authoritative.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::future::Future;

use tokio::sync::Mutex;

use docket_storage::StoreError;

/// Per-record-type next-sequence counter.
#[derive(Default)]
pub struct SequenceAllocator {
    inner: Mutex<HashMap<String, u32>>,
}

impl SequenceAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next 1-based sequence number for `key`.
    ///
    /// The first allocation for a key awaits `seed` to learn the current
    /// record count; later allocations increment without touching the
    /// store. The lock is held across the seed so two first-allocations
    /// cannot both seed from the same count.
    pub async fn next<Fut>(&self, key: &str, seed: Fut) -> Result<u32, StoreError>
    where
        Fut: Future<Output = Result<usize, StoreError>>,
    {
        let mut inner = self.inner.lock().await;
        match inner.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                let next = entry.get_mut();
                *next += 1;
                Ok(*next)
            }
            Entry::Vacant(entry) => {
                let count = seed.await? as u32;
                Ok(*entry.insert(count + 1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_from_the_store_count_then_increments() {
        let alloc = SequenceAllocator::new();
        let first = alloc.next("vouchers", async { Ok(3) }).await.unwrap();
        assert_eq!(first, 4);

        // Seed is ignored once the counter exists.
        let second = alloc.next("vouchers", async { Ok(999) }).await.unwrap();
        assert_eq!(second, 5);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let alloc = SequenceAllocator::new();
        assert_eq!(alloc.next("vouchers", async { Ok(0) }).await.unwrap(), 1);
        assert_eq!(alloc.next("letters", async { Ok(7) }).await.unwrap(), 8);
        assert_eq!(alloc.next("vouchers", async { Ok(0) }).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn seed_failure_leaves_the_key_unseeded() {
        let alloc = SequenceAllocator::new();
        let err = alloc
            .next("vouchers", async { Err(StoreError::Backend("down".into())) })
            .await;
        assert!(err.is_err());

        // A later successful seed starts fresh.
        assert_eq!(alloc.next("vouchers", async { Ok(2) }).await.unwrap(), 3);
    }
}
