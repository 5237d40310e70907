//! Single-slot cache store
//!
//! A [`Slot`] holds exactly one value behind an `Arc`. Writers build the
//! new value completely and swap the pointer; readers clone the pointer.
//! The lock is held only for the pointer copy, so a reader can never see a
//! half-built entry and never waits on a refresh in progress.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::types::CacheEntry;

/// Store for the price feed
pub type CacheStore = Slot<CacheEntry>;

/// Single-value, replace-whole-entry store
#[derive(Debug)]
pub struct Slot<T> {
    current: RwLock<Arc<T>>,
    writes: AtomicU64,
}

impl<T> Slot<T> {
    /// Create a slot holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
            writes: AtomicU64::new(0),
        }
    }

    /// Latest value
    pub fn read(&self) -> Arc<T> {
        Arc::clone(&self.current.read())
    }

    /// Replace the value. Last writer wins.
    pub fn write(&self, value: T) {
        let next = Arc::new(value);
        *self.current.write() = next;
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of writes since creation
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
