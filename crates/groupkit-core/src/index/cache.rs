//! Shared cache of built package indexes, keyed by filter.
//!
//! One mutex guards the whole map, and it is held across index construction:
//! concurrent misses serialize, but a key is never built twice in a row.
//! Only lookup and construction are locked; callers use the returned
//! `Arc` without holding anything.

use super::{FilterKey, IndexBuilder};
use crate::error::{GroupkitError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

struct CacheSlot<I> {
    index: Option<Arc<I>>,
    valid: bool,
}

/// Cache of package indexes in front of an [`IndexBuilder`].
pub struct IndexCache<B: IndexBuilder> {
    builder: B,
    slots: Mutex<HashMap<FilterKey, CacheSlot<B::Index>>>,
    builds: AtomicUsize,
    enabled: bool,
}

impl<B: IndexBuilder> IndexCache<B> {
    pub fn new(builder: B) -> Self {
        Self {
            builder,
            slots: Mutex::new(HashMap::new()),
            builds: AtomicUsize::new(0),
            enabled: true,
        }
    }

    /// A cache that never stores anything; every request builds.
    pub fn disabled(builder: B) -> Self {
        Self {
            enabled: false,
            ..Self::new(builder)
        }
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Return the cached index for `key`, building it on a miss.
    ///
    /// A failed build leaves the cache untouched.
    pub fn get_or_build_index(&self, key: &FilterKey) -> Result<Arc<B::Index>> {
        if !self.enabled {
            return self.build(key).map(Arc::new);
        }

        let mut slots = self.lock()?;
        if let Some(CacheSlot {
            index: Some(index),
            valid: true,
        }) = slots.get(key)
        {
            debug!("Using cached package index for {}", key);
            return Ok(Arc::clone(index));
        }

        debug!("Building package index for {}", key);
        let index = Arc::new(self.build(key)?);
        slots.insert(
            *key,
            CacheSlot {
                index: Some(Arc::clone(&index)),
                valid: true,
            },
        );
        Ok(index)
    }

    /// Mark every entry invalid and drop its index, keeping the keys.
    ///
    /// Called when repository state has changed underneath the cache.
    pub fn mark_stale(&self) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for slot in slots.values_mut() {
            slot.valid = false;
            slot.index = None;
        }
        debug!("Marked {} cached package indexes stale", slots.len());
    }

    /// Remove every entry.
    pub fn invalidate_all(&self) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.clear();
        debug!("Cleared package index cache");
    }

    /// Whether `key` currently has a valid index.
    pub fn is_cached(&self, key: &FilterKey) -> bool {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).is_some_and(|slot| slot.valid)
    }

    /// Number of entries holding a valid index.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.valid).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times the builder has been invoked.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    fn build(&self, key: &FilterKey) -> Result<B::Index> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        self.builder
            .build_package_index(key)
            .map_err(|e| match e {
                GroupkitError::IndexBuildFailed { .. } => e,
                other => GroupkitError::IndexBuildFailed {
                    filter: key.to_string(),
                    message: other.to_string(),
                },
            })
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<FilterKey, CacheSlot<B::Index>>>> {
        self.slots.lock().map_err(|_| GroupkitError::LockPoisoned {
            what: "package index cache".to_string(),
        })
    }
}
