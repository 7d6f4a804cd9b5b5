//! In-process plan store and cache, used for ephemeral sessions and tests

use super::{LocalCache, PlanStore, StoreError};
use crate::core::identity::UserId;
use crate::core::models::Course;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
}

/// Plan store held in memory
///
/// Reads and writes can be switched to fail, which stands in for an
/// unreachable remote backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    plans: Mutex<HashMap<UserId, Vec<Course>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent loads fail (or succeed again)
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Courses currently saved for `user`
    #[must_use]
    pub fn saved(&self, user: &UserId) -> Option<Vec<Course>> {
        self.plans
            .lock()
            .ok()
            .and_then(|plans| plans.get(user).cloned())
    }
}

impl PlanStore for MemoryStore {
    fn load_plan(&self, user: &UserId) -> Result<Option<Vec<Course>>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(lock(&self.plans)?.get(user).cloned())
    }

    fn save_plan(&self, user: &UserId, courses: &[Course]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        lock(&self.plans)?.insert(user.clone(), courses.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Local cache held in memory
#[derive(Debug, Default)]
pub struct MemoryCache {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    /// Empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalCache for MemoryCache {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.slots)?.get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        lock(&self.slots)?.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        lock(&self.slots)?.remove(key);
        Ok(())
    }
}
