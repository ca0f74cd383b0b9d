//! Time-expiring store for formatted schedules.
//!
//! Entries are keyed by a SHA-256 fingerprint of (user, origin, destination).
//! Expired entries are swept on every `put`; `get` checks age on its own, so an
//! entry past its TTL is never returned even if no sweep has run yet.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Deterministic cache key for one (user, origin, destination) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn new(user: &str, origin: &str, destination: &str) -> Self {
        let mut hasher = Sha256::new();
        // Unit separators keep ("ab", "c") and ("a", "bc") apart.
        for part in [user, origin, destination] {
            hasher.update(part.as_bytes());
            hasher.update([0x1f]);
        }
        Self(hasher.finalize().into())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Vec<String>,
    inserted_at: Instant,
}

/// Shared schedule cache. Cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct ScheduleCache {
    ttl: Duration,
    entries: Mutex<HashMap<Fingerprint, CacheEntry>>,
}

impl ScheduleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, user: &str, origin: &str, destination: &str) -> Option<Vec<String>> {
        let key = Fingerprint::new(user, origin, destination);
        let entries = self.lock();
        entries
            .get(&key)
            .filter(|entry| !self.is_expired(entry, Instant::now()))
            .map(|entry| entry.payload.clone())
    }

    /// Stores `payload`, replacing any previous entry, then drops expired ones.
    pub fn put(&self, user: &str, origin: &str, destination: &str, payload: Vec<String>) {
        let key = Fingerprint::new(user, origin, destination);
        let now = Instant::now();
        let mut entries = self.lock();
        entries.insert(
            key,
            CacheEntry {
                payload,
                inserted_at: now,
            },
        );
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        let purged = before - entries.len();
        if purged > 0 {
            tracing::debug!("Schedule cache purged {} expired entries", purged);
        }
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) > self.ttl
    }

    // A panic while holding the lock cannot leave a half-written entry behind,
    // so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<Fingerprint, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
