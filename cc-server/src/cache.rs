use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Process-wide cache with one staleness window for every key.
///
/// Freshness is checked on read only. Stale entries stay in the map until
/// the next `put` for the same key replaces them; nothing runs in the
/// background.
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The stored value and its age, regardless of freshness.
    pub fn lookup(&self, key: &str) -> Option<(V, Duration)> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .map(|entry| (entry.value.clone(), entry.stored_at.elapsed()))
    }

    /// The stored value if it is younger than the TTL; anything older is a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        self.lookup(key)
            .filter(|(_, age)| *age < self.ttl)
            .map(|(value, _)| value)
    }

    pub fn put(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key.into(),
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
