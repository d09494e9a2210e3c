use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

/// Source of monotonic time for cache expiry
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset_millis: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_millis: AtomicU64::new(0),
        }
    }

    pub fn advance(&self, by: Duration) {
        let millis = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.offset_millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_millis(self.offset_millis.load(Ordering::SeqCst))
    }
}

struct Window<K, V> {
    started: Instant,
    entries: HashMap<K, V>,
}

/// Key-value cache that is wiped wholesale once its window has elapsed.
///
/// Expiry is checked lazily on every access, so no background task is needed.
/// Concurrent writers may race to populate the same key; the last write wins.
pub struct TtlCache<K, V> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    window: RwLock<Window<K, V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let started = clock.now();
        Self {
            ttl,
            clock,
            window: RwLock::new(Window {
                started,
                entries: HashMap::new(),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn read(&self) -> RwLockReadGuard<'_, Window<K, V>> {
        self.window.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Window<K, V>> {
        self.window.write().unwrap_or_else(|e| e.into_inner())
    }

    fn expired(&self, window: &Window<K, V>, now: Instant) -> bool {
        now.saturating_duration_since(window.started) >= self.ttl
    }

    /// Write guard over a window that is guaranteed to be current
    fn current(&self) -> RwLockWriteGuard<'_, Window<K, V>> {
        let now = self.clock.now();
        let mut window = self.write();
        if self.expired(&window, now) {
            if !window.entries.is_empty() {
                tracing::debug!(entries = window.entries.len(), "cache window expired");
            }
            window.entries.clear();
            window.started = now;
        }
        window
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        {
            let window = self.read();
            if !self.expired(&window, now) {
                return window.entries.get(key).cloned();
            }
        }

        self.current().entries.get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&self, key: K, value: V) {
        self.current().entries.insert(key, value);
    }

    /// Return the cached value or compute, store and return a fresh one.
    ///
    /// The lock is not held while `f` runs.
    pub fn get_or_insert_with(&self, key: K, f: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }

        let value = f();
        self.insert(key, value.clone());
        value
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.current().entries.remove(key)
    }

    pub fn clear(&self) {
        let mut window = self.write();
        window.entries.clear();
        window.started = self.clock.now();
    }

    /// Live entries in the current window
    pub fn len(&self) -> usize {
        self.current().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache").field("ttl", &self.ttl).finish()
    }
}
