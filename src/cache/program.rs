//! Identifier-keyed cache of compiled CEL programs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cel_interpreter::Program;

use super::lru::LruStore;

/// A cached compiled program together with the text it was built from.
///
/// The recorded expression text always matches the program: both are replaced
/// together on insert, never separately.
#[derive(Clone)]
pub struct ProgramEntry {
    /// Expression source the program was compiled from.
    pub expression: String,

    /// The compiled program. Shared by reference for in-flight evaluations.
    pub program: Arc<Program>,
}

/// Cache statistics.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Current number of entries.
    pub size: usize,

    /// Maximum capacity.
    pub capacity: usize,

    /// Number of cache hits.
    pub hits: u64,

    /// Number of cache misses (absent or stale).
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of compiled programs, keyed by caller-chosen identifiers.
pub struct ProgramCache {
    store: LruStore<ProgramEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ProgramCache {
    /// Creates a cache holding at most `capacity` programs.
    pub fn new(capacity: usize) -> Self {
        Self {
            store: LruStore::new(capacity),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Looks up the program cached under `identifier`.
    ///
    /// Returns `None` when the identifier is absent, or when it is present but
    /// was compiled from a different expression text (stale). A stale entry is
    /// left in place; the caller replaces it with `insert` after recompiling.
    pub fn lookup(&self, identifier: &str, expression: &str) -> Option<Arc<Program>> {
        match self.store.get(identifier) {
            Some(entry) if entry.expression == expression => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.program)
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Inserts or replaces the entry for `identifier`, making it most
    /// recently used.
    pub fn insert(&self, identifier: &str, expression: &str, program: Arc<Program>) {
        self.store.put(
            identifier,
            ProgramEntry {
                expression: expression.to_string(),
                program,
            },
        );
    }

    /// Drops all cached programs.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Number of cached programs.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Current statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.store.len(),
            capacity: self.store.capacity(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
