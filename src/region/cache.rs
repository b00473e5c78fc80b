//! Compute-once cache keyed by cell coordinate.

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

/// Concurrent map from cell coordinate to a lazily computed value.
///
/// The first caller for a key runs the initializer; concurrent callers for the
/// same key block until it finishes and then share the result. Different keys
/// never wait on each other.
///
/// An initializer must not wait on rayon work. A worker blocked in a rayon
/// join runs queued jobs, and one of those may ask for the key it is holding.
pub struct CellCache<T> {
    slots: DashMap<(i32, i32), Arc<OnceLock<Arc<T>>>>,
}

impl<T> CellCache<T> {
    pub fn new() -> Self {
        Self { slots: DashMap::new() }
    }

    /// Returns the value for `key`, computing it with `init` if absent.
    pub fn get_or_init(&self, key: (i32, i32), init: impl FnOnce() -> T) -> Arc<T> {
        // Shard lock is released before the initializer runs.
        let slot = Arc::clone(self.slots.entry(key).or_default().value());
        Arc::clone(slot.get_or_init(|| Arc::new(init())))
    }

    /// Returns the value for `key` only if it has already been computed.
    pub fn get(&self, key: (i32, i32)) -> Option<Arc<T>> {
        self.slots.get(&key).and_then(|slot| slot.value().get().cloned())
    }

    /// Number of computed entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.value().get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for CellCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn computes_each_key_once() {
        let cache = CellCache::new();
        let calls = AtomicUsize::new(0);
        let a = cache.get_or_init((1, 2), || {
            calls.fetch_add(1, Ordering::SeqCst);
            10
        });
        let b = cache.get_or_init((1, 2), || {
            calls.fetch_add(1, Ordering::SeqCst);
            20
        });
        assert_eq!(*a, 10);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_callers_share_one_computation() {
        let cache = CellCache::new();
        let calls = AtomicUsize::new(0);

        let results: Vec<Arc<u64>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        cache.get_or_init((0, 0), || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(std::time::Duration::from_millis(20));
                            7
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("worker panicked")).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1, "initializer ran more than once");
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
    }

    #[test]
    fn get_does_not_compute() {
        let cache: CellCache<i32> = CellCache::new();
        assert!(cache.get((0, 0)).is_none());
        cache.get_or_init((0, 0), || 3);
        assert_eq!(cache.get((0, 0)).as_deref(), Some(&3));
        assert!(cache.get((1, 0)).is_none());
    }
}
