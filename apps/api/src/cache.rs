//! Get-or-create cache for opened external handles.
//!
//! Owned by the composition root (`main`) and handed to whichever collaborator
//! needs it. Each key is populated at most once; later lookups return a clone
//! of the stored handle.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;

pub struct HandleCache<K, V> {
    handles: Mutex<HashMap<K, V>>,
}

impl<K, V> Default for HandleCache<K, V> {
    fn default() -> Self {
        Self {
            handles: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> HandleCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle stored under `key`, opening it with `open` on first use.
    ///
    /// The lock is held across `open`, so two racing callers never open the
    /// same resource twice. `open` must therefore be cheap and non-blocking
    /// (lazy connection pools qualify). A failed `open` stores nothing.
    pub fn get_or_try_insert_with<E, F>(&self, key: &K, open: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let mut handles = self
            .handles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(handle) = handles.get(key) {
            return Ok(handle.clone());
        }

        let handle = open()?;
        handles.insert(key.clone(), handle.clone());
        Ok(handle)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_opens_each_key_once() {
        let cache: HandleCache<String, Arc<String>> = HandleCache::new();
        let opened = AtomicUsize::new(0);

        for _ in 0..3 {
            let handle = cache
                .get_or_try_insert_with(&"profiles".to_string(), || {
                    opened.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(Arc::new("handle".to_string()))
                })
                .unwrap();
            assert_eq!(handle.as_str(), "handle");
        }

        assert_eq!(opened.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys_get_distinct_handles() {
        let cache: HandleCache<&'static str, u32> = HandleCache::new();
        let a = cache.get_or_try_insert_with(&"a", || Ok::<_, ()>(1)).unwrap();
        let b = cache.get_or_try_insert_with(&"b", || Ok::<_, ()>(2)).unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failed_open_is_not_cached() {
        let cache: HandleCache<&'static str, u32> = HandleCache::new();
        let err = cache.get_or_try_insert_with(&"db", || Err("unreachable"));
        assert_eq!(err, Err("unreachable"));
        assert_eq!(cache.len(), 0);

        let ok = cache.get_or_try_insert_with(&"db", || Ok::<_, &str>(7));
        assert_eq!(ok, Ok(7));
    }
}
