use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Thread-safe set of already-seen identifiers, shared across all
/// concurrently running jobs. `insert` is an atomic test-and-set: it
/// returns true for exactly one caller of a given id.
#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an id as seen. Returns true if this call was the first sighting.
    pub fn insert(&self, id: &str) -> bool {
        let mut seen = self.inner.lock().expect("seen set lock poisoned");
        seen.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        let seen = self.inner.lock().expect("seen set lock poisoned");
        seen.contains(id)
    }

    pub fn len(&self) -> usize {
        let seen = self.inner.lock().expect("seen set lock poisoned");
        seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The two dedup sets every job shares: one for post ids, one for comment
/// ids. Cloning shares the underlying sets.
#[derive(Debug, Clone, Default)]
pub struct SeenState {
    pub posts: SeenSet,
    pub comments: SeenSet,
}
