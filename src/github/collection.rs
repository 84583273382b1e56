//! Identity-deduplicating work item container

use std::collections::HashSet;
use std::sync::Arc;

use super::item::WorkItem;

/// Anything that can be counted per repository
pub trait Tracked {
    fn repository(&self) -> &str;
}

impl Tracked for WorkItem {
    fn repository(&self) -> &str {
        WorkItem::repository(self)
    }
}

/// Set of shared items, deduplicated by allocation identity
///
/// Adding the same `Arc` twice is a no-op. Two separately allocated items
/// with identical fields are distinct members.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<Arc<T>>,
    members: HashSet<usize>,
}

impl<T: Tracked> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// Insert `item` unless this exact allocation is already present
    pub fn add(&mut self, item: Arc<T>) {
        if self.members.insert(identity(&item)) {
            self.items.push(item);
        }
    }

    /// Wrap and insert a freshly built item
    pub fn add_item(&mut self, item: T) -> Arc<T> {
        let shared = Arc::new(item);
        self.add(Arc::clone(&shared));
        shared
    }

    pub fn contains(&self, item: &Arc<T>) -> bool {
        self.members.contains(&identity(item))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|item| item.as_ref())
    }
}

impl<T: Tracked> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tracked> FromIterator<Arc<T>> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = Arc<T>>>(iter: I) -> Self {
        let mut collection = Self::new();
        for item in iter {
            collection.add(item);
        }
        collection
    }
}

impl<T: Tracked> Extend<Arc<T>> for Collection<T> {
    fn extend<I: IntoIterator<Item = Arc<T>>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

// Members are kept alive by `items`, so an address cannot be reused while
// it is recorded here.
fn identity<T>(item: &Arc<T>) -> usize {
    Arc::as_ptr(item) as usize
}
