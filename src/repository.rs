//! Item Repository
//!
//! In-memory item storage that produces the content the HTTP layer caches.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::models::{Item, ItemRequest};

#[derive(Debug, Default)]
struct Inner {
    items: BTreeMap<u64, Item>,
    next_id: u64,
}

/// Thread-safe item store with sequential ids starting at 1.
#[derive(Debug, Default)]
pub struct ItemRepository {
    inner: RwLock<Inner>,
}

impl ItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items ordered by id.
    pub async fn list(&self) -> Vec<Item> {
        self.inner.read().await.items.values().cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Option<Item> {
        self.inner.read().await.items.get(&id).cloned()
    }

    pub async fn create(&self, req: ItemRequest) -> Item {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let item = Item {
            id: inner.next_id,
            title: req.title,
            body: req.body,
        };
        inner.items.insert(item.id, item.clone());
        item
    }

    /// Replaces an existing item; returns `None` if `id` is unknown.
    pub async fn update(&self, id: u64, req: ItemRequest) -> Option<Item> {
        let mut inner = self.inner.write().await;
        let item = inner.items.get_mut(&id)?;
        item.title = req.title;
        item.body = req.body;
        Some(item.clone())
    }

    /// Returns whether an item was removed.
    pub async fn delete(&self, id: u64) -> bool {
        self.inner.write().await.items.remove(&id).is_some()
    }
}
