//! In-process bookmark store.
//!
//! Reference implementation of [`BookmarkStore`](super::BookmarkStore)
//! backed by a `Vec` behind an async lock, with per-owner broadcast
//! channels standing in for the backend's realtime feed. The tests run
//! against this store; it also documents the contract a real backend
//! adapter has to meet.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::StoreError;

use super::{BookmarkStore, ChangeEvent, ChangeKind};

/// Capacity of each per-owner change channel.
const CHANNEL_CAPACITY: usize = 64;

struct StoredRow {
    // Tie-breaker for rows created within the same timestamp tick.
    seq: u64,
    bookmark: Bookmark,
}

/// In-memory bookmark store with a broadcast-based change feed.
pub struct MemoryStore {
    rows: RwLock<Vec<StoredRow>>,
    channels: Mutex<HashMap<String, broadcast::Sender<ChangeEvent>>>,
    next_seq: AtomicU64,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            channels: Mutex::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent store call fail with a backend error.
    /// Used to simulate outages.
    pub fn fail_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("store unavailable".to_string()));
        }
        Ok(())
    }

    fn sender_for(&self, user_id: &str) -> broadcast::Sender<ChangeEvent> {
        let mut channels = self
            .channels
            .lock()
            .expect("change channel registry lock poisoned");
        channels
            .entry(user_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }

    fn publish(&self, kind: ChangeKind, row: Bookmark) {
        let channels = self
            .channels
            .lock()
            .expect("change channel registry lock poisoned");
        if let Some(tx) = channels.get(&row.user_id) {
            // Nobody listening is fine.
            let _ = tx.send(ChangeEvent { kind, row });
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        self.check_available()?;

        let rows = self.rows.read().await;
        let mut owned: Vec<&StoredRow> = rows.iter().filter(|r| r.bookmark.user_id == user_id).collect();
        // Newest first; seq breaks ties between rows created in the same tick.
        owned.sort_by(|a, b| {
            b.bookmark
                .created_at
                .cmp(&a.bookmark.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(owned.into_iter().map(|r| r.bookmark.clone()).collect())
    }

    async fn insert(&self, new: NewBookmark) -> Result<Bookmark, StoreError> {
        self.check_available()?;

        let bookmark = Bookmark {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            url: new.url,
            created_at: Utc::now(),
            user_id: new.user_id,
        };

        {
            let mut rows = self.rows.write().await;
            rows.push(StoredRow {
                seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
                bookmark: bookmark.clone(),
            });
        }

        self.publish(ChangeKind::Insert, bookmark.clone());
        Ok(bookmark)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check_available()?;

        let removed = {
            let mut rows = self.rows.write().await;
            match rows.iter().position(|r| r.bookmark.id == id) {
                Some(idx) => Some(rows.remove(idx).bookmark),
                None => None,
            }
        };

        // Deleting an absent id is a no-op, and publishes nothing.
        if let Some(bookmark) = removed {
            self.publish(ChangeKind::Delete, bookmark);
        }
        Ok(())
    }

    fn subscribe(&self, user_id: &str) -> broadcast::Receiver<ChangeEvent> {
        self.sender_for(user_id).subscribe()
    }
}
