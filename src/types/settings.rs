use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a successful insert reaches the local view.
///
/// Exactly one strategy is active per deployment; mixing an optimistic
/// local prepend with an incremental patch applied from the push channel
/// would double-insert the same row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Prepend the row returned by the store directly. For deployments
    /// without a live subscription.
    OptimisticInsert,
    /// Leave the view alone; the push notification triggers a full
    /// refetch that picks the new row up.
    RefetchOnPush,
}

/// Tunables for the bookmark synchronizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default = "default_merge_strategy")]
    pub merge_strategy: MergeStrategy,
    /// How long a status message stays visible, in milliseconds.
    #[serde(default = "default_status_ttl_ms")]
    pub status_ttl_ms: u64,
}

fn default_merge_strategy() -> MergeStrategy {
    MergeStrategy::RefetchOnPush
}

fn default_status_ttl_ms() -> u64 {
    3000
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            merge_strategy: default_merge_strategy(),
            status_ttl_ms: default_status_ttl_ms(),
        }
    }
}

impl SyncSettings {
    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }
}
