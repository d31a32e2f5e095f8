use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved title+URL record owned by one user.
///
/// `id` and `created_at` are assigned by the store at creation and never
/// change afterwards. There is no edit-in-place: a bookmark is only ever
/// created and deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

/// Fields the client supplies when inserting a bookmark.
///
/// `title` is already trimmed and `url` already normalized by the time a
/// `NewBookmark` reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub user_id: String,
}
