//! Entry Store contract and adapters.
//!
//! The core only depends on the [`MoodStore`] trait; the binary wires in the
//! Postgres adapter, the test suite wires in the in-memory one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::entry::MoodEntry;

mod memory;
mod postgres;

pub use memory::InMemoryMoodStore;
pub use postgres::PgMoodStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Entry fields supplied by the service at creation. The store assigns
/// `id`, `created_at` and `updated_at`.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub user_id: Uuid,
    pub mood: i32,
    pub stress: i32,
    pub anxiety: i32,
    pub notes: Option<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub mood: Option<i32>,
    pub stress: Option<i32>,
    pub anxiety: Option<i32>,
    pub notes: Option<String>,
}

#[async_trait]
pub trait MoodStore: Send + Sync {
    /// Persist a new entry and return the stored record.
    async fn insert(&self, entry: NewEntry) -> Result<MoodEntry, StoreError>;

    /// Entries for one owner, most recent first. `since` is an inclusive
    /// lower bound on `created_at`; `limit = None` returns the whole set.
    async fn find_by_owner(
        &self,
        owner_id: Uuid,
        since: Option<DateTime<Utc>>,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<MoodEntry>, StoreError>;

    async fn count_by_owner(
        &self,
        owner_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<i64, StoreError>;

    /// Apply a patch to an owned entry, refreshing `updated_at`. Returns
    /// `None` when no entry matches both `id` and `owner_id`.
    async fn update_by_id(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: EntryPatch,
    ) -> Result<Option<MoodEntry>, StoreError>;

    /// Remove an owned entry. Returns whether a row was deleted.
    async fn delete_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
