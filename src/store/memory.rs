use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::entry::MoodEntry;
use crate::store::{EntryPatch, MoodStore, NewEntry, StoreError};

/// In-memory MoodStore backing the test suite.
#[derive(Default)]
pub struct InMemoryMoodStore {
    entries: RwLock<Vec<MoodEntry>>,
}

impl InMemoryMoodStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MoodStore for InMemoryMoodStore {
    async fn insert(&self, entry: NewEntry) -> Result<MoodEntry, StoreError> {
        let now = Utc::now();
        let stored = MoodEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            mood: entry.mood,
            stress: entry.stress,
            anxiety: entry.anxiety,
            notes: entry.notes,
            created_at: now,
            updated_at: now,
        };
        self.entries.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_owner(
        &self,
        owner_id: Uuid,
        since: Option<DateTime<Utc>>,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<MoodEntry>, StoreError> {
        let entries = self.entries.read().await;
        // Walk newest insert first so the stable sort breaks created_at ties
        // the same way the database index does.
        let mut matched: Vec<MoodEntry> = entries
            .iter()
            .rev()
            .filter(|e| e.user_id == owner_id)
            .filter(|e| since.map_or(true, |s| e.created_at >= s))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut page: Vec<MoodEntry> = matched.into_iter().skip(offset.max(0) as usize).collect();
        if let Some(limit) = limit {
            page.truncate(limit.max(0) as usize);
        }
        Ok(page)
    }

    async fn count_by_owner(
        &self,
        owner_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<i64, StoreError> {
        let entries = self.entries.read().await;
        let total = entries
            .iter()
            .filter(|e| e.user_id == owner_id)
            .filter(|e| since.map_or(true, |s| e.created_at >= s))
            .count();
        Ok(total as i64)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: EntryPatch,
    ) -> Result<Option<MoodEntry>, StoreError> {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries
            .iter_mut()
            .find(|e| e.id == id && e.user_id == owner_id)
        else {
            return Ok(None);
        };

        if let Some(mood) = patch.mood {
            entry.mood = mood;
        }
        if let Some(stress) = patch.stress {
            entry.stress = stress;
        }
        if let Some(anxiety) = patch.anxiety {
            entry.anxiety = anxiety;
        }
        if let Some(notes) = patch.notes {
            entry.notes = Some(notes);
        }
        entry.updated_at = Utc::now();

        Ok(Some(entry.clone()))
    }

    async fn delete_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| !(e.id == id && e.user_id == owner_id));
        Ok(entries.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_entry(owner_id: Uuid, mood: i32) -> NewEntry {
        NewEntry {
            user_id: owner_id,
            mood,
            stress: 3,
            anxiety: 3,
            notes: None,
        }
    }

    #[tokio::test]
    async fn orders_most_recent_first() {
        let store = InMemoryMoodStore::new();
        let owner = Uuid::new_v4();
        for mood in [1, 2, 3] {
            store.insert(new_entry(owner, mood)).await.unwrap();
        }

        let entries = store.find_by_owner(owner, None, None, 0).await.unwrap();
        let moods: Vec<i32> = entries.iter().map(|e| e.mood).collect();
        assert_eq!(moods, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn since_is_an_inclusive_lower_bound() {
        let store = InMemoryMoodStore::new();
        let owner = Uuid::new_v4();
        let stored = store.insert(new_entry(owner, 4)).await.unwrap();

        let at_bound = store
            .find_by_owner(owner, Some(stored.created_at), None, 0)
            .await
            .unwrap();
        assert_eq!(at_bound.len(), 1);

        let past_bound = store
            .find_by_owner(
                owner,
                Some(stored.created_at + Duration::milliseconds(1)),
                None,
                0,
            )
            .await
            .unwrap();
        assert!(past_bound.is_empty());
    }

    #[tokio::test]
    async fn limit_and_offset_page_through() {
        let store = InMemoryMoodStore::new();
        let owner = Uuid::new_v4();
        for mood in [1, 2, 3, 4, 5] {
            store.insert(new_entry(owner, mood)).await.unwrap();
        }

        let page = store.find_by_owner(owner, None, Some(2), 2).await.unwrap();
        let moods: Vec<i32> = page.iter().map(|e| e.mood).collect();
        assert_eq!(moods, vec![3, 2]);

        assert_eq!(store.count_by_owner(owner, None).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn update_checks_ownership() {
        let store = InMemoryMoodStore::new();
        let owner = Uuid::new_v4();
        let stored = store.insert(new_entry(owner, 2)).await.unwrap();

        let patch = EntryPatch {
            mood: Some(5),
            ..EntryPatch::default()
        };
        let miss = store
            .update_by_id(stored.id, Uuid::new_v4(), patch.clone())
            .await
            .unwrap();
        assert!(miss.is_none());

        let hit = store.update_by_id(stored.id, owner, patch).await.unwrap();
        assert_eq!(hit.unwrap().mood, 5);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let store = InMemoryMoodStore::new();
        let owner = Uuid::new_v4();
        let stored = store.insert(new_entry(owner, 3)).await.unwrap();

        assert!(!store.delete_by_id(stored.id, Uuid::new_v4()).await.unwrap());
        assert!(store.delete_by_id(stored.id, owner).await.unwrap());
        assert!(!store.delete_by_id(stored.id, owner).await.unwrap());
    }
}
