use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::entry::MoodEntry;
use crate::store::{EntryPatch, MoodStore, NewEntry, StoreError};

pub struct PgMoodStore {
    pool: PgPool,
}

impl PgMoodStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MoodStore for PgMoodStore {
    async fn insert(&self, entry: NewEntry) -> Result<MoodEntry, StoreError> {
        let stored = sqlx::query_as::<_, MoodEntry>(
            r#"
            INSERT INTO mood_entries (id, user_id, mood, stress, anxiety, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(entry.mood)
        .bind(entry.stress)
        .bind(entry.anxiety)
        .bind(&entry.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn find_by_owner(
        &self,
        owner_id: Uuid,
        since: Option<DateTime<Utc>>,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<MoodEntry>, StoreError> {
        // LIMIT NULL means no limit
        let entries = sqlx::query_as::<_, MoodEntry>(
            r#"
            SELECT * FROM mood_entries
            WHERE user_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(owner_id)
        .bind(since)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn count_by_owner(
        &self,
        owner_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<i64, StoreError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM mood_entries
            WHERE user_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)
            "#,
        )
        .bind(owner_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: EntryPatch,
    ) -> Result<Option<MoodEntry>, StoreError> {
        let updated = sqlx::query_as::<_, MoodEntry>(
            r#"
            UPDATE mood_entries SET
                mood = COALESCE($3, mood),
                stress = COALESCE($4, stress),
                anxiety = COALESCE($5, anxiety),
                notes = COALESCE($6, notes),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(patch.mood)
        .bind(patch.stress)
        .bind(patch.anxiety)
        .bind(&patch.notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM mood_entries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(())
    }
}
