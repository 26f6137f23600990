use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{CreateMoodEntryRequest, PaginationMeta, UpdateMoodEntryRequest};
use crate::error::{AppError, AppResult};
use crate::models::entry::MoodEntry;
use crate::services::stats::{compute_statistics, MoodStatistics};
use crate::store::{EntryPatch, MoodStore, NewEntry};

pub const DEFAULT_PAGE_SIZE: i64 = 30;
pub const DEFAULT_STATS_WINDOW_DAYS: i64 = 30;

/// Orchestrates validation, persistence and statistics for mood entries.
#[derive(Clone)]
pub struct EntryService {
    store: Arc<dyn MoodStore>,
}

impl EntryService {
    pub fn new(store: Arc<dyn MoodStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        body: CreateMoodEntryRequest,
    ) -> AppResult<MoodEntry> {
        body.validate().map_err(validation_error)?;

        let entry = self
            .store
            .insert(NewEntry {
                user_id: owner_id,
                mood: body.mood,
                stress: body.stress,
                anxiety: body.anxiety,
                notes: body.notes,
            })
            .await?;

        Ok(entry)
    }

    pub async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        body: UpdateMoodEntryRequest,
    ) -> AppResult<MoodEntry> {
        body.validate().map_err(validation_error)?;

        let updated = self
            .store
            .update_by_id(
                id,
                owner_id,
                EntryPatch {
                    mood: body.mood,
                    stress: body.stress,
                    anxiety: body.anxiety,
                    notes: body.notes,
                },
            )
            .await?;

        updated.ok_or_else(|| AppError::NotFound("Mood entry not found".into()))
    }

    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        let removed = self.store.delete_by_id(id, owner_id).await?;
        if !removed {
            return Err(AppError::NotFound("Mood entry not found".into()));
        }
        Ok(())
    }

    /// Paginated listing, most recent first.
    pub async fn list(
        &self,
        owner_id: Uuid,
        limit: Option<i64>,
        page: Option<i64>,
    ) -> AppResult<(Vec<MoodEntry>, PaginationMeta)> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let page = page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let total = self.store.count_by_owner(owner_id, None).await?;
        let entries = self
            .store
            .find_by_owner(owner_id, None, Some(limit), offset)
            .await?;

        let pages = (total + limit - 1) / limit;
        Ok((
            entries,
            PaginationMeta {
                current: page,
                pages,
                total,
            },
        ))
    }

    /// Summary statistics over the trailing window of `days`.
    pub async fn statistics(
        &self,
        owner_id: Uuid,
        days: Option<i64>,
    ) -> AppResult<MoodStatistics> {
        let days = days.unwrap_or(DEFAULT_STATS_WINDOW_DAYS).max(1);
        let since = Utc::now() - Duration::days(days);

        let entries = self
            .store
            .find_by_owner(owner_id, Some(since), None, 0)
            .await?;

        Ok(compute_statistics(&entries))
    }
}

fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, field_errors)| field_errors.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid request".into());
    AppError::Validation(message)
}
