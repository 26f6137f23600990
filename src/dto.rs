//! Request/response DTOs for the mood API.
//!
//! Conventions:
//! - `*Request` → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Validation rules are expressed via `validator` derive macros and run
//!   by the entry service before any store call

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::entry::MoodEntry;
use crate::services::stats::round2;

// ============================================================================
// Envelope
// ============================================================================

/// Standard response envelope — every success response uses this shape.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: None,
        }
    }

    pub fn paginated(data: T, pagination: PaginationMeta) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: Some(pagination),
        }
    }
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
            pagination: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub current: i64,
    pub pages: i64,
    pub total: i64,
}

// ============================================================================
// Mood entries
// ============================================================================

/// POST /api/moods
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMoodEntryRequest {
    #[validate(range(min = 1, max = 5, message = "Mood must be between 1 and 5"))]
    pub mood: i32,

    #[validate(range(min = 1, max = 5, message = "Stress must be between 1 and 5"))]
    pub stress: i32,

    #[validate(range(min = 1, max = 5, message = "Anxiety must be between 1 and 5"))]
    pub anxiety: i32,

    #[validate(length(max = 500, message = "Notes must be under 500 characters"))]
    pub notes: Option<String>,
}

/// PUT /api/moods/{id} — partial update, all fields optional
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMoodEntryRequest {
    #[validate(range(min = 1, max = 5, message = "Mood must be between 1 and 5"))]
    pub mood: Option<i32>,

    #[validate(range(min = 1, max = 5, message = "Stress must be between 1 and 5"))]
    pub stress: Option<i32>,

    #[validate(range(min = 1, max = 5, message = "Anxiety must be between 1 and 5"))]
    pub anxiety: Option<i32>,

    #[validate(length(max = 500, message = "Notes must be under 500 characters"))]
    pub notes: Option<String>,
}

/// GET /api/moods query params
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

/// GET /api/moods/stats query params
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub days: Option<i64>,
}

/// Stored entry plus the derived average score.
#[derive(Debug, Serialize)]
pub struct MoodEntryResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: i32,
    pub stress: i32,
    pub anxiety: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub average_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MoodEntry> for MoodEntryResponse {
    fn from(entry: MoodEntry) -> Self {
        let average_score = round2(entry.average_score());
        Self {
            id: entry.id,
            user_id: entry.user_id,
            mood: entry.mood,
            stress: entry.stress,
            anxiety: entry.anxiety,
            notes: entry.notes,
            average_score,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}
