use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: i32,
    pub stress: i32,
    pub anxiety: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MoodEntry {
    /// Derived on read, never persisted.
    pub fn average_score(&self) -> f64 {
        (self.mood + self.stress + self.anxiety) as f64 / 3.0
    }
}
