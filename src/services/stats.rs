use serde::{Deserialize, Serialize};

use crate::models::entry::MoodEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    NoData,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodStatistics {
    pub average_mood: f64,
    pub average_stress: f64,
    pub average_anxiety: f64,
    pub total_entries: i64,
    pub trend: Trend,
}

/// Summarize a window of entries. `entries` must be ordered most recent
/// first; the trend compares the newer half of the window against the older
/// half, with a 0.5-point dead zone so single noisy entries don't flip the
/// classification.
pub fn compute_statistics(entries: &[MoodEntry]) -> MoodStatistics {
    if entries.is_empty() {
        return MoodStatistics {
            average_mood: 0.0,
            average_stress: 0.0,
            average_anxiety: 0.0,
            total_entries: 0,
            trend: Trend::NoData,
        };
    }

    let average_mood = round2(mean(entries, |e| e.mood));
    let average_stress = round2(mean(entries, |e| e.stress));
    let average_anxiety = round2(mean(entries, |e| e.anxiety));

    // Index split of the recency-sorted window: [..mid] is the newer half.
    let mid = entries.len() / 2;
    let (recent, older) = entries.split_at(mid);
    let trend = if recent.is_empty() || older.is_empty() {
        Trend::Stable
    } else {
        let recent_avg = mean(recent, |e| e.mood);
        let older_avg = mean(older, |e| e.mood);
        if recent_avg > older_avg + 0.5 {
            Trend::Improving
        } else if recent_avg < older_avg - 0.5 {
            Trend::Declining
        } else {
            Trend::Stable
        }
    };

    MoodStatistics {
        average_mood,
        average_stress,
        average_anxiety,
        total_entries: entries.len() as i64,
        trend,
    }
}

fn mean(entries: &[MoodEntry], rating: impl Fn(&MoodEntry) -> i32) -> f64 {
    entries.iter().map(rating).sum::<i32>() as f64 / entries.len() as f64
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
