use super::Id;
use serde::{Deserialize, Serialize};

/// `GET /users/stats/` (staff only).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub patients: u64,
    #[serde(default)]
    pub physiotherapists: u64,
    #[serde(default)]
    pub verified_users: u64,
    #[serde(default)]
    pub active_users: u64,
}

/// `GET /exercise-progress/stats/`, scoped to what the caller may see.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    #[serde(default)]
    pub total_sessions: u64,
    #[serde(default)]
    pub completed_sessions: u64,
    #[serde(default)]
    pub average_pain_improvement: f64,
    #[serde(default)]
    pub average_difficulty_rating: f64,
}

impl ProgressStats {
    /// Completed over total sessions, 0.0 to 1.0.
    pub fn completion_rate(&self) -> f64 {
        if self.total_sessions == 0 {
            0.0
        } else {
            self.completed_sessions as f64 / self.total_sessions as f64
        }
    }
}

/// Adherence of one patient to their plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adherence {
    pub patient: Id,
    #[serde(flatten)]
    pub stats: ProgressStats,
}

impl Adherence {
    /// Percentage, rounded to the nearest whole number.
    pub fn rate_percent(&self) -> u8 {
        (self.stats.completion_rate() * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AdherenceQuery {
    pub patient: Id,
}
