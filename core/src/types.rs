//! Wire types for the habit API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! from the mock-server crate; integration tests catch schema drift. Habit
//! ids are plain integers (the backend assigns them sequentially). Stats
//! fields are all optional at the wire level: the server may omit any of
//! them, and the view layer owns the defaults.

use serde::{Deserialize, Serialize};

/// A single tracked habit returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Habit {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub importance: String,
}

/// Response envelope for `get_habits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitList {
    pub habits: Vec<Habit>,
}

/// Input for creating a habit. The client adds the username when it builds
/// the request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHabit {
    pub name: String,
    pub kind: String,
    pub importance: String,
}

/// Input for reporting a habit outcome for one occasion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
    pub habit_id: u64,
    pub result: String,
}

/// Minimal acknowledgement returned by the mutation endpoints.
///
/// `success` defaults to `false` when the field is missing, so an empty or
/// unexpected 200 body reads as "not confirmed" rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
}

/// The most recently issued reward, as embedded in a stats response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastReward {
    pub reward_type: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Summary statistics snapshot for one user.
///
/// Every field is optional: the view applies 0 / 0 / 100 / "None" defaults
/// for absent values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatsSummary {
    #[serde(default)]
    pub total_points: Option<i64>,
    #[serde(default)]
    pub streak_weeks: Option<i64>,
    #[serde(default)]
    pub current_goal: Option<i64>,
    #[serde(default)]
    pub last_reward: Option<LastReward>,
}

/// Static reward configuration shown in the info popup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewardInfo {
    pub base_goal: u32,
    pub increase_pct: u32,
    pub checkpoints: Vec<u32>,
    pub notes: String,
}
