use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

fn default_username() -> String {
    "default_user".to_string()
}

fn default_importance() -> String {
    "medium".to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Habit {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub importance: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LastReward {
    pub reward_type: String,
    pub details: String,
}

#[derive(Clone, Debug)]
pub struct UserRecord {
    pub habits: Vec<Habit>,
    pub total_points: i64,
    pub streak_weeks: i64,
    pub current_goal: i64,
    pub last_reward: Option<LastReward>,
}

impl Default for UserRecord {
    fn default() -> Self {
        Self {
            habits: Vec::new(),
            total_points: 0,
            streak_weeks: 0,
            current_goal: 100,
            last_reward: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Accounts {
    pub next_habit_id: u64,
    pub users: HashMap<String, UserRecord>,
}

pub type Db = Arc<RwLock<Accounts>>;

#[derive(Deserialize)]
pub struct UserQuery {
    #[serde(default = "default_username")]
    pub username: String,
}

#[derive(Deserialize)]
pub struct AddHabitRequest {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub habit_name: String,
    #[serde(default)]
    pub habit_type: String,
    #[serde(default = "default_importance")]
    pub importance: String,
}

#[derive(Deserialize)]
pub struct SubmitReportRequest {
    #[serde(default = "default_username")]
    pub username: String,
    pub habit_id: Option<u64>,
    #[serde(default)]
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddHabitResponse {
    pub success: bool,
    pub habit: Habit,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitsResponse {
    pub habits: Vec<Habit>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReportResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_points: i64,
    pub streak_weeks: i64,
    pub current_goal: i64,
    pub last_reward: Option<LastReward>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RewardInfoResponse {
    pub base_goal: u32,
    pub increase_pct: u32,
    pub checkpoints: Vec<u32>,
    pub notes: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub pong: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiFailure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, message: &str) -> ApiFailure {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

pub fn new_db() -> Db {
    Arc::new(RwLock::new(Accounts::default()))
}

pub fn app() -> Router {
    app_with(new_db())
}

/// Build the router over a caller-supplied store, so tests can seed state.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/add_habit", post(add_habit))
        .route("/api/get_habits", get(get_habits))
        .route("/api/submit_report", post(submit_report))
        .route("/api/get_stats", get(get_stats))
        .route("/api/get_weekly_reward_info", get(get_weekly_reward_info))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse { pong: true })
}

async fn add_habit(
    State(db): State<Db>,
    Json(input): Json<AddHabitRequest>,
) -> Result<Json<AddHabitResponse>, ApiFailure> {
    if input.habit_name.is_empty() || input.habit_type.is_empty() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "habit_name and habit_type required",
        ));
    }

    let mut accounts = db.write().await;
    accounts.next_habit_id += 1;
    let habit = Habit {
        id: accounts.next_habit_id,
        name: input.habit_name,
        kind: input.habit_type,
        importance: input.importance,
    };
    accounts
        .users
        .entry(input.username)
        .or_default()
        .habits
        .push(habit.clone());

    Ok(Json(AddHabitResponse {
        success: true,
        habit,
    }))
}

async fn get_habits(State(db): State<Db>, Query(query): Query<UserQuery>) -> Json<HabitsResponse> {
    let accounts = db.read().await;
    // Listed newest first.
    let habits = accounts
        .users
        .get(&query.username)
        .map(|user| user.habits.iter().rev().cloned().collect())
        .unwrap_or_default();
    Json(HabitsResponse { habits })
}

async fn submit_report(
    State(db): State<Db>,
    Json(input): Json<SubmitReportRequest>,
) -> Result<Json<SubmitReportResponse>, ApiFailure> {
    let habit_id = match input.habit_id {
        Some(id) if input.result == "completed" || input.result == "failed" => id,
        _ => {
            return Err(failure(
                StatusCode::BAD_REQUEST,
                "habit_id and valid result required",
            ))
        }
    };

    let mut accounts = db.write().await;
    let user = accounts.users.entry(input.username).or_default();
    if !user.habits.iter().any(|h| h.id == habit_id) {
        return Err(failure(StatusCode::NOT_FOUND, "habit not found"));
    }
    if input.result == "completed" {
        user.total_points += 10;
    }

    Ok(Json(SubmitReportResponse { success: true }))
}

async fn get_stats(State(db): State<Db>, Query(query): Query<UserQuery>) -> Json<StatsResponse> {
    let accounts = db.read().await;
    let user = accounts.users.get(&query.username).cloned().unwrap_or_default();
    Json(StatsResponse {
        total_points: user.total_points,
        streak_weeks: user.streak_weeks,
        current_goal: user.current_goal,
        last_reward: user.last_reward,
    })
}

async fn get_weekly_reward_info() -> Json<RewardInfoResponse> {
    Json(weekly_info())
}

fn weekly_info() -> RewardInfoResponse {
    RewardInfoResponse {
        base_goal: 100,
        increase_pct: 20,
        checkpoints: vec![2, 4, 6, 8],
        notes: "Complete a week to increase streak; fail resets streak and goal.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn habit_serializes_with_type_key() {
        let habit = Habit {
            id: 1,
            name: "Exercise".to_string(),
            kind: "good".to_string(),
            importance: "high".to_string(),
        };
        let json = serde_json::to_value(&habit).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["type"], "good");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn add_habit_request_fills_defaults() {
        let input: AddHabitRequest =
            serde_json::from_str(r#"{"habit_name":"Exercise","habit_type":"good"}"#).unwrap();
        assert_eq!(input.username, "default_user");
        assert_eq!(input.importance, "medium");
    }

    #[test]
    fn add_habit_request_tolerates_missing_name() {
        let input: AddHabitRequest = serde_json::from_str(r#"{"habit_type":"good"}"#).unwrap();
        assert!(input.habit_name.is_empty());
    }

    #[test]
    fn submit_report_request_defaults() {
        let input: SubmitReportRequest = serde_json::from_str(r#"{"habit_id":3}"#).unwrap();
        assert_eq!(input.username, "default_user");
        assert_eq!(input.habit_id, Some(3));
        assert!(input.result.is_empty());
    }

    #[test]
    fn stats_response_serializes_null_last_reward() {
        let json = serde_json::to_value(StatsResponse {
            total_points: 0,
            streak_weeks: 0,
            current_goal: 100,
            last_reward: None,
        })
        .unwrap();
        assert_eq!(json["current_goal"], 100);
        assert_eq!(json["last_reward"], serde_json::Value::Null);
    }

    #[test]
    fn weekly_info_matches_published_constants() {
        let info = weekly_info();
        assert_eq!(info.base_goal, 100);
        assert_eq!(info.increase_pct, 20);
        assert_eq!(info.checkpoints, vec![2, 4, 6, 8]);
    }

    #[test]
    fn fresh_user_record_defaults_goal_to_100() {
        let record = UserRecord::default();
        assert_eq!(record.total_points, 0);
        assert_eq!(record.streak_weeks, 0);
        assert_eq!(record.current_goal, 100);
        assert!(record.last_reward.is_none());
    }
}
