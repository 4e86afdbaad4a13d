use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{
    app, app_with, new_db, AddHabitResponse, HabitsResponse, LastReward, PingResponse,
    RewardInfoResponse, StatsResponse, SubmitReportResponse, UserRecord,
};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- ping ---

#[tokio::test]
async fn ping_answers_pong() {
    let app = app();
    let resp = app.oneshot(get_request("/api/ping")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pong: PingResponse = body_json(resp).await;
    assert!(pong.pong);
}

// --- get_habits ---

#[tokio::test]
async fn get_habits_empty_for_unknown_user() {
    let app = app();
    let resp = app
        .oneshot(get_request("/api/get_habits?username=nobody"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: HabitsResponse = body_json(resp).await;
    assert!(list.habits.is_empty());
}

#[tokio::test]
async fn get_habits_defaults_username_when_missing() {
    let app = app();
    let resp = app.oneshot(get_request("/api/get_habits")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: HabitsResponse = body_json(resp).await;
    assert!(list.habits.is_empty());
}

// --- add_habit ---

#[tokio::test]
async fn add_habit_returns_success_and_habit() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/add_habit",
            r#"{"username":"default_user","habit_name":"Exercise","habit_type":"good","importance":"high"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let out: AddHabitResponse = body_json(resp).await;
    assert!(out.success);
    assert_eq!(out.habit.name, "Exercise");
    assert_eq!(out.habit.kind, "good");
    assert_eq!(out.habit.importance, "high");
    assert!(out.habit.id > 0);
}

#[tokio::test]
async fn add_habit_missing_name_returns_400() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/add_habit",
            r#"{"habit_type":"good"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_habit_missing_type_returns_400() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/add_habit",
            r#"{"habit_name":"Exercise"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_habit_malformed_json_is_rejected() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/api/add_habit", "not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- submit_report ---

#[tokio::test]
async fn submit_report_unknown_habit_returns_404() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/submit_report",
            r#"{"username":"default_user","habit_id":99,"result":"completed"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_report_invalid_result_returns_400() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/submit_report",
            r#"{"username":"default_user","habit_id":1,"result":"done"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submit_report_missing_habit_id_returns_400() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/submit_report",
            r#"{"username":"default_user","result":"completed"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- get_stats ---

#[tokio::test]
async fn get_stats_fresh_user_has_defaults() {
    let app = app();
    let resp = app
        .oneshot(get_request("/api/get_stats?username=fresh"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let stats: StatsResponse = body_json(resp).await;
    assert_eq!(stats.total_points, 0);
    assert_eq!(stats.streak_weeks, 0);
    assert_eq!(stats.current_goal, 100);
    assert!(stats.last_reward.is_none());
}

#[tokio::test]
async fn get_stats_carries_seeded_reward() {
    let db = new_db();
    db.write().await.users.insert(
        "default_user".to_string(),
        UserRecord {
            total_points: 40,
            streak_weeks: 2,
            current_goal: 120,
            last_reward: Some(LastReward {
                reward_type: "2-week".to_string(),
                details: "Small reward".to_string(),
            }),
            ..UserRecord::default()
        },
    );

    let app = app_with(db);
    let resp = app.oneshot(get_request("/api/get_stats")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let stats: StatsResponse = body_json(resp).await;
    assert_eq!(stats.total_points, 40);
    assert_eq!(stats.streak_weeks, 2);
    assert_eq!(stats.current_goal, 120);
    assert_eq!(stats.last_reward.unwrap().reward_type, "2-week");
}

// --- get_weekly_reward_info ---

#[tokio::test]
async fn weekly_reward_info_returns_constants() {
    let app = app();
    let resp = app
        .oneshot(get_request("/api/get_weekly_reward_info"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let info: RewardInfoResponse = body_json(resp).await;
    assert_eq!(info.base_goal, 100);
    assert_eq!(info.increase_pct, 20);
    assert_eq!(info.checkpoints, vec![2, 4, 6, 8]);
    assert!(info.notes.contains("streak"));
}

// --- full user lifecycle ---

#[tokio::test]
async fn report_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // add two habits
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/add_habit",
            r#"{"username":"default_user","habit_name":"Exercise","habit_type":"good","importance":"high"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let first: AddHabitResponse = body_json(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/add_habit",
            r#"{"username":"default_user","habit_name":"Reading","habit_type":"good","importance":"medium"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let second: AddHabitResponse = body_json(resp).await;
    assert!(second.habit.id > first.habit.id);

    // list is newest first
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/get_habits?username=default_user"))
        .await
        .unwrap();
    let list: HabitsResponse = body_json(resp).await;
    assert_eq!(list.habits.len(), 2);
    assert_eq!(list.habits[0].name, "Reading");
    assert_eq!(list.habits[1].name, "Exercise");

    // a completed report scores 10 points
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/submit_report",
            &format!(
                r#"{{"username":"default_user","habit_id":{},"result":"completed"}}"#,
                first.habit.id
            ),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ack: SubmitReportResponse = body_json(resp).await;
    assert!(ack.success);

    // a failed report scores nothing
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/submit_report",
            &format!(
                r#"{{"username":"default_user","habit_id":{},"result":"failed"}}"#,
                second.habit.id
            ),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/get_stats?username=default_user"))
        .await
        .unwrap();
    let stats: StatsResponse = body_json(resp).await;
    assert_eq!(stats.total_points, 10);

    // other users are isolated
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/get_habits?username=someone_else"))
        .await
        .unwrap();
    let list: HabitsResponse = body_json(resp).await;
    assert!(list.habits.is_empty());
}
