//! Stateless HTTP request builder and response parser for the habit API.
//!
//! # Design
//! `HabitClient` holds only a `base_url` and a `username` and carries no
//! mutable state between calls. Each API operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! this module deterministic and free of I/O dependencies.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Ack, Habit, HabitList, NewHabit, NewReport, RewardInfo, StatsSummary};

use serde::Serialize;

/// Base URL a local deployment serves the API under.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Username the server provisions implicitly when none is configured.
pub const DEFAULT_USERNAME: &str = "default_user";

/// JSON body for `add_habit`, with the username folded in.
#[derive(Serialize)]
struct AddHabitBody<'a> {
    username: &'a str,
    habit_name: &'a str,
    habit_type: &'a str,
    importance: &'a str,
}

/// JSON body for `submit_report`, with the username folded in.
#[derive(Serialize)]
struct SubmitReportBody<'a> {
    username: &'a str,
    habit_id: u64,
    result: &'a str,
}

/// Synchronous, stateless client for the habit API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct HabitClient {
    base_url: String,
    username: String,
}

impl HabitClient {
    pub fn new(base_url: &str, username: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn build_add_habit(&self, input: &NewHabit) -> Result<HttpRequest, ApiError> {
        let body = AddHabitBody {
            username: &self.username,
            habit_name: &input.name,
            habit_type: &input.kind,
            importance: &input.importance,
        };
        let body = serde_json::to_string(&body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/add_habit", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_list_habits(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!(
                "{}/get_habits?username={}",
                self.base_url,
                urlencoding::encode(&self.username)
            ),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_submit_report(&self, input: &NewReport) -> Result<HttpRequest, ApiError> {
        let body = SubmitReportBody {
            username: &self.username,
            habit_id: input.habit_id,
            result: &input.result,
        };
        let body = serde_json::to_string(&body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/submit_report", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_get_stats(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!(
                "{}/get_stats?username={}",
                self.base_url,
                urlencoding::encode(&self.username)
            ),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_reward_info(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/get_weekly_reward_info", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_add_habit(&self, response: HttpResponse) -> Result<Ack, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_list_habits(&self, response: HttpResponse) -> Result<Vec<Habit>, ApiError> {
        check_status(&response)?;
        let list: HabitList =
            serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(list.habits)
    }

    pub fn parse_submit_report(&self, response: HttpResponse) -> Result<Ack, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_get_stats(&self, response: HttpResponse) -> Result<StatsSummary, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_reward_info(&self, response: HttpResponse) -> Result<RewardInfo, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

/// Accept any 2xx status, the same range `Response.ok` covers; everything
/// else becomes an `HttpError` with the raw status and body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
