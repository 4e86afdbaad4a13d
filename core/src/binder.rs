//! Orchestration between user actions, the habit API, and the view-model.
//!
//! # Design
//! `Binder` owns a `HabitClient`, a [`Transport`] implementation, and the
//! [`ViewModel`]. Each user-facing operation validates its inputs, runs its
//! network calls strictly in sequence, and rewrites view state from the
//! response. Every fetch-path failure is handled once at the `fetch`
//! boundary: it is logged, surfaces as exactly one blocking alert, and leaves
//! the rest of the view untouched. Operations return a typed result so hosts
//! can tell a validation abort from a transport or API failure, but the
//! user-visible behavior is the same for all of them.
//!
//! Nothing here serializes overlapping operations; a host that interleaves
//! calls gets plain unsynchronized pass-through to the server.

use std::fmt;

use tracing::error;

use crate::client::HabitClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::types::{NewHabit, NewReport};
use crate::view::ViewModel;

/// The one message every failed fetch shows, regardless of cause.
const FETCH_FAILED_ALERT: &str = "Failed to fetch from server.";

/// Why a user action stopped short of completing.
#[derive(Debug)]
pub enum ActionError {
    /// Required input was missing; no request was sent.
    Validation(&'static str),

    /// The HTTP round-trip itself failed.
    Transport(TransportError),

    /// The server answered with a non-success status, an undecodable body,
    /// or the request body could not be serialized.
    Api(ApiError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Validation(msg) => write!(f, "validation failed: {msg}"),
            ActionError::Transport(err) => err.fmt(f),
            ActionError::Api(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ActionError {}

/// Where a document-level click landed, as far as the reward popup cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The reward-info button. Opens (or refreshes) the popup; never closes it.
    RewardInfoButton,
    /// Inside the popup. Contained there; never closes it.
    RewardPopup,
    /// Anywhere else on the page. Closes the popup.
    Outside,
}

/// Translates user-triggered actions into HTTP calls and HTTP responses into
/// visible state.
pub struct Binder<T: Transport> {
    client: HabitClient,
    transport: T,
    pub view: ViewModel,
}

impl<T: Transport> Binder<T> {
    pub fn new(client: HabitClient, transport: T) -> Self {
        Self {
            client,
            transport,
            view: ViewModel::default(),
        }
    }

    /// Load habits, then stats, before the view is considered ready. Each
    /// load reports its own failures; startup itself never fails.
    pub fn init(&mut self) {
        let _ = self.load_habits();
        let _ = self.load_stats();
    }

    /// Create a habit from the form fields, then refresh the list.
    pub fn add_habit(&mut self) -> Result<(), ActionError> {
        if self.view.habit_form.name.is_empty() {
            self.view.push_alert("Enter habit name");
            return Err(ActionError::Validation("Enter habit name"));
        }
        let input = NewHabit {
            name: self.view.habit_form.name.clone(),
            kind: self.view.habit_form.kind.clone(),
            importance: self.view.habit_form.importance.clone(),
        };
        let request = match self.client.build_add_habit(&input) {
            Ok(request) => request,
            Err(err) => return Err(self.report_failure("add_habit", ActionError::Api(err))),
        };
        let ack = self.fetch(request, HabitClient::parse_add_habit)?;
        if ack.success {
            self.view.habit_form.name.clear();
            let _ = self.load_habits();
        }
        Ok(())
    }

    /// Fetch the habit list and rebuild the rendered list and report
    /// selector from it. A failed fetch leaves the previous contents alone.
    pub fn load_habits(&mut self) -> Result<(), ActionError> {
        let request = self.client.build_list_habits();
        let habits = self.fetch(request, HabitClient::parse_list_habits)?;
        self.view.apply_habits(&habits);
        Ok(())
    }

    /// Report an outcome for the selected habit, then refresh stats and the
    /// habit list, in that order. Each refresh reports its own failures and
    /// the other still runs.
    pub fn submit_report(&mut self) -> Result<(), ActionError> {
        let habit_id = match self.view.report_form.target {
            Some(id) => id,
            None => {
                self.view.push_alert("Select a habit");
                return Err(ActionError::Validation("Select a habit"));
            }
        };
        let input = NewReport {
            habit_id,
            result: self.view.report_form.result.clone(),
        };
        let request = match self.client.build_submit_report(&input) {
            Ok(request) => request,
            Err(err) => return Err(self.report_failure("submit_report", ActionError::Api(err))),
        };
        let ack = self.fetch(request, HabitClient::parse_submit_report)?;
        if ack.success {
            self.view.push_alert("Report submitted!");
            let _ = self.load_stats();
            let _ = self.load_habits();
        }
        Ok(())
    }

    /// Fetch the stats summary and write it into the counters.
    pub fn load_stats(&mut self) -> Result<(), ActionError> {
        let request = self.client.build_get_stats();
        let stats = self.fetch(request, HabitClient::parse_get_stats)?;
        self.view.apply_stats(&stats);
        Ok(())
    }

    /// Fetch the reward configuration and show it in the popup. Nothing is
    /// cached; every call refetches.
    pub fn show_reward_info(&mut self) -> Result<(), ActionError> {
        let request = self.client.build_reward_info();
        let info = self.fetch(request, HabitClient::parse_reward_info)?;
        self.view.apply_reward_info(&info);
        Ok(())
    }

    /// Route a document-level click. Clicks on the button and inside the
    /// popup stop there; any other click dismisses the popup.
    pub fn handle_click(&mut self, target: ClickTarget) -> Result<(), ActionError> {
        match target {
            ClickTarget::RewardInfoButton => self.show_reward_info(),
            ClickTarget::RewardPopup => Ok(()),
            ClickTarget::Outside => {
                self.view.reward_popup.visible = false;
                Ok(())
            }
        }
    }

    /// Execute one request and parse its response. Any failure along the way
    /// is logged, alerted exactly once, and returned as a typed error.
    fn fetch<R>(
        &mut self,
        request: HttpRequest,
        parse: fn(&HabitClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ActionError> {
        let url = request.url.clone();
        let result = self
            .transport
            .execute(&request)
            .map_err(ActionError::Transport)
            .and_then(|response| parse(&self.client, response).map_err(ActionError::Api));
        result.map_err(|err| self.report_failure(&url, err))
    }

    fn report_failure(&mut self, context: &str, err: ActionError) -> ActionError {
        error!("fetch failed for {context}: {err}");
        self.view.push_alert(FETCH_FAILED_ALERT);
        err
    }
}
