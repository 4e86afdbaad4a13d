//! View-model for the habit page.
//!
//! # Design
//! Everything the page displays lives in one explicit value owned by the
//! binder: a habit list, a report-target selector, stat counters, and a
//! reward popup. State is re-rendered wholesale from each fetched snapshot;
//! nothing is merged or patched. Blocking notifications become an
//! append-only log the host can drain.

use crate::types::{Habit, RewardInfo, StatsSummary};

/// One entry in the report-target selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: u64,
    pub label: String,
}

/// Input fields of the add-habit form.
#[derive(Debug, Clone)]
pub struct HabitForm {
    pub name: String,
    pub kind: String,
    pub importance: String,
}

impl Default for HabitForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: "good".to_string(),
            importance: "medium".to_string(),
        }
    }
}

/// Input fields of the report form. `target` mirrors the selector's current
/// value: the first option after a repopulate, or none when the selector is
/// empty.
#[derive(Debug, Clone)]
pub struct ReportForm {
    pub target: Option<u64>,
    pub result: String,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            target: None,
            result: "completed".to_string(),
        }
    }
}

/// The reward-info detail panel.
#[derive(Debug, Clone, Default)]
pub struct RewardPopup {
    pub visible: bool,
    pub text: String,
}

/// All state the page displays.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub habit_form: HabitForm,
    pub report_form: ReportForm,
    /// Rendered habit list entries, e.g. `"Exercise (good, high)"`.
    pub habits: Vec<String>,
    pub report_options: Vec<SelectOption>,
    pub total_points: i64,
    pub streak_weeks: i64,
    pub current_goal: i64,
    pub reward_label: String,
    pub reward_popup: RewardPopup,
    /// Blocking notifications shown to the user, oldest first.
    pub alerts: Vec<String>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            habit_form: HabitForm::default(),
            report_form: ReportForm::default(),
            habits: Vec::new(),
            report_options: Vec::new(),
            total_points: 0,
            streak_weeks: 0,
            current_goal: 100,
            reward_label: "None".to_string(),
            reward_popup: RewardPopup::default(),
            alerts: Vec::new(),
        }
    }
}

impl ViewModel {
    pub fn push_alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    /// Replace the habit list and rebuild the report selector from scratch.
    /// The selector keeps the browser behavior of auto-selecting its first
    /// option once repopulated.
    pub fn apply_habits(&mut self, habits: &[Habit]) {
        self.habits = habits
            .iter()
            .map(|h| format!("{} ({}, {})", h.name, h.kind, h.importance))
            .collect();
        self.report_options = habits
            .iter()
            .map(|h| SelectOption {
                value: h.id,
                label: h.name.clone(),
            })
            .collect();
        self.report_form.target = habits.first().map(|h| h.id);
    }

    /// Write a stats snapshot into the counters, defaulting absent fields.
    pub fn apply_stats(&mut self, stats: &StatsSummary) {
        self.total_points = stats.total_points.unwrap_or(0);
        self.streak_weeks = stats.streak_weeks.unwrap_or(0);
        self.current_goal = stats.current_goal.unwrap_or(100);
        self.reward_label = stats
            .last_reward
            .as_ref()
            .map(|r| r.reward_type.clone())
            .unwrap_or_else(|| "None".to_string());
    }

    /// Render the reward configuration into the popup and show it.
    pub fn apply_reward_info(&mut self, info: &RewardInfo) {
        let checkpoints = info
            .checkpoints
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.reward_popup.text = format!(
            "Weekly Reward Info:\nBase goal: {}\nIncrease per week: {}%\nCheckpoints: {}\nNotes: {}",
            info.base_goal, info.increase_pct, checkpoints, info.notes
        );
        self.reward_popup.visible = true;
    }
}
