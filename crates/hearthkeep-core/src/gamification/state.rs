use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::levels::level_for_points;
use super::rewards::RewardKind;

/// Oldest history entries past this count are dropped.
pub const HISTORY_LIMIT: usize = 25;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    #[serde(default)]
    pub current: u32,
    /// Running maximum of `current`.
    #[serde(default)]
    pub best: u32,
    /// Calendar day of the last evaluation; gates re-evaluation.
    #[serde(default)]
    pub last_evaluated_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    #[serde(default)]
    pub bills_paid_on_time: u32,
    #[serde(default)]
    pub essentials_tracked: u32,
    /// Reset to zero on a day with issues.
    #[serde(default)]
    pub consecutive_prepared_days: u32,
}

/// One point award, as shown in the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RewardKind,
    pub points: u64,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
}

/// Gamification snapshot threaded through the engine's transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationState {
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub streak: StreakState,
    /// Earned badge names in the order they were earned. Never shrinks.
    #[serde(default)]
    pub badges: Vec<String>,
    /// Always `level_for_points(points)`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Newest first, at most [`HISTORY_LIMIT`] entries.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub counters: Counters,
    #[serde(default)]
    pub last_reminder_acknowledged: Option<DateTime<Utc>>,
}

fn default_level() -> String {
    level_for_points(0).to_string()
}

impl Default for GamificationState {
    fn default() -> Self {
        Self {
            points: 0,
            streak: StreakState::default(),
            badges: Vec::new(),
            level: default_level(),
            history: Vec::new(),
            counters: Counters::default(),
            last_reminder_acknowledged: None,
        }
    }
}

impl GamificationState {
    /// Normalize a snapshot restored from storage.
    ///
    /// Re-derives `level`, drops duplicate badges, trims history to the cap
    /// and lifts `best` to at least `current`.
    pub fn restore(mut self) -> Self {
        self.level = level_for_points(self.points).to_string();

        let mut seen = Vec::with_capacity(self.badges.len());
        for badge in self.badges.drain(..) {
            if !seen.contains(&badge) {
                seen.push(badge);
            }
        }
        self.badges = seen;

        self.history.truncate(HISTORY_LIMIT);
        self.streak.best = self.streak.best.max(self.streak.current);
        self
    }

    pub fn has_badge(&self, name: &str) -> bool {
        self.badges.iter().any(|badge| badge == name)
    }
}

/// One-line streak summary for status displays.
pub fn streak_message(state: &GamificationState) -> String {
    match state.streak.current {
        0 => "Let's start a new streak today!".to_string(),
        days => format!("{days}-day streak: No overdue bills or critical shortages!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_snapshot() {
        let state = GamificationState::default();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["points"], 0);
        assert_eq!(json["level"], "Bronze Caretaker");
        assert_eq!(json["streak"]["lastEvaluatedDate"], serde_json::Value::Null);
        assert_eq!(json["counters"]["billsPaidOnTime"], 0);
        assert_eq!(json["lastReminderAcknowledged"], serde_json::Value::Null);
        assert!(json["badges"].as_array().unwrap().is_empty());
    }

    #[test]
    fn partial_snapshot_fills_defaults() {
        let state: GamificationState = serde_json::from_str(r#"{"points":250}"#).unwrap();
        assert_eq!(state.counters, Counters::default());
        assert_eq!(state.level, "Bronze Caretaker");
        assert_eq!(state.restore().level, "Silver Steward");
    }

    #[test]
    fn restore_repairs_invariants() {
        let state: GamificationState = serde_json::from_str::<GamificationState>(
            r#"{
                "points": 520,
                "level": "Bronze Caretaker",
                "badges": ["Utility Master", "Utility Master", "Preparedness Pro"],
                "streak": {"current": 6, "best": 2, "lastEvaluatedDate": "2026-10-15"}
            }"#,
        )
        .unwrap()
        .restore();

        assert_eq!(state.level, "Gold Guardian");
        assert_eq!(state.badges, vec!["Utility Master", "Preparedness Pro"]);
        assert_eq!(state.streak.best, 6);
        assert_eq!(state.streak.last_evaluated_date, NaiveDate::from_ymd_opt(2026, 10, 15));
    }

    #[test]
    fn streak_messages() {
        let mut state = GamificationState::default();
        assert_eq!(streak_message(&state), "Let's start a new streak today!");
        state.streak.current = 4;
        assert_eq!(
            streak_message(&state),
            "4-day streak: No overdue bills or critical shortages!"
        );
    }
}
