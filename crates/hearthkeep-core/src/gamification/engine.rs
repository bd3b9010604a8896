use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::levels::level_for_points;
use super::rewards::{Award, RewardKind};
use super::state::{GamificationState, HistoryEntry, HISTORY_LIMIT};

/// Add an award's points and log it at the head of the history.
///
/// A zero-point award returns the state untouched: no history entry and no
/// level recompute.
pub fn award_points(mut state: GamificationState, award: Award, now: DateTime<Utc>) -> GamificationState {
    let delta = award.delta();
    if delta == 0 {
        return state;
    }

    state.points = state.points.saturating_add(delta);
    state.level = level_for_points(state.points).to_string();

    state.history.insert(
        0,
        HistoryEntry {
            id: Uuid::new_v4().to_string(),
            kind: award.kind,
            points: delta,
            message: award.message,
            metadata: award.metadata,
            timestamp: now,
        },
    );
    state.history.truncate(HISTORY_LIMIT);
    state
}

/// Reward logging a new item or restocking an existing one.
///
/// Only new items count toward `essentials_tracked`.
pub fn register_inventory_event(
    state: GamificationState,
    is_new_item: bool,
    item_name: &str,
    now: DateTime<Utc>,
) -> GamificationState {
    let award = if is_new_item {
        Award::new(
            RewardKind::InventoryAdd,
            format!(
                "Earned {} points for logging {item_name}.",
                RewardKind::InventoryAdd.default_points()
            ),
        )
    } else {
        Award::new(
            RewardKind::InventoryRestock,
            format!(
                "Earned {} points for restocking {item_name}.",
                RewardKind::InventoryRestock.default_points()
            ),
        )
    };

    let mut state = award_points(state, award.meta("itemName", item_name), now);
    if is_new_item {
        state.counters.essentials_tracked += 1;
    }
    state
}

/// Reward an on-time payment. Late payments change nothing.
pub fn register_bill_paid(
    state: GamificationState,
    bill_name: &str,
    on_time: bool,
    now: DateTime<Utc>,
) -> GamificationState {
    if !on_time {
        return state;
    }

    let award = Award::new(
        RewardKind::BillPaidOnTime,
        format!(
            "Earned {} points for paying {bill_name} on time.",
            RewardKind::BillPaidOnTime.default_points()
        ),
    )
    .meta("billName", bill_name);

    let mut state = award_points(state, award, now);
    state.counters.bills_paid_on_time += 1;
    state
}

/// Reward acting on a reminder and stamp the acknowledgement time.
///
/// The timestamp is set whether or not the award produced points.
pub fn register_reminder_response(state: GamificationState, now: DateTime<Utc>) -> GamificationState {
    let award = Award::new(
        RewardKind::ReminderResponse,
        format!(
            "Earned {} points for acting on a reminder.",
            RewardKind::ReminderResponse.default_points()
        ),
    );

    let mut state = award_points(state, award, now);
    state.last_reminder_acknowledged = Some(now);
    state
}

/// Advance or reset the daily streak. At most once per calendar day.
pub fn update_streak(mut state: GamificationState, has_issues: bool, today: NaiveDate) -> GamificationState {
    if state.streak.last_evaluated_date == Some(today) {
        return state;
    }

    if has_issues {
        state.streak.current = 0;
        state.counters.consecutive_prepared_days = 0;
    } else {
        state.streak.current += 1;
        state.counters.consecutive_prepared_days += 1;
    }
    state.streak.best = state.streak.best.max(state.streak.current);
    state.streak.last_evaluated_date = Some(today);
    state
}
