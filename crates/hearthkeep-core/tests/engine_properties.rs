//! Property-based tests for the gamification engine.
//!
//! Random event sequences are threaded through the pure transitions and the
//! ledger invariants are checked after every step.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use hearthkeep_core::gamification::{
    award_points, evaluate_badges, level_for_points, register_bill_paid,
    register_inventory_event, register_reminder_response, update_streak, Award,
    GamificationState, RewardKind, HISTORY_LIMIT,
};
use hearthkeep_core::InventoryItem;

#[derive(Debug, Clone)]
enum Event {
    Inventory { is_new: bool },
    BillPaid { on_time: bool },
    Reminder,
    Bonus(u64),
    Streak { has_issues: bool, day_offset: i64 },
    Badges { quantity: f64, usage: f64 },
}

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        any::<bool>().prop_map(|is_new| Event::Inventory { is_new }),
        any::<bool>().prop_map(|on_time| Event::BillPaid { on_time }),
        Just(Event::Reminder),
        (0u64..500).prop_map(Event::Bonus),
        (any::<bool>(), 0i64..5).prop_map(|(has_issues, day_offset)| Event::Streak { has_issues, day_offset }),
        (0.0f64..50.0, 0.0f64..5.0).prop_map(|(quantity, usage)| Event::Badges { quantity, usage }),
    ]
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap()
}

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn apply(state: GamificationState, event: &Event, step: usize) -> GamificationState {
    let now = start() + Duration::minutes(step as i64);
    match event {
        Event::Inventory { is_new } => register_inventory_event(state, *is_new, "Water", now),
        Event::BillPaid { on_time } => register_bill_paid(state, "Rent", *on_time, now),
        Event::Reminder => register_reminder_response(state, now),
        Event::Bonus(amount) => award_points(state, Award::new(RewardKind::Bonus, "bonus").amount(*amount), now),
        Event::Streak { has_issues, day_offset } => {
            update_streak(state, *has_issues, base_day() + Duration::days(*day_offset))
        }
        Event::Badges { quantity, usage } => {
            let items = vec![InventoryItem::new("i", "Rice", *quantity, *usage)];
            evaluate_badges(state, &items, &[])
        }
    }
}

proptest! {
    /// Points never go down, and history and level stay consistent.
    #[test]
    fn prop_ledger_invariants_hold(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut state = GamificationState::default();
        for (step, event) in events.iter().enumerate() {
            let before = state.clone();
            state = apply(state, event, step);

            prop_assert!(state.points >= before.points);
            prop_assert!(state.history.len() <= HISTORY_LIMIT);
            prop_assert_eq!(state.level.as_str(), level_for_points(state.points));
            prop_assert!(state.streak.best >= state.streak.current);
            for badge in &before.badges {
                prop_assert!(state.has_badge(badge), "lost badge {}", badge);
            }
        }
    }

    /// A second streak evaluation on the same day changes nothing.
    #[test]
    fn prop_streak_is_idempotent_per_day(
        events in prop::collection::vec(event_strategy(), 0..20),
        first in any::<bool>(),
        second in any::<bool>(),
        day_offset in 0i64..30,
    ) {
        let mut state = GamificationState::default();
        for (step, event) in events.iter().enumerate() {
            state = apply(state, event, step);
        }

        let today = base_day() + Duration::days(day_offset);
        let once = update_streak(state, first, today);
        let twice = update_streak(once.clone(), second, today);
        prop_assert_eq!(once, twice);
    }

    /// History holds the newest entries and their points add up to the
    /// points gained while they were logged.
    #[test]
    fn prop_history_is_newest_first(amounts in prop::collection::vec(1u64..100, 1..40)) {
        let mut state = GamificationState::default();
        for (step, amount) in amounts.iter().enumerate() {
            state = award_points(
                state,
                Award::new(RewardKind::Bonus, format!("step {step}")).amount(*amount),
                start() + Duration::minutes(step as i64),
            );
        }

        prop_assert_eq!(state.points, amounts.iter().sum::<u64>());
        let kept = amounts.len().min(HISTORY_LIMIT);
        prop_assert_eq!(state.history.len(), kept);
        let last = amounts.len() - 1;
        prop_assert_eq!(state.history[0].message.clone(), format!("step {last}"));
        for pair in state.history.windows(2) {
            prop_assert!(pair[0].timestamp > pair[1].timestamp);
        }
    }

    /// Level thresholds are monotone in points.
    #[test]
    fn prop_level_never_drops_with_more_points(a in 0u64..2_000, b in 0u64..2_000) {
        let rank = |label: &str| match label {
            "Bronze Caretaker" => 0,
            "Silver Steward" => 1,
            "Gold Guardian" => 2,
            "Platinum Protector" => 3,
            other => panic!("unexpected level {other}"),
        };
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(level_for_points(low)) <= rank(level_for_points(high)));
    }

    /// Days remaining is non-negative, or infinite when usage is missing.
    #[test]
    fn prop_days_remaining_bounds(quantity in 0.0f64..1_000.0, usage in -5.0f64..50.0) {
        let days = InventoryItem::new("x", "X", quantity, usage).days_remaining();
        if usage > 0.0 {
            prop_assert!(days.is_finite());
            prop_assert!(days >= 0.0);
        } else {
            prop_assert!(days.is_infinite());
        }
    }
}
