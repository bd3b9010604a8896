use serde::{Deserialize, Serialize};

use super::state::GamificationState;
use crate::household::{Bill, InventoryItem};
use crate::thresholds::low_inventory_items;

/// Minimum raw days of supply every low item must still have for
/// "Preparedness Pro". Stricter than the 3-day low threshold.
pub const PREPAREDNESS_FLOOR_DAYS: f64 = 2.0;

const UTILITY_MASTER_BILLS: u32 = 3;
const RESILIENT_HOUSEHOLD_ITEMS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    UtilityMaster,
    PreparednessPro,
    ResilientHousehold,
}

impl Badge {
    pub const ALL: [Badge; 3] = [
        Badge::UtilityMaster,
        Badge::PreparednessPro,
        Badge::ResilientHousehold,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Badge::UtilityMaster => "Utility Master",
            Badge::PreparednessPro => "Preparedness Pro",
            Badge::ResilientHousehold => "Resilient Household",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Badge::UtilityMaster => "Paid 3 bills on time",
            Badge::PreparednessPro => "No tracked essential is critically low",
            Badge::ResilientHousehold => "Tracked 10 essentials",
        }
    }

    fn qualifies(&self, state: &GamificationState, inventory: &[InventoryItem]) -> bool {
        match self {
            Badge::UtilityMaster => state.counters.bills_paid_on_time >= UTILITY_MASTER_BILLS,
            Badge::PreparednessPro => {
                !inventory.is_empty()
                    && low_inventory_items(inventory)
                        .iter()
                        .all(|item| raw_days_left(item) >= PREPAREDNESS_FLOOR_DAYS)
            }
            Badge::ResilientHousehold => {
                state.counters.essentials_tracked >= RESILIENT_HOUSEHOLD_ITEMS
            }
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrounded days left; non-positive usage never runs out.
fn raw_days_left(item: &InventoryItem) -> f64 {
    if item.daily_usage > 0.0 {
        item.quantity / item.daily_usage
    } else {
        f64::INFINITY
    }
}

/// Add every badge the household now qualifies for.
///
/// Existing badges are kept even if their condition no longer holds. This is
/// the only place badges are granted, so call it after every inventory or
/// bill mutation. `bills` is part of the signature for rules keyed on bill
/// state; none of the current rules read it.
pub fn evaluate_badges(
    mut state: GamificationState,
    inventory: &[InventoryItem],
    _bills: &[Bill],
) -> GamificationState {
    for badge in Badge::ALL {
        if !state.has_badge(badge.name()) && badge.qualifies(&state, inventory) {
            state.badges.push(badge.name().to_string());
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utility_master_at_three_on_time_bills() {
        let mut state = GamificationState::default();
        state.counters.bills_paid_on_time = 2;
        let state = evaluate_badges(state, &[], &[]);
        assert!(!state.has_badge("Utility Master"));

        let mut state = state;
        state.counters.bills_paid_on_time = 3;
        let state = evaluate_badges(state, &[], &[]);
        assert!(state.has_badge("Utility Master"));
    }

    #[test]
    fn preparedness_requires_inventory() {
        let state = evaluate_badges(GamificationState::default(), &[], &[]);
        assert!(!state.has_badge("Preparedness Pro"));

        let items = vec![InventoryItem::new("a", "Water", 40.0, 2.0)];
        let state = evaluate_badges(state, &items, &[]);
        assert!(state.has_badge("Preparedness Pro"));
    }

    #[test]
    fn preparedness_uses_two_day_floor_on_low_items() {
        // 2.5 days is low (< 3) but above the 2-day floor.
        let ok = vec![InventoryItem::new("a", "Milk", 2.5, 1.0)];
        assert!(evaluate_badges(GamificationState::default(), &ok, &[]).has_badge("Preparedness Pro"));

        let critical = vec![
            InventoryItem::new("a", "Milk", 2.5, 1.0),
            InventoryItem::new("b", "Bread", 1.0, 1.0),
        ];
        assert!(!evaluate_badges(GamificationState::default(), &critical, &[])
            .has_badge("Preparedness Pro"));
    }

    #[test]
    fn floor_check_uses_unrounded_days() {
        // 1.96 rounds to 2.0 but is still below the floor.
        let items = vec![InventoryItem::new("a", "Eggs", 1.96, 1.0)];
        assert!(!evaluate_badges(GamificationState::default(), &items, &[])
            .has_badge("Preparedness Pro"));
    }

    #[test]
    fn resilient_household_at_ten_essentials() {
        let mut state = GamificationState::default();
        state.counters.essentials_tracked = 10;
        assert!(evaluate_badges(state, &[], &[]).has_badge("Resilient Household"));
    }

    #[test]
    fn badges_are_never_removed() {
        let items = vec![InventoryItem::new("a", "Water", 40.0, 2.0)];
        let state = evaluate_badges(GamificationState::default(), &items, &[]);
        assert!(state.has_badge("Preparedness Pro"));

        let state = evaluate_badges(state, &[], &[]);
        assert!(state.has_badge("Preparedness Pro"));
        assert_eq!(state.badges.len(), 1);
    }
}
