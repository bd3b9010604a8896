//! Host-side adapter over the household collections and the rules engine.
//!
//! Every collection mutation is followed by the matching gamification
//! transition and a daily [`HouseholdTracker::refresh`], so the streak is
//! evaluated on any day the household is touched.

use chrono::{DateTime, NaiveDate, Utc};

use crate::calculations::days_until_from;
use crate::error::{Result, ValidationError};
use crate::gamification::{
    evaluate_badges, register_bill_paid, register_inventory_event, register_reminder_response,
    update_streak, GamificationState,
};
use crate::health::{household_health, HouseholdHealth};
use crate::household::{remove_by_id, upsert_by_id, Bill, InventoryItem, Member};
use crate::storage::Database;
use crate::thresholds::{has_issues, low_inventory_items, upcoming_bills};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HouseholdTracker {
    pub inventory: Vec<InventoryItem>,
    pub bills: Vec<Bill>,
    pub members: Vec<Member>,
    pub gamification: GamificationState,
}

impl HouseholdTracker {
    /// Read every collection from storage.
    pub fn load(db: &Database) -> Result<Self> {
        Ok(Self {
            inventory: db.load_inventory()?,
            bills: db.load_bills()?,
            members: db.load_members()?,
            gamification: db.load_gamification()?,
        })
    }

    /// Write every collection back to storage.
    pub fn save(&self, db: &Database) -> Result<()> {
        db.save_inventory(&self.inventory)?;
        db.save_bills(&self.bills)?;
        db.save_members(&self.members)?;
        db.save_gamification(&self.gamification)?;
        Ok(())
    }

    fn reevaluate_badges(&mut self) {
        let state = std::mem::take(&mut self.gamification);
        self.gamification = evaluate_badges(state, &self.inventory, &self.bills);
    }

    /// Add or replace an item and reward it. Returns `true` for a new item.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidValue`] and leaves the tracker
    /// untouched when the item fails [`InventoryItem::validate`].
    pub fn upsert_item(&mut self, item: InventoryItem, now: DateTime<Utc>, today: NaiveDate) -> Result<bool> {
        item.validate()?;
        let name = item.name.clone();
        let is_new = upsert_by_id(&mut self.inventory, item);

        let state = std::mem::take(&mut self.gamification);
        self.gamification = register_inventory_event(state, is_new, &name, now);
        self.refresh(today);
        Ok(is_new)
    }

    pub fn delete_item(&mut self, id: &str, today: NaiveDate) -> Option<InventoryItem> {
        let removed = remove_by_id(&mut self.inventory, id);
        self.refresh(today);
        removed
    }

    /// # Errors
    /// Returns [`ValidationError::InvalidValue`] and leaves the tracker
    /// untouched when the bill fails [`Bill::validate`].
    pub fn upsert_bill(&mut self, bill: Bill, today: NaiveDate) -> Result<bool> {
        bill.validate()?;
        let is_new = upsert_by_id(&mut self.bills, bill);
        self.refresh(today);
        Ok(is_new)
    }

    pub fn delete_bill(&mut self, id: &str, today: NaiveDate) -> Option<Bill> {
        let removed = remove_by_id(&mut self.bills, id);
        self.refresh(today);
        removed
    }

    /// Record a payment. On time means the bill had a due date that has not
    /// passed yet. Returns whether the payment counted as on time.
    ///
    /// # Errors
    /// Returns [`ValidationError::NotFound`] for an unknown bill id.
    pub fn mark_bill_paid(&mut self, id: &str, now: DateTime<Utc>, today: NaiveDate) -> Result<bool> {
        let bill = self
            .bills
            .iter_mut()
            .find(|bill| bill.id == id)
            .ok_or_else(|| ValidationError::NotFound {
                collection: "bills".to_string(),
                id: id.to_string(),
            })?;

        bill.last_paid_date = Some(now);
        let on_time = days_until_from(bill.due_date, today).is_some_and(|days| days >= 0);
        let name = bill.name.clone();

        let state = std::mem::take(&mut self.gamification);
        self.gamification = register_bill_paid(state, &name, on_time, now);
        self.refresh(today);
        Ok(on_time)
    }

    pub fn add_member(&mut self, member: Member) -> bool {
        upsert_by_id(&mut self.members, member)
    }

    pub fn remove_member(&mut self, id: &str) -> Option<Member> {
        remove_by_id(&mut self.members, id)
    }

    /// Household points plus every member's points.
    pub fn team_score(&self) -> u64 {
        self.members
            .iter()
            .fold(self.gamification.points, |total, member| total.saturating_add(member.points))
    }

    pub fn acknowledge_reminder(&mut self, now: DateTime<Utc>) {
        let state = std::mem::take(&mut self.gamification);
        self.gamification = register_reminder_response(state, now);
    }

    /// Daily re-evaluation: badges first, then the streak. The streak part
    /// is a no-op when it already ran for `today`.
    pub fn refresh(&mut self, today: NaiveDate) {
        self.reevaluate_badges();
        let issues = has_issues(&self.inventory, &self.bills, today);
        let state = std::mem::take(&mut self.gamification);
        self.gamification = update_streak(state, issues, today);
    }

    pub fn health(&self, today: NaiveDate) -> HouseholdHealth {
        household_health(&self.inventory, &self.bills, today)
    }

    pub fn low_items(&self) -> Vec<&InventoryItem> {
        low_inventory_items(&self.inventory)
    }

    pub fn upcoming_bills(&self, today: NaiveDate) -> Vec<&Bill> {
        upcoming_bills(&self.bills, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::MemberRole;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn new_item_then_restock() {
        let mut tracker = HouseholdTracker::default();
        assert!(tracker.upsert_item(InventoryItem::new("w", "Water", 10.0, 2.0), now(), today()).unwrap());
        assert!(!tracker.upsert_item(InventoryItem::new("w", "Water", 20.0, 2.0), now(), today()).unwrap());

        assert_eq!(tracker.inventory.len(), 1);
        assert_eq!(tracker.inventory[0].quantity, 20.0);
        assert_eq!(tracker.gamification.points, 16);
        assert_eq!(tracker.gamification.counters.essentials_tracked, 1);
        assert_eq!(tracker.gamification.history[0].message, "Earned 6 points for restocking Water.");
        // Water has 10 days of supply, so nothing is low.
        assert!(tracker.gamification.has_badge("Preparedness Pro"));
    }

    #[test]
    fn three_on_time_payments_unlock_utility_master() {
        let mut tracker = HouseholdTracker::default();
        for (id, name) in [("r", "Rent"), ("p", "Power"), ("i", "Internet")] {
            tracker.upsert_bill(Bill::new(id, name, 50.0).due_on(today() + Duration::days(2)), today()).unwrap();
        }

        for id in ["r", "p"] {
            assert!(tracker.mark_bill_paid(id, now(), today()).unwrap());
        }
        assert!(!tracker.gamification.has_badge("Utility Master"));

        assert!(tracker.mark_bill_paid("i", now(), today()).unwrap());
        assert_eq!(tracker.gamification.points, 45);
        assert_eq!(tracker.gamification.counters.bills_paid_on_time, 3);
        assert!(tracker.gamification.has_badge("Utility Master"));
        assert!(tracker.bills.iter().all(|b| b.last_paid_date == Some(now())));
    }

    #[test]
    fn late_or_unscheduled_payment_earns_nothing() {
        let mut tracker = HouseholdTracker::default();
        tracker.upsert_bill(Bill::new("late", "Internet", 60.0).due_on(today() - Duration::days(1)), today()).unwrap();
        tracker.upsert_bill(Bill::new("open", "Gym", 30.0), today()).unwrap();

        assert!(!tracker.mark_bill_paid("late", now(), today()).unwrap());
        assert!(!tracker.mark_bill_paid("open", now(), today()).unwrap());
        assert_eq!(tracker.gamification.points, 0);
        assert!(tracker.gamification.history.is_empty());
        // The due date is left alone.
        assert_eq!(tracker.bills[0].due_date, Some(today() - Duration::days(1)));
        assert_eq!(tracker.bills[0].last_paid_date, Some(now()));
    }

    #[test]
    fn due_today_counts_as_on_time() {
        let mut tracker = HouseholdTracker::default();
        tracker.upsert_bill(Bill::new("r", "Rent", 900.0).due_on(today()), today()).unwrap();
        assert!(tracker.mark_bill_paid("r", now(), today()).unwrap());
    }

    #[test]
    fn paying_unknown_bill_is_an_error() {
        let mut tracker = HouseholdTracker::default();
        let err = tracker.mark_bill_paid("missing", now(), today()).unwrap_err();
        assert!(err.to_string().contains("missing"));
        assert_eq!(tracker, HouseholdTracker::default());
    }

    #[test]
    fn delete_keeps_earned_badges() {
        let mut tracker = HouseholdTracker::default();
        tracker
            .upsert_item(InventoryItem::new("w", "Water", 10.0, 1.0), now(), today())
            .unwrap();
        assert!(tracker.gamification.has_badge("Preparedness Pro"));

        assert!(tracker.delete_item("w", today()).is_some());
        assert!(tracker.delete_item("w", today()).is_none());
        assert!(tracker.inventory.is_empty());
        assert!(tracker.gamification.has_badge("Preparedness Pro"));
    }

    #[test]
    fn team_score_sums_members() {
        let mut tracker = HouseholdTracker::default();
        tracker.gamification.points = 40;
        let mut ana = Member::new("a", "Ana", "ana@example.com", MemberRole::Scout);
        ana.points = 25;
        tracker.add_member(ana);
        tracker.add_member(Member::new("b", "Bo", "bo@example.com", MemberRole::Guardian));
        assert_eq!(tracker.team_score(), 65);

        assert!(tracker.remove_member("a").is_some());
        assert_eq!(tracker.team_score(), 40);
    }

    #[test]
    fn first_mutation_of_the_day_evaluates_the_streak() {
        let mut tracker = HouseholdTracker::default();
        tracker
            .upsert_item(InventoryItem::new("w", "Water", 10.0, 1.0), now(), today())
            .unwrap();

        assert_eq!(tracker.gamification.streak.current, 1);
        assert_eq!(tracker.gamification.streak.last_evaluated_date, Some(today()));
    }

    #[test]
    fn streak_runs_once_per_day_across_mutations() {
        let mut tracker = HouseholdTracker::default();
        tracker
            .upsert_item(InventoryItem::new("w", "Water", 10.0, 1.0), now(), today())
            .unwrap();
        tracker.refresh(today());
        // A low item later the same day does not undo today's evaluation.
        tracker
            .upsert_item(InventoryItem::new("m", "Milk", 1.0, 1.0), now(), today())
            .unwrap();
        assert_eq!(tracker.gamification.streak.current, 1);

        let tomorrow = today() + Duration::days(1);
        tracker.refresh(tomorrow);
        assert_eq!(tracker.gamification.streak.current, 0);
        assert_eq!(tracker.gamification.streak.best, 1);

        // Clearing the shortage the next day is already too late for it.
        assert!(tracker.delete_item("m", tomorrow).is_some());
        assert_eq!(tracker.gamification.streak.current, 0);
    }

    #[test]
    fn bill_mutations_evaluate_the_streak() {
        let mut tracker = HouseholdTracker::default();
        tracker
            .upsert_bill(Bill::new("r", "Rent", 900.0).due_on(today() - Duration::days(1)), today())
            .unwrap();
        assert_eq!(tracker.gamification.streak.current, 0);
        assert_eq!(tracker.gamification.streak.last_evaluated_date, Some(today()));

        let tomorrow = today() + Duration::days(1);
        assert!(tracker.delete_bill("r", tomorrow).is_some());
        assert_eq!(tracker.gamification.streak.current, 1);
    }

    #[test]
    fn invalid_records_are_rejected_without_side_effects() {
        let mut tracker = HouseholdTracker::default();
        tracker
            .upsert_item(InventoryItem::new("r", "Rice", 5.0, 1.0), now(), today())
            .unwrap();
        let before = tracker.clone();

        for bad in [
            InventoryItem::new("r", "Rice", f64::INFINITY, 1.0),
            InventoryItem::new("r", "Rice", 5.0, f64::NAN),
            InventoryItem::new("r", "Rice", -1.0, 1.0),
            InventoryItem::new("x", " ", 1.0, 1.0),
        ] {
            let err = tracker.upsert_item(bad, now(), today()).unwrap_err();
            assert!(matches!(
                err,
                crate::error::CoreError::Validation(ValidationError::InvalidValue { .. })
            ));
        }
        for bad in [Bill::new("b", "Rent", f64::NAN), Bill::new("b", "", 10.0)] {
            assert!(tracker.upsert_bill(bad, today()).is_err());
        }
        assert_eq!(tracker, before);
    }

    #[test]
    fn acknowledge_reminder_awards_points() {
        let mut tracker = HouseholdTracker::default();
        tracker.acknowledge_reminder(now());
        assert_eq!(tracker.gamification.points, 8);
        assert_eq!(tracker.gamification.last_reminder_acknowledged, Some(now()));
    }

    #[test]
    fn round_trips_through_database() {
        let db = Database::open_memory().unwrap();
        let mut tracker = HouseholdTracker::default();
        tracker
            .upsert_item(InventoryItem::new("r", "Rice", 2.0, 1.0), now(), today())
            .unwrap();
        tracker.upsert_bill(Bill::new("b", "Rent", 900.0).due_on(today()), today()).unwrap();
        tracker.add_member(Member::new("a", "Ana", "ana@example.com", MemberRole::Strategist));
        tracker.save(&db).unwrap();

        let loaded = HouseholdTracker::load(&db).unwrap();
        assert_eq!(loaded, tracker);
        assert_eq!(loaded.low_items().len(), 1);
        assert_eq!(loaded.upcoming_bills(today()).len(), 1);
        assert_eq!(loaded.health(today()).score, 88);
    }
}
