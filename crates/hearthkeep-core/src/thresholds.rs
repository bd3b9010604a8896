//! Threshold classifiers over inventory and bills.

use chrono::NaiveDate;

use crate::calculations::{days_remaining, days_until_from};
use crate::household::{Bill, InventoryItem};

/// Items with fewer days of supply than this are "low".
pub const LOW_ITEM_THRESHOLD_DAYS: f64 = 3.0;

/// Bills due within this many days (inclusive) are "upcoming".
pub const UPCOMING_BILL_WINDOW_DAYS: i64 = 7;

/// Items whose days remaining is below `threshold`. Items with unknown usage
/// never run out and are never low.
pub fn low_inventory_items_with(items: &[InventoryItem], threshold: f64) -> Vec<&InventoryItem> {
    items
        .iter()
        .filter(|item| days_remaining(item.quantity, item.daily_usage) < threshold)
        .collect()
}

/// [`low_inventory_items_with`] at [`LOW_ITEM_THRESHOLD_DAYS`].
pub fn low_inventory_items(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    low_inventory_items_with(items, LOW_ITEM_THRESHOLD_DAYS)
}

/// Bills due between today and `window` days out, inclusive.
///
/// Overdue and unscheduled bills are excluded.
pub fn upcoming_bills_with(bills: &[Bill], window: i64, today: NaiveDate) -> Vec<&Bill> {
    bills
        .iter()
        .filter(|bill| {
            matches!(days_until_from(bill.due_date, today), Some(days) if (0..=window).contains(&days))
        })
        .collect()
}

/// [`upcoming_bills_with`] at [`UPCOMING_BILL_WINDOW_DAYS`].
pub fn upcoming_bills(bills: &[Bill], today: NaiveDate) -> Vec<&Bill> {
    upcoming_bills_with(bills, UPCOMING_BILL_WINDOW_DAYS, today)
}

/// Bills whose due date has passed.
pub fn overdue_bills(bills: &[Bill], today: NaiveDate) -> Vec<&Bill> {
    bills
        .iter()
        .filter(|bill| matches!(days_until_from(bill.due_date, today), Some(days) if days < 0))
        .collect()
}

/// Any low item or any overdue bill. This is what breaks a streak.
pub fn has_issues(items: &[InventoryItem], bills: &[Bill], today: NaiveDate) -> bool {
    !low_inventory_items(items).is_empty() || !overdue_bills(bills, today).is_empty()
}
