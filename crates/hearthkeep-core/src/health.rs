//! Household health score.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::household::{Bill, InventoryItem};
use crate::thresholds::{low_inventory_items, overdue_bills};

const LOW_ITEM_PENALTY: f64 = 12.0;
const OVERDUE_BILL_PENALTY: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Danger,
    Watch,
    Secure,
}

impl HealthStatus {
    pub fn from_score(score: u8) -> Self {
        if score < 35 {
            HealthStatus::Danger
        } else if score < 70 {
            HealthStatus::Watch
        } else {
            HealthStatus::Secure
        }
    }

    /// Presentation tag for the status.
    pub fn style_hint(&self) -> &'static str {
        match self {
            HealthStatus::Secure => "bg-green-500",
            HealthStatus::Watch => "bg-amber-400",
            HealthStatus::Danger => "bg-red-500",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            HealthStatus::Danger => "danger",
            HealthStatus::Watch => "watch",
            HealthStatus::Secure => "secure",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdHealth {
    pub score: u8,
    pub status: HealthStatus,
    pub style_hint: String,
}

/// Score the household from 0 to 100.
///
/// Each low item costs 12 points and each overdue bill 18.
pub fn household_health(inventory: &[InventoryItem], bills: &[Bill], today: NaiveDate) -> HouseholdHealth {
    let low = low_inventory_items(inventory).len() as f64;
    let overdue = overdue_bills(bills, today).len() as f64;

    let raw = 100.0 - low * LOW_ITEM_PENALTY - overdue * OVERDUE_BILL_PENALTY;
    let score = raw.round().clamp(0.0, 100.0) as u8;
    let status = HealthStatus::from_score(score);

    HouseholdHealth {
        score,
        status,
        style_hint: status.style_hint().to_string(),
    }
}
