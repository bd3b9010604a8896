use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// What a history entry was awarded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RewardKind {
    InventoryAdd,
    InventoryRestock,
    BillPaidOnTime,
    ReminderResponse,
    /// Ad hoc award; only ever carries an explicit amount.
    #[serde(other)]
    Bonus,
}

impl RewardKind {
    /// Fixed reward for this kind when no explicit amount is given.
    pub fn default_points(&self) -> u64 {
        match self {
            RewardKind::InventoryAdd => 10,
            RewardKind::InventoryRestock => 6,
            RewardKind::BillPaidOnTime => 15,
            RewardKind::ReminderResponse => 8,
            RewardKind::Bonus => 0,
        }
    }
}

impl std::fmt::Display for RewardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RewardKind::InventoryAdd => "inventoryAdd",
            RewardKind::InventoryRestock => "inventoryRestock",
            RewardKind::BillPaidOnTime => "billPaidOnTime",
            RewardKind::ReminderResponse => "reminderResponse",
            RewardKind::Bonus => "bonus",
        })
    }
}

/// Input to [`award_points`](super::award_points).
#[derive(Debug, Clone, PartialEq)]
pub struct Award {
    pub kind: RewardKind,
    /// Overrides the per-kind reward when set.
    pub amount: Option<u64>,
    pub message: String,
    pub metadata: BTreeMap<String, String>,
}

impl Award {
    pub fn new(kind: RewardKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            amount: None,
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Points this award is worth.
    pub fn delta(&self) -> u64 {
        self.amount.unwrap_or_else(|| self.kind.default_points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_table() {
        assert_eq!(RewardKind::InventoryAdd.default_points(), 10);
        assert_eq!(RewardKind::InventoryRestock.default_points(), 6);
        assert_eq!(RewardKind::BillPaidOnTime.default_points(), 15);
        assert_eq!(RewardKind::ReminderResponse.default_points(), 8);
    }

    #[test]
    fn explicit_amount_wins() {
        assert_eq!(Award::new(RewardKind::InventoryAdd, "").amount(3).delta(), 3);
        assert_eq!(Award::new(RewardKind::InventoryAdd, "").amount(0).delta(), 0);
        assert_eq!(Award::new(RewardKind::Bonus, "").delta(), 0);
    }

    #[test]
    fn unknown_kind_restores_as_bonus() {
        let kind: RewardKind = serde_json::from_str("\"questComplete\"").unwrap();
        assert_eq!(kind, RewardKind::Bonus);
        let kind: RewardKind = serde_json::from_str("\"billPaidOnTime\"").unwrap();
        assert_eq!(kind, RewardKind::BillPaidOnTime);
    }
}
