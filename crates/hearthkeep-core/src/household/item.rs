use serde::{Deserialize, Serialize};

use super::{invalid, Identified};
use crate::calculations::days_remaining;
use crate::error::ValidationError;

/// Where an item is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Pantry,
    Fridge,
    Freezer,
    #[default]
    #[serde(other)]
    Other,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Pantry => "pantry",
            Location::Fridge => "fridge",
            Location::Freezer => "freezer",
            Location::Other => "other",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pantry" => Ok(Location::Pantry),
            "fridge" => Ok(Location::Fridge),
            "freezer" => Ok(Location::Freezer),
            "other" => Ok(Location::Other),
            other => Err(format!(
                "unknown location '{other}' (expected pantry, fridge, freezer or other)"
            )),
        }
    }
}

/// A tracked consumable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    /// Units consumed per day. Zero means unknown.
    #[serde(default)]
    pub daily_usage: f64,
    #[serde(default)]
    pub location: Location,
}

impl InventoryItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: f64, daily_usage: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit: String::new(),
            daily_usage,
            location: Location::Other,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Days of supply left at the current usage rate.
    pub fn days_remaining(&self) -> f64 {
        days_remaining(self.quantity, self.daily_usage)
    }

    /// Reject records that cannot be stored faithfully.
    ///
    /// Zero usage is allowed and means the item never runs out.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidValue`] for a blank name, a negative
    /// or non-finite quantity, or a negative or non-finite usage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(invalid("name", "name is required"));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(invalid("quantity", "must be a non-negative number"));
        }
        if !self.daily_usage.is_finite() || self.daily_usage < 0.0 {
            return Err(invalid("dailyUsage", "must be a non-negative number"));
        }
        Ok(())
    }
}

impl Identified for InventoryItem {
    fn id(&self) -> &str {
        &self.id
    }
}
