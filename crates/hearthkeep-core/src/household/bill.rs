use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{invalid, Identified};
use crate::calculations::parse_date;
use crate::error::ValidationError;

/// A bill with an optional due date.
///
/// Paying a bill records `last_paid_date`; the due date is left alone and
/// recurring bills are not regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub last_paid_date: Option<DateTime<Utc>>,
}

impl Bill {
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            due_date: None,
            recurring: false,
            last_paid_date: None,
        }
    }

    pub fn due_on(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    /// # Errors
    /// Returns [`ValidationError::InvalidValue`] for a blank name or a
    /// negative or non-finite amount.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(invalid("name", "name is required"));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(invalid("amount", "must be a non-negative number"));
        }
        Ok(())
    }
}

impl Identified for Bill {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Unparseable or empty due dates mean "unscheduled" rather than a load failure.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}
