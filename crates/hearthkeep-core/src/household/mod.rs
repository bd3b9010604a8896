//! Household records: inventory, bills, members, preferences.
//!
//! The host owns these collections. Mutation is replace-or-append by id;
//! nothing here has a lifecycle of its own.

mod bill;
mod item;
mod member;

pub use bill::Bill;
pub use item::{InventoryItem, Location};
pub use member::{Member, MemberRole};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Records addressable by an opaque string id.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Replace the record with the same id in place, or append it.
///
/// Returns `true` when the record was new.
pub fn upsert_by_id<T: Identified>(records: &mut Vec<T>, record: T) -> bool {
    match records.iter().position(|existing| existing.id() == record.id()) {
        Some(index) => {
            records[index] = record;
            false
        }
        None => {
            records.push(record);
            true
        }
    }
}

/// Remove the record with `id`. Returns the removed record, if any.
pub fn remove_by_id<T: Identified>(records: &mut Vec<T>, id: &str) -> Option<T> {
    let index = records.iter().position(|existing| existing.id() == id)?;
    Some(records.remove(index))
}

/// UI preferences persisted next to the household data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}
