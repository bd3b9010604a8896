//! Inventory commands.

use chrono::Utc;
use clap::Subcommand;
use hearthkeep_core::calculations::today;
use hearthkeep_core::thresholds::low_inventory_items_with;
use hearthkeep_core::{Config, InventoryItem, Location, ValidationError};

use super::{format_days, new_id, open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ItemAction {
    /// Track a new item
    Add {
        /// Item name
        name: String,
        /// Quantity on hand
        #[arg(long)]
        quantity: f64,
        /// Amount used per day (0 = never runs out)
        #[arg(long, default_value = "0")]
        usage: f64,
        /// Display unit (e.g. "kg", "bottles")
        #[arg(long, default_value = "")]
        unit: String,
        /// pantry, fridge, freezer or other
        #[arg(long, default_value = "other")]
        location: Location,
        /// Explicit id (default: random)
        #[arg(long)]
        id: Option<String>,
    },
    /// Update quantity or usage of a tracked item
    Restock {
        /// Item ID
        id: String,
        /// New quantity on hand
        #[arg(long)]
        quantity: f64,
        /// New daily usage
        #[arg(long)]
        usage: Option<f64>,
    },
    /// Stop tracking an item
    Remove {
        /// Item ID
        id: String,
    },
    /// List tracked items
    List {
        /// Only items running low
        #[arg(long)]
        low: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ItemAction) -> CmdResult {
    let (db, mut tracker) = open_tracker()?;
    let today = today();
    match action {
        ItemAction::Add {
            name,
            quantity,
            usage,
            unit,
            location,
            id,
        } => {
            let id = id.unwrap_or_else(new_id);
            let item = InventoryItem::new(id.clone(), name.clone(), quantity, usage)
                .with_unit(unit)
                .with_location(location);
            let before = tracker.gamification.points;
            let is_new = tracker.upsert_item(item, Utc::now(), today)?;
            tracker.save(&db)?;

            let verb = if is_new { "Item added" } else { "Item updated" };
            println!("{verb}: {name} ({id})");
            println!("+{} points", tracker.gamification.points - before);
        }
        ItemAction::Restock { id, quantity, usage } => {
            let mut item = tracker
                .inventory
                .iter()
                .find(|item| item.id == id)
                .cloned()
                .ok_or_else(|| ValidationError::NotFound {
                    collection: "inventory".to_string(),
                    id: id.clone(),
                })?;
            item.quantity = quantity;
            if let Some(usage) = usage {
                item.daily_usage = usage;
            }
            let name = item.name.clone();
            let before = tracker.gamification.points;
            tracker.upsert_item(item, Utc::now(), today)?;
            tracker.save(&db)?;

            println!("Item restocked: {name}");
            println!("+{} points", tracker.gamification.points - before);
        }
        ItemAction::Remove { id } => match tracker.delete_item(&id, today) {
            Some(item) => {
                tracker.save(&db)?;
                println!("Item removed: {}", item.name);
            }
            None => {
                return Err(ValidationError::NotFound {
                    collection: "inventory".to_string(),
                    id,
                }
                .into())
            }
        },
        ItemAction::List { low, json } => {
            let items: Vec<&InventoryItem> = if low {
                let threshold = Config::load_or_default().thresholds.low_item_days;
                low_inventory_items_with(&tracker.inventory, threshold)
            } else {
                tracker.inventory.iter().collect()
            };

            if json {
                return print_json(&items);
            }
            if items.is_empty() {
                println!("No items.");
            }
            for item in items {
                println!(
                    "{}  {}  {} {}  [{}]  {} day(s) left",
                    item.id,
                    item.name,
                    item.quantity,
                    item.unit,
                    item.location,
                    format_days(item.days_remaining())
                );
            }
        }
    }
    Ok(())
}
