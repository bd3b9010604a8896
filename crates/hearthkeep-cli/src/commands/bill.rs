//! Bill commands.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use hearthkeep_core::calculations::{days_until_from, parse_date, today};
use hearthkeep_core::thresholds::{overdue_bills, upcoming_bills_with};
use hearthkeep_core::{Bill, Config, ValidationError};

use super::{new_id, open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum BillAction {
    /// Track a bill
    Add {
        /// Bill name
        name: String,
        /// Amount due
        #[arg(long)]
        amount: f64,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Mark as recurring
        #[arg(long)]
        recurring: bool,
        /// Explicit id (default: random)
        #[arg(long)]
        id: Option<String>,
    },
    /// Record a payment
    Pay {
        /// Bill ID
        id: String,
    },
    /// Stop tracking a bill
    Remove {
        /// Bill ID
        id: String,
    },
    /// List tracked bills
    List {
        /// Only bills due within the upcoming window
        #[arg(long, conflicts_with = "overdue")]
        upcoming: bool,
        /// Only bills past their due date
        #[arg(long)]
        overdue: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_due(raw: &str) -> Result<NaiveDate, ValidationError> {
    parse_date(raw).ok_or_else(|| ValidationError::InvalidValue {
        field: "due".to_string(),
        message: format!("'{raw}' is not a YYYY-MM-DD date"),
    })
}

fn describe_due(bill: &Bill, today: NaiveDate) -> String {
    match days_until_from(bill.due_date, today) {
        Some(days) if days > 0 => format!("due in {days} day(s)"),
        Some(0) => "due today".to_string(),
        Some(days) => format!("{} day(s) overdue", -days),
        None => "no due date".to_string(),
    }
}

pub fn run(action: BillAction) -> CmdResult {
    let (db, mut tracker) = open_tracker()?;
    let today = today();
    match action {
        BillAction::Add {
            name,
            amount,
            due,
            recurring,
            id,
        } => {
            let id = id.unwrap_or_else(new_id);
            let mut bill = Bill::new(id.clone(), name.clone(), amount).recurring(recurring);
            if let Some(raw) = due {
                bill = bill.due_on(parse_due(&raw)?);
            }
            let is_new = tracker.upsert_bill(bill, today)?;
            tracker.save(&db)?;

            let verb = if is_new { "Bill added" } else { "Bill updated" };
            println!("{verb}: {name} ({id})");
        }
        BillAction::Pay { id } => {
            let before = tracker.gamification.points;
            let on_time = tracker.mark_bill_paid(&id, Utc::now(), today)?;
            tracker.save(&db)?;

            if on_time {
                println!("Paid on time: +{} points", tracker.gamification.points - before);
            } else {
                println!("Payment recorded (not on time, no points)");
            }
        }
        BillAction::Remove { id } => match tracker.delete_bill(&id, today) {
            Some(bill) => {
                tracker.save(&db)?;
                println!("Bill removed: {}", bill.name);
            }
            None => {
                return Err(ValidationError::NotFound {
                    collection: "bills".to_string(),
                    id,
                }
                .into())
            }
        },
        BillAction::List {
            upcoming,
            overdue,
            json,
        } => {
            let bills: Vec<&Bill> = if upcoming {
                let window = Config::load_or_default().thresholds.upcoming_bill_days;
                upcoming_bills_with(&tracker.bills, window, today)
            } else if overdue {
                overdue_bills(&tracker.bills, today)
            } else {
                tracker.bills.iter().collect()
            };

            if json {
                return print_json(&bills);
            }
            if bills.is_empty() {
                println!("No bills.");
            }
            for bill in bills {
                let recurring = if bill.recurring { "  (recurring)" } else { "" };
                println!(
                    "{}  {}  {:.2}  {}{recurring}",
                    bill.id,
                    bill.name,
                    bill.amount,
                    describe_due(bill, today)
                );
            }
        }
    }
    Ok(())
}
