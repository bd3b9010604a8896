//! Household overview. Also runs the daily badge and streak re-evaluation.

use hearthkeep_core::calculations::today;
use hearthkeep_core::gamification::{level_progress, streak_message};

use super::{format_days, open_tracker, print_json, CmdResult};

pub fn run(json: bool) -> CmdResult {
    let (db, mut tracker) = open_tracker()?;
    let today = today();
    tracker.refresh(today);
    tracker.save(&db)?;

    let health = tracker.health(today);
    let state = &tracker.gamification;
    let progress = level_progress(state.points);
    let low = tracker.low_items();
    let upcoming = tracker.upcoming_bills(today);

    if json {
        return print_json(&serde_json::json!({
            "health": health,
            "points": state.points,
            "level": progress,
            "streak": state.streak,
            "badges": state.badges,
            "teamScore": tracker.team_score(),
            "lowItems": low,
            "upcomingBills": upcoming,
        }));
    }

    println!("Health: {} ({})", health.score, health.status);
    println!("Points: {}  Team score: {}", state.points, tracker.team_score());
    match progress.next_threshold {
        Some(next) => println!(
            "Level: {} ({}% to {} at {next})",
            progress.label, progress.progress, progress.next_label
        ),
        None => println!("Level: {} ({})", progress.label, progress.next_label),
    }
    println!("Streak: {}", streak_message(state));
    if state.badges.is_empty() {
        println!("Badges: none yet");
    } else {
        println!("Badges: {}", state.badges.join(", "));
    }

    if !low.is_empty() {
        println!("Low supplies:");
        for item in &low {
            println!("  {} ({}): {} day(s) left", item.name, item.location, format_days(item.days_remaining()));
        }
    }
    if !upcoming.is_empty() {
        println!("Upcoming bills:");
        for bill in &upcoming {
            let due = bill
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            println!("  {} {:.2} due {due}", bill.name, bill.amount);
        }
    }
    Ok(())
}
