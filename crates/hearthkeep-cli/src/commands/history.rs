use hearthkeep_core::HistoryEntry;

use super::{open_tracker, print_json, CmdResult};

pub fn run(limit: Option<usize>, json: bool) -> CmdResult {
    let (_db, tracker) = open_tracker()?;
    let history = &tracker.gamification.history;
    let entries: &[HistoryEntry] = match limit {
        Some(limit) => &history[..limit.min(history.len())],
        None => history,
    };

    if json {
        return print_json(entries);
    }
    if entries.is_empty() {
        println!("No points earned yet.");
    }
    for entry in entries {
        println!(
            "{}  +{:<3} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.points,
            entry.message
        );
    }
    Ok(())
}
