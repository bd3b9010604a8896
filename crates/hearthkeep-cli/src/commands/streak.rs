use hearthkeep_core::calculations::today;
use hearthkeep_core::gamification::streak_message;

use super::{open_tracker, print_json, CmdResult};

pub fn run(json: bool) -> CmdResult {
    let (db, mut tracker) = open_tracker()?;
    tracker.refresh(today());
    tracker.save(&db)?;
    let state = &tracker.gamification;

    if json {
        return print_json(&serde_json::json!({
            "streak": state.streak,
            "consecutivePreparedDays": state.counters.consecutive_prepared_days,
            "message": streak_message(state),
        }));
    }
    println!("{}", streak_message(state));
    println!("Best: {} day(s)", state.streak.best);
    Ok(())
}
