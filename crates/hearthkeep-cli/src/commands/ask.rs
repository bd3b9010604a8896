//! One-shot question to the household assistant.

use chrono::Utc;
use hearthkeep_core::assistant::{build_context, AssistantClient, ChatMessage, ChatRequest, Standing};
use hearthkeep_core::calculations::today;
use hearthkeep_core::Config;

use super::{open_tracker, CmdResult};

pub fn run(question: &str) -> CmdResult {
    let config = Config::load()?;
    let (db, mut tracker) = open_tracker()?;

    let state = &tracker.gamification;
    let context = build_context(
        &tracker.inventory,
        &tracker.bills,
        Standing {
            points: state.points,
            streak: state.streak.current,
            level: &state.level,
        },
        today(),
    );
    let request = ChatRequest::with_context(&config.assistant, context, &[ChatMessage::user(question)]);
    let client = AssistantClient::from_config(&config.assistant)?;

    let rt = tokio::runtime::Runtime::new()?;
    let reply = rt.block_on(client.complete(&request))?;
    println!("{reply}");

    tracker.acknowledge_reminder(Utc::now());
    tracker.save(&db)?;
    Ok(())
}
