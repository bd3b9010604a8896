use clap::{Subcommand, ValueEnum};
use hearthkeep_core::Database;

use super::{print_json, CmdResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show stored preferences
    Show,
    /// Turn dark mode on or off
    DarkMode {
        #[arg(value_enum)]
        state: Toggle,
    },
}

pub fn run(action: PrefsAction) -> CmdResult {
    let db = Database::open()?;
    match action {
        PrefsAction::Show => print_json(&db.load_preferences()?)?,
        PrefsAction::DarkMode { state } => {
            let mut prefs = db.load_preferences()?;
            prefs.dark_mode = matches!(state, Toggle::On);
            db.save_preferences(&prefs)?;
            println!("dark mode {}", if prefs.dark_mode { "on" } else { "off" });
        }
    }
    Ok(())
}
