use clap::Subcommand;
use hearthkeep_core::assistant::{clear_api_key, has_stored_api_key, store_api_key, API_KEY_ENV};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the assistant API key in the OS keyring
    Login {
        /// API key
        #[arg(long)]
        key: String,
    },
    /// Remove the stored API key
    Logout,
    /// Check where the API key comes from
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Login { key } => {
            store_api_key(&key)?;
            println!("Assistant API key stored.");
        }
        AuthAction::Logout => {
            clear_api_key()?;
            println!("Assistant API key removed.");
        }
        AuthAction::Status => {
            let from_env = std::env::var(API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty());
            if from_env {
                println!("Assistant: key from {API_KEY_ENV}");
            } else if has_stored_api_key() {
                println!("Assistant: key stored in keyring");
            } else {
                println!("Assistant: not configured");
            }
        }
    }
    Ok(())
}
