use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "hearthkeep", version, about = "Hearthkeep household tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inventory management
    Item {
        #[command(subcommand)]
        action: commands::item::ItemAction,
    },
    /// Bill management
    Bill {
        #[command(subcommand)]
        action: commands::bill::BillAction,
    },
    /// Household member management
    Member {
        #[command(subcommand)]
        action: commands::member::MemberAction,
    },
    /// Household health, points and badges
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Recent point awards
    History {
        /// Number of entries to show
        #[arg(long)]
        limit: Option<usize>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Daily streak
    Streak {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Daily reminders
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },
    /// Ask the household assistant
    Ask {
        /// Question for the assistant
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// UI preferences
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
    /// Assistant API key management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HEARTHKEEP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Item { action } => commands::item::run(action),
        Commands::Bill { action } => commands::bill::run(action),
        Commands::Member { action } => commands::member::run(action),
        Commands::Status { json } => commands::status::run(json),
        Commands::History { limit, json } => commands::history::run(limit, json),
        Commands::Streak { json } => commands::streak::run(json),
        Commands::Remind { action } => commands::remind::run(action),
        Commands::Ask { question } => commands::ask::run(&question.join(" ")),
        Commands::Config { action } => commands::config::run(action),
        Commands::Prefs { action } => commands::prefs::run(action),
        Commands::Auth { action } => commands::auth::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
