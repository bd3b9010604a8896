//! Household member commands.

use clap::Subcommand;
use hearthkeep_core::{Member, MemberRole, ValidationError};

use super::{new_id, open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum MemberAction {
    /// Add a member
    Add {
        /// Member name
        name: String,
        /// Contact email
        #[arg(long, default_value = "")]
        email: String,
        /// strategist, quartermaster, scout or guardian
        #[arg(long, default_value = "strategist")]
        role: MemberRole,
    },
    /// Remove a member
    Remove {
        /// Member ID
        id: String,
    },
    /// List members and the team score
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: MemberAction) -> CmdResult {
    let (db, mut tracker) = open_tracker()?;
    match action {
        MemberAction::Add { name, email, role } => {
            let id = new_id();
            tracker.add_member(Member::new(id.clone(), name.clone(), email, role));
            tracker.save(&db)?;
            println!("Member added: {name} ({id})");
        }
        MemberAction::Remove { id } => match tracker.remove_member(&id) {
            Some(member) => {
                tracker.save(&db)?;
                println!("Member removed: {}", member.name);
            }
            None => {
                return Err(ValidationError::NotFound {
                    collection: "members".to_string(),
                    id,
                }
                .into())
            }
        },
        MemberAction::List { json } => {
            if json {
                return print_json(&serde_json::json!({
                    "members": tracker.members,
                    "teamScore": tracker.team_score(),
                }));
            }
            for member in &tracker.members {
                println!(
                    "{}  {}  {}  {} pts  {}-day streak",
                    member.id, member.name, member.role, member.points, member.streak
                );
            }
            println!("Team score: {}", tracker.team_score());
        }
    }
    Ok(())
}
