use serde::{Deserialize, Serialize};

use super::Identified;

/// Household roles offered when adding a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberRole {
    #[default]
    Strategist,
    Quartermaster,
    Scout,
    Guardian,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Strategist => "Strategist",
            MemberRole::Quartermaster => "Quartermaster",
            MemberRole::Scout => "Scout",
            MemberRole::Guardian => "Guardian",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strategist" => Ok(MemberRole::Strategist),
            "quartermaster" => Ok(MemberRole::Quartermaster),
            "scout" => Ok(MemberRole::Scout),
            "guardian" => Ok(MemberRole::Guardian),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// A household member. Points and streak are host-managed display values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub streak: u32,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>, role: MemberRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            points: 0,
            streak: 0,
        }
    }
}

impl Identified for Member {
    fn id(&self) -> &str {
        &self.id
    }
}
