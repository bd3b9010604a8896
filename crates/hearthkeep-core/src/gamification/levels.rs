use serde::{Deserialize, Serialize};

/// One tier of the level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub name: &'static str,
    pub min_points: u64,
}

/// Ascending by `min_points`; the first tier starts at zero.
pub const LEVELS: [Level; 4] = [
    Level { name: "Bronze Caretaker", min_points: 0 },
    Level { name: "Silver Steward", min_points: 200 },
    Level { name: "Gold Guardian", min_points: 500 },
    Level { name: "Platinum Protector", min_points: 900 },
];

/// Progress toward the next tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub label: String,
    /// Percent of the current tier's range, 0..=100.
    pub progress: u8,
    pub next_label: String,
    /// `None` at the top tier.
    pub next_threshold: Option<u64>,
}

fn tier_index(points: u64) -> usize {
    LEVELS
        .iter()
        .rposition(|level| points >= level.min_points)
        .unwrap_or(0)
}

/// Name of the highest tier whose minimum is at most `points`.
pub fn level_for_points(points: u64) -> &'static str {
    LEVELS[tier_index(points)].name
}

pub fn level_progress(points: u64) -> LevelProgress {
    let index = tier_index(points);
    let current = LEVELS[index];

    let Some(next) = LEVELS.get(index + 1) else {
        return LevelProgress {
            label: current.name.to_string(),
            progress: 100,
            next_label: "Max level".to_string(),
            next_threshold: None,
        };
    };

    let range = (next.min_points - current.min_points) as f64;
    let progress = ((points - current.min_points) as f64 / range * 100.0)
        .round()
        .min(100.0) as u8;

    LevelProgress {
        label: current.name.to_string(),
        progress,
        next_label: next.name.to_string(),
        next_threshold: Some(next.min_points),
    }
}
