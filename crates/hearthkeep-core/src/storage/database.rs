//! SQLite key-value store for household snapshots.
//!
//! Each collection is stored as one JSON document under a fixed key.
//! Reads never fail on bad JSON: a malformed value is logged and the
//! documented default is returned instead.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::data_dir;
use crate::calculations::parse_date;
use crate::error::{DatabaseError, Result};
use crate::gamification::GamificationState;
use crate::household::{Bill, InventoryItem, Member, Preferences};
use crate::reminders::ReminderLedger;

/// Keys of the kv table.
pub mod keys {
    pub const INVENTORY: &str = "inventory";
    pub const BILLS: &str = "bills";
    pub const MEMBERS: &str = "members";
    pub const GAMIFICATION: &str = "gamification";
    pub const PREFERENCES: &str = "preferences";
    pub const LAST_REMINDER: &str = "last_reminder";
}

/// SQLite database holding the household's kv snapshots.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data dir>/hearthkeep.db`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("hearthkeep.db"))
    }

    /// Open (or create) a database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Read a JSON document, falling back to `fallback` when it is missing
    /// or cannot be parsed.
    pub fn read_json<T: DeserializeOwned>(&self, key: &str, fallback: T) -> Result<T> {
        let Some(raw) = self.kv_get(key)? else {
            return Ok(fallback);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed stored value, using default");
                Ok(fallback)
            }
        }
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.kv_set(key, &raw)?;
        Ok(())
    }

    pub fn load_inventory(&self) -> Result<Vec<InventoryItem>> {
        self.read_json(keys::INVENTORY, Vec::new())
    }

    pub fn save_inventory(&self, items: &[InventoryItem]) -> Result<()> {
        self.write_json(keys::INVENTORY, items)
    }

    pub fn load_bills(&self) -> Result<Vec<Bill>> {
        self.read_json(keys::BILLS, Vec::new())
    }

    pub fn save_bills(&self, bills: &[Bill]) -> Result<()> {
        self.write_json(keys::BILLS, bills)
    }

    pub fn load_members(&self) -> Result<Vec<Member>> {
        self.read_json(keys::MEMBERS, Vec::new())
    }

    pub fn save_members(&self, members: &[Member]) -> Result<()> {
        self.write_json(keys::MEMBERS, members)
    }

    /// Load the gamification snapshot, normalized via
    /// [`GamificationState::restore`].
    pub fn load_gamification(&self) -> Result<GamificationState> {
        Ok(self
            .read_json(keys::GAMIFICATION, GamificationState::default())?
            .restore())
    }

    pub fn save_gamification(&self, state: &GamificationState) -> Result<()> {
        self.write_json(keys::GAMIFICATION, state)
    }

    pub fn load_preferences(&self) -> Result<Preferences> {
        self.read_json(keys::PREFERENCES, Preferences::default())
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.write_json(keys::PREFERENCES, preferences)
    }
}

impl ReminderLedger for Database {
    fn last_reminder_date(&self) -> Result<Option<NaiveDate>> {
        let raw: Option<String> = self.read_json(keys::LAST_REMINDER, None)?;
        Ok(raw.as_deref().and_then(parse_date))
    }

    fn set_last_reminder_date(&mut self, date: NaiveDate) -> Result<()> {
        self.write_json(keys::LAST_REMINDER, &date.format("%Y-%m-%d").to_string())
    }
}
