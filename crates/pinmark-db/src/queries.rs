use anyhow::Result;
use pinmark_types::Location;
use rusqlite::Connection;

use crate::Database;

/// Key holding the full location list.
pub const LOCATIONS_KEY: &str = "locations";

impl Database {
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| query_value(conn, key))
    }

    /// Replaces the value stored under `key` in a single statement.
    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
                (key, value),
            )?;
            tx.commit()?;
            Ok(())
        })
    }

    // -- Locations --

    pub fn load_locations(&self) -> Result<Option<Vec<Location>>> {
        match self.get_value(LOCATIONS_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save_locations(&self, locations: &[Location]) -> Result<()> {
        let raw = serde_json::to_string(locations)?;
        self.set_value(LOCATIONS_KEY, &raw)
    }
}

fn query_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;

    let value = stmt
        .query_row([key], |row| row.get(0))
        .optional()?;

    Ok(value)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
