use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;

mod schema;
mod store;

pub use schema::SCHEMA_VERSION;
pub use store::KeyValueStore;
#[cfg(test)]
pub use store::MemoryStore;

/// Environment variable overriding the database location
pub const ENV_DB_PATH: &str = "NOTECMD_DB";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database, creating if needed, running migrations
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(path)
    }

    pub fn open_at(path: PathBuf) -> Result<Self> {
        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        tracing::debug!(path = %path.display(), "opened database");

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open in-memory database for testing
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// `NOTECMD_DB` if set, otherwise `<config_dir>/notecmd/notes.db`
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(ENV_DB_PATH) {
            return Ok(PathBuf::from(path));
        }
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("notecmd").join("notes.db"))
    }

    /// Apply every migration newer than the stored `user_version`, each in
    /// its own transaction together with the version bump.
    fn migrate(&self) -> Result<()> {
        let current = self.schema_version()?;

        for (index, sql) in schema::MIGRATIONS.iter().enumerate() {
            let version = index as i32 + 1;
            if version <= current {
                continue;
            }
            let tx = self.conn.unchecked_transaction()?;
            tx.execute_batch(sql)?;
            tx.pragma_update(None, "user_version", version)?;
            tx.commit()?;
            tracing::info!(version, "applied schema migration");
        }

        Ok(())
    }

    fn schema_version(&self) -> Result<i32> {
        let version = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_memory() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_tables_exist() {
        let db = Database::open_memory().unwrap();

        let tables: Vec<String> = db
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(tables, vec!["kv_store".to_string()]);
    }

    #[test]
    fn test_reopen_keeps_values_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("notes.db");

        {
            let db = Database::open_at(path.clone()).unwrap();
            db.set("darkMode", "true").unwrap();
        }

        // Reopening at the current version runs no migration
        let db = Database::open_at(path).unwrap();
        assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
        assert_eq!(db.get("darkMode").unwrap().as_deref(), Some("true"));
    }
}
