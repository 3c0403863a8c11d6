/// Schema version recorded in `PRAGMA user_version` once all migrations ran
pub const SCHEMA_VERSION: i32 = MIGRATIONS.len() as i32;

/// Ordered migrations. Entry `n` moves the database from version `n` to `n + 1`.
pub const MIGRATIONS: &[&str] = &[SCHEMA_V1];

/// V1: the string key-value table every stored value lives in
/// (auth, darkMode, notes_<identity>, ai_* settings)
const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
