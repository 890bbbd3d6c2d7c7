use crate::domain::error::LingoError;
use crate::domain::traits::PreferenceStore;
use async_trait::async_trait;
use std::path::Path;
use tokio_rusqlite::Connection;

const LANGUAGE_KEY: &str = "target_language";

pub async fn init_database(db_path: &Path) -> Result<Connection, LingoError> {
    let db = Connection::open(db_path.to_path_buf()).await?;
    init_schema(&db).await?;
    Ok(db)
}

async fn init_schema(db: &Connection) -> Result<(), LingoError> {
    db.call(|conn| {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    })
    .await?;

    Ok(())
}

/// SQLite-backed preference store
///
/// A single key-value table; the language preference is read once at
/// startup and rewritten on every change.
pub struct SqlitePreferences {
    conn: Connection,
}

impl SqlitePreferences {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// In-memory database, for tests.
    pub async fn open_in_memory() -> Result<Self, LingoError> {
        let db = Connection::open_in_memory().await?;
        init_schema(&db).await?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl PreferenceStore for SqlitePreferences {
    async fn load_language(&self) -> Result<Option<String>, LingoError> {
        load_value(&self.conn, LANGUAGE_KEY).await
    }

    async fn save_language(&self, code: &str) -> Result<(), LingoError> {
        save_value(&self.conn, LANGUAGE_KEY, code).await
    }
}

async fn load_value(db: &Connection, key: &str) -> Result<Option<String>, LingoError> {
    use rusqlite::OptionalExtension;
    use tokio_rusqlite::params;

    let key = key.to_string();
    let value = db
        .call(move |conn| {
            conn.query_row(
                "SELECT value FROM preferences WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
        .await?;

    Ok(value)
}

async fn save_value(db: &Connection, key: &str, value: &str) -> Result<(), LingoError> {
    use tokio_rusqlite::params;

    let key = key.to_string();
    let value = value.to_string();
    let now = chrono::Utc::now().timestamp();

    db.call(move |conn| {
        conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value, updated_at)
             VALUES (?, ?, ?)",
            params![key, value, now],
        )
    })
    .await?;

    Ok(())
}
