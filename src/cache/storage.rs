//! SQLite table of cached account responses
//!
//! One row per (session scope, endpoint). Bodies are small JSON documents and
//! live inline as BLOBs. Expired rows are swept on every write.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CacheError;

/// Bump when the table layout changes; older tables are dropped on open
const SCHEMA_VERSION: i32 = 1;

const DB_FILE: &str = "responses.sqlite";

type Result<T> = std::result::Result<T, CacheError>;

/// Response table handle
pub struct CacheStorage {
    conn: Connection,
}

/// Cached rows belonging to one session scope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSummary {
    pub scope: String,
    pub entries: usize,
    pub fresh: usize,
    pub bytes: usize,
    pub endpoints: Vec<String>,
    /// Unix seconds of the most recent write
    pub last_stored: i64,
}

impl CacheStorage {
    /// Open the table in the per-user cache directory
    pub fn open() -> Result<Self> {
        Self::open_at(&Self::default_dir()?)
    }

    /// Per-user cache directory (`$XDG_CACHE_HOME/acctctl` on Linux)
    pub fn default_dir() -> Result<PathBuf> {
        Ok(dirs::cache_dir().ok_or(CacheError::NoHome)?.join("acctctl"))
    }

    pub fn open_at(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .map_err(|e| CacheError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;

        let conn = Connection::open(dir.join(DB_FILE))?;
        let version: i32 = conn.pragma_query_value(None, "user_version", |r| r.get(0))?;
        if version != 0 && version != SCHEMA_VERSION {
            log::info!("Dropping response cache with schema version {}", version);
            conn.execute_batch("DROP TABLE IF EXISTS responses;")?;
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS responses (
                cache_key TEXT PRIMARY KEY NOT NULL,
                scope TEXT NOT NULL,
                endpoint TEXT NOT NULL,
                body BLOB NOT NULL,
                stored_at INTEGER NOT NULL,
                expires_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_responses_scope ON responses(scope);
            "#,
        )?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn })
    }

    /// Body stored under `key`, unless it has expired
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM responses WHERE cache_key = ?1 AND expires_at > ?2",
                params![key, Utc::now().timestamp()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(body)
    }

    pub fn put(
        &self,
        key: &str,
        scope: &str,
        endpoint: &str,
        body: &[u8],
        ttl: Duration,
    ) -> Result<()> {
        let now = Utc::now().timestamp();
        let expires_at = now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));

        self.conn
            .execute("DELETE FROM responses WHERE expires_at <= ?1", [now])?;
        self.conn.execute(
            "INSERT OR REPLACE INTO responses
             (cache_key, scope, endpoint, body, stored_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![key, scope, endpoint, body, now, expires_at],
        )?;
        Ok(())
    }

    /// Delete every row; returns how many were removed
    pub fn clear_all(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM responses", [])?)
    }

    /// Delete the rows of one session scope
    pub fn clear_scope(&self, scope: &str) -> Result<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM responses WHERE scope = ?1", [scope])?)
    }

    /// Per-scope summary, most recently written first
    pub fn summarize(&self) -> Result<Vec<ScopeSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT scope, COUNT(*), SUM(expires_at > ?1), SUM(LENGTH(body)),
                    GROUP_CONCAT(DISTINCT endpoint), MAX(stored_at)
             FROM responses
             GROUP BY scope
             ORDER BY MAX(stored_at) DESC",
        )?;

        let rows = stmt.query_map([Utc::now().timestamp()], |row| {
            let endpoints: Option<String> = row.get(4)?;
            Ok(ScopeSummary {
                scope: row.get(0)?,
                entries: row.get::<_, i64>(1)? as usize,
                fresh: row.get::<_, i64>(2)? as usize,
                bytes: row.get::<_, i64>(3)? as usize,
                endpoints: endpoints
                    .map(|e| e.split(',').map(str::to_string).collect())
                    .unwrap_or_default(),
                last_stored: row.get(5)?,
            })
        })?;

        let summaries = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(summaries)
    }
}
