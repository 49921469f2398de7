//! Preferences Repository
//!
//! Persists small UI preferences as key/value rows.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::db::{connection, SharedConnection};
use super::traits::PreferenceStore;
use crate::domain::DomainResult;

pub struct PreferencesRepository {
    conn: SharedConnection,
}

impl PreferencesRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl PreferenceStore for PreferencesRepository {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let value = conn
            .query_row("SELECT value FROM preferences WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, chrono::Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }
}
