//! Preferences: small key/value settings persisted next to the records.

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::helpers::parse_datetime;
use crate::store::PortalStore;

/// Preference key holding the last completed sync time (RFC 3339).
pub const LAST_UPDATED_KEY: &str = "last_updated";

impl PortalStore {
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.db()
            .writer()
            .execute(
                "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                libsql::params![key, value],
            )
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT value FROM preferences WHERE key = ?1", [key])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    /// Record `at` as the last completed sync time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub async fn record_last_updated(&self, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.set_preference(LAST_UPDATED_KEY, &at.to_rfc3339()).await
    }

    /// Last completed sync time, if any sync has completed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or the stored value is not a datetime.
    pub async fn last_updated(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        self.get_preference(LAST_UPDATED_KEY)
            .await?
            .as_deref()
            .map(parse_datetime)
            .transpose()
    }
}
