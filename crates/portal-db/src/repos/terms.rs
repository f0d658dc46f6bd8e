//! Term enumeration for per-term fan-out.

use portal_core::entities::Term;

use crate::error::StoreError;
use crate::store::PortalStore;

impl PortalStore {
    /// Every known term, ordered by code.
    ///
    /// Grades and Course pipelines read this before fetching, so it reflects
    /// whatever the last committed Terms sync stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn known_terms(&self) -> Result<Vec<Term>, StoreError> {
        self.read_all::<Term>().await
    }

    /// Codes of every known term, ordered.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn term_codes(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .known_terms()
            .await?
            .into_iter()
            .map(|t| t.code)
            .collect())
    }
}
