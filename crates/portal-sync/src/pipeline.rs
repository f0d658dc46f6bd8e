//! Per-resource fetch → decode → persist pipelines.
//!
//! Every pipeline fetches and decodes everything it needs before opening a
//! store transaction, so a transport or decode failure never touches the
//! store, and a store failure rolls back the whole resource.

use serde::de::DeserializeOwned;
use serde_json::Value;

use portal_config::GatewayConfig;
use portal_core::SyncKind;
use portal_core::entities::{
    CalendarDate, CourseEntry, ExamEntry, FinanceCharge, GradeCourseEntry, GradeEntry,
    ScheduleEntry, Term,
};
use portal_db::{PortalStore, Record, StoreError, SyncTransaction};
use portal_gateway::Gateway;

use crate::decode::{self, Envelope};
use crate::error::SyncError;

/// Where each resource keeps its record array.
#[must_use]
pub const fn envelope(kind: SyncKind) -> Envelope {
    match kind {
        SyncKind::Finance => Envelope::Field("Status"),
        SyncKind::Grades => Envelope::Field("score"),
        SyncKind::Course => Envelope::Field("Courses"),
        SyncKind::Schedule | SyncKind::Exam | SyncKind::Terms | SyncKind::Account => {
            Envelope::Bare
        }
    }
}

/// Collaborators one pipeline run needs.
pub struct PipelineContext<'a, G> {
    pub gateway: &'a G,
    pub store: &'a PortalStore,
    pub config: &'a GatewayConfig,
}

impl<G> Clone for PipelineContext<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for PipelineContext<'_, G> {}

/// Run the pipeline for `kind`. Returns the number of primary records
/// persisted (0 for [`SyncKind::Account`]).
///
/// # Errors
///
/// Returns [`SyncError`] if the fetch, the decode, or the store write fails.
/// Nothing of this resource is committed in that case.
pub async fn run_pipeline<G: Gateway>(
    ctx: PipelineContext<'_, G>,
    kind: SyncKind,
) -> Result<usize, SyncError> {
    let written = match kind {
        SyncKind::Schedule => ctx.replace_dated::<ScheduleEntry>(kind).await?,
        SyncKind::Exam => ctx.replace_dated::<ExamEntry>(kind).await?,
        SyncKind::Finance => ctx.replace_dated::<FinanceCharge>(kind).await?,
        SyncKind::Terms => ctx.upsert_terms().await?,
        SyncKind::Grades => ctx.rebuild_grades().await?,
        SyncKind::Course => ctx.accumulate_courses().await?,
        SyncKind::Account => {
            tracing::debug!("account sync is not available; skipping");
            0
        }
    };
    tracing::info!(%kind, written, "pipeline committed");
    Ok(written)
}

impl<G: Gateway> PipelineContext<'_, G> {
    fn url(&self, kind: SyncKind) -> Result<String, SyncError> {
        self.config
            .endpoint_url(kind)
            .ok_or(SyncError::NoEndpoint(kind))
    }

    async fn fetch_elements(&self, kind: SyncKind, url: &str) -> Result<Vec<Value>, SyncError> {
        let body = self
            .gateway
            .fetch(url)
            .await
            .map_err(|source| SyncError::Transport { kind, source })?;
        decode::elements(&body, envelope(kind)).map_err(|source| SyncError::Decode { kind, source })
    }

    /// Fetch once per known term, tagging each element with its term.
    async fn fan_out(&self, kind: SyncKind) -> Result<Vec<Value>, SyncError> {
        let prefix = self.url(kind)?;
        let terms = self.store.term_codes().await?;
        if terms.is_empty() {
            tracing::warn!(%kind, "no known terms; fan-out yields nothing");
        }

        let mut all = Vec::new();
        for term in &terms {
            let mut items = self.fetch_elements(kind, &format!("{prefix}{term}")).await?;
            decode::tag_term(&mut items, term)
                .map_err(|source| SyncError::Decode { kind, source })?;
            tracing::debug!(%kind, term, records = items.len(), "fetched term");
            all.append(&mut items);
        }
        Ok(all)
    }

    /// Schedule, exam and finance: replace the collection, upsert the dates.
    async fn replace_dated<R>(&self, kind: SyncKind) -> Result<usize, SyncError>
    where
        R: Record + DeserializeOwned,
    {
        let items = self.fetch_elements(kind, &self.url(kind)?).await?;
        let primary: Vec<R> = decode_as(kind, &items)?;
        let dates: Vec<CalendarDate> = decode_as(kind, &items)?;

        let tx = self.store.begin().await?;
        let result = async {
            let written = tx.clear_and_insert(&primary).await?;
            tx.upsert(&dates).await?;
            Ok::<_, StoreError>(written)
        }
        .await;
        finish(tx, kind, result).await
    }

    async fn upsert_terms(&self) -> Result<usize, SyncError> {
        let kind = SyncKind::Terms;
        let items = self.fetch_elements(kind, &self.url(kind)?).await?;
        let terms: Vec<Term> = decode_as(kind, &items)?;

        let tx = self.store.begin().await?;
        let result = tx.upsert(&terms).await;
        finish(tx, kind, result).await
    }

    async fn rebuild_grades(&self) -> Result<usize, SyncError> {
        let kind = SyncKind::Grades;
        let items = self.fan_out(kind).await?;
        let grades: Vec<GradeEntry> = decode_as(kind, &items)?;
        let courses: Vec<GradeCourseEntry> = decode_as(kind, &items)?;

        let tx = self.store.begin().await?;
        let result = async {
            tx.clear_and_insert(&grades).await?;
            tx.clear(GradeCourseEntry::COLLECTION).await?;
            tx.upsert(&courses).await?;
            Ok::<_, StoreError>(grades.len())
        }
        .await;
        finish(tx, kind, result).await
    }

    async fn accumulate_courses(&self) -> Result<usize, SyncError> {
        let kind = SyncKind::Course;
        let items = self.fan_out(kind).await?;
        let courses: Vec<CourseEntry> = decode_as(kind, &items)?;

        let tx = self.store.begin().await?;
        let result = tx.upsert(&courses).await;
        finish(tx, kind, result).await
    }
}

fn decode_as<T: DeserializeOwned>(kind: SyncKind, items: &[Value]) -> Result<Vec<T>, SyncError> {
    decode::records(items).map_err(|source| SyncError::Decode { kind, source })
}

/// Commit on success, roll back otherwise.
async fn finish(
    tx: SyncTransaction,
    kind: SyncKind,
    result: Result<usize, StoreError>,
) -> Result<usize, SyncError> {
    match result {
        Ok(written) => {
            tx.commit().await?;
            Ok(written)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(%kind, error = %rollback, "rollback failed");
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SyncKind::Schedule, Envelope::Bare)]
    #[case(SyncKind::Exam, Envelope::Bare)]
    #[case(SyncKind::Terms, Envelope::Bare)]
    #[case(SyncKind::Finance, Envelope::Field("Status"))]
    #[case(SyncKind::Grades, Envelope::Field("score"))]
    #[case(SyncKind::Course, Envelope::Field("Courses"))]
    fn envelopes_per_resource(#[case] kind: SyncKind, #[case] expected: Envelope) {
        assert_eq!(envelope(kind), expected);
    }
}
