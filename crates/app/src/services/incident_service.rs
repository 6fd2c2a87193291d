//! Incident service: use-cases for managing incidents.

use incidesk_domain::comment::NewComment;
use incidesk_domain::error::IncideskError;
use incidesk_domain::id::IncidentId;
use incidesk_domain::incident::{self, IncidentChanges, NewIncident};
use incidesk_domain::value::{Row, Value};

use crate::ports::StatementExecutor;
use crate::services::comment_service;
use crate::statement::Statement;

const SELECT_ALL: &str = "SELECT * FROM t_incident";
const SELECT_BY_ID: &str = "SELECT * FROM t_incident WHERE id = ?";
const SELECT_BY_REPORTER: &str = "SELECT * FROM t_incident WHERE reported_by = ?";

/// Application service for incident CRUD operations.
pub struct IncidentService<E> {
    executor: E,
}

impl<E: StatementExecutor> IncidentService<E> {
    /// Create a new service backed by the given executor.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List incidents, optionally only those reported by `reported_by`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the executor.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, reported_by: Option<&str>) -> Result<Vec<Row>, IncideskError> {
        let statement = match reported_by {
            Some(reporter) => Statement::new(SELECT_BY_REPORTER).bind(reporter),
            None => Statement::new(SELECT_ALL),
        };
        self.executor.execute(statement).await
    }

    /// Rows whose `id` equals `id`; empty when there is none.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the executor.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Vec<Row>, IncideskError> {
        let statement = Statement::new(SELECT_BY_ID).bind(id);
        self.executor.execute(statement).await
    }

    /// Insert an incident under a fresh key, then record its initial "Open"
    /// comment against that key.
    ///
    /// The two inserts are separate statements. If the second one yields no
    /// row the incident stays without a status and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`IncideskError::WriteFailed`] when the incident insert yields
    /// no row, or a storage error from either statement.
    #[tracing::instrument(skip(self, new_incident), fields(reported_by = %new_incident.reported_by))]
    pub async fn create(&self, new_incident: NewIncident) -> Result<Vec<Row>, IncideskError> {
        let incident_id = IncidentId::generate();
        let reported_by = new_incident.reported_by.clone();
        let insert = Statement::insert(
            incident::TABLE,
            new_incident.into_assignments(incident_id.clone()),
        );
        let rows = self.executor.execute(insert).await?;
        if rows.is_empty() {
            return Err(IncideskError::WriteFailed(incident::TABLE));
        }

        let opening =
            comment_service::insert_statement(NewComment::initial(reported_by, incident_id.clone()));
        if self.executor.execute(opening).await?.is_empty() {
            tracing::warn!(%incident_id, "initial comment insert returned no row");
        }

        Ok(rows)
    }

    /// Overwrite the supplied columns of incident `id`.
    ///
    /// # Errors
    ///
    /// Returns [`IncideskError::Validation`] when no column is supplied,
    /// [`IncideskError::WriteFailed`] when no row matched, or a storage error.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: &str,
        changes: IncidentChanges,
    ) -> Result<Vec<Row>, IncideskError> {
        let statement = Statement::update(
            incident::TABLE,
            changes.into_assignments(),
            "id",
            Value::from(id),
        )?;
        let rows = self.executor.execute(statement).await?;
        if rows.is_empty() {
            return Err(IncideskError::WriteFailed(incident::TABLE));
        }
        Ok(rows)
    }
}
