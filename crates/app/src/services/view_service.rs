//! View service: incidents joined with their latest status comment.

use incidesk_domain::error::{IncideskError, NotFoundError};
use incidesk_domain::value::Row;

use crate::ports::StatementExecutor;
use crate::statement::Statement;

const SELECT_ALL: &str = "SELECT * FROM v_incident";
const SELECT_BY_INCIDENT: &str = "SELECT * FROM v_incident WHERE incident_id = ?";

/// Read-only access to `v_incident`, recomputed on every call.
pub struct ViewService<E> {
    executor: E,
}

impl<E: StatementExecutor> ViewService<E> {
    /// Create a new service backed by the given executor.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List every incident with its current status.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the executor.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Row>, IncideskError> {
        self.executor.execute(Statement::new(SELECT_ALL)).await
    }

    /// The single view row of incident `incident_id`.
    ///
    /// # Errors
    ///
    /// Returns [`IncideskError::NotFound`] when the incident does not exist,
    /// or a storage error propagated from the executor.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, incident_id: &str) -> Result<Row, IncideskError> {
        let statement = Statement::new(SELECT_BY_INCIDENT).bind(incident_id);
        self.executor
            .execute(statement)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                NotFoundError {
                    entity: "incident view",
                    id: incident_id.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::ScriptedExecutor;

    #[tokio::test]
    async fn should_return_first_row_of_incident() {
        let row = Row::new().with("incident_id", 4).with("incident_status", "Open");
        let svc = ViewService::new(ScriptedExecutor::answering(vec![Ok(vec![row.clone()])]));

        let fetched = svc.get("4").await.unwrap();
        assert_eq!(fetched, row);
        assert_eq!(svc.executor.seen()[0].sql(), SELECT_BY_INCIDENT);
    }

    #[tokio::test]
    async fn should_return_not_found_when_incident_missing() {
        let svc = ViewService::new(ScriptedExecutor::default());

        let result = svc.get("4").await;
        assert!(matches!(result, Err(IncideskError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_whole_view() {
        let svc = ViewService::new(ScriptedExecutor::answering(vec![Ok(vec![
            Row::new().with("incident_id", 1),
            Row::new().with("incident_id", 2),
        ])]));

        assert_eq!(svc.list().await.unwrap().len(), 2);
    }
}
