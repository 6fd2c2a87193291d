//! Comment service: use-cases for notes and status transitions.
//!
//! Single-comment reads and updates select on `created_by`, not on the
//! comment's own `id`. Existing callers rely on this, so it is kept as is.

use incidesk_domain::comment::{self, CommentChanges, NewComment};
use incidesk_domain::error::IncideskError;
use incidesk_domain::id::CommentId;
use incidesk_domain::value::{Row, Value};

use crate::ports::StatementExecutor;
use crate::statement::Statement;

const SELECT_ALL: &str = "SELECT * FROM t_comment";
const SELECT_BY_INCIDENT: &str = "SELECT * FROM t_comment WHERE incident_id = ?";
const SELECT_BY_CREATOR: &str = "SELECT * FROM t_comment WHERE created_by = ?";

/// Build the insert for `comment` under a freshly generated key.
///
/// Shared with [`IncidentService`](crate::services::incident_service::IncidentService),
/// which records an initial comment for every new incident.
#[must_use]
pub fn insert_statement(comment: NewComment) -> Statement {
    Statement::insert(comment::TABLE, comment.into_assignments(CommentId::generate()))
}

/// Application service for comment operations.
pub struct CommentService<E> {
    executor: E,
}

impl<E: StatementExecutor> CommentService<E> {
    /// Create a new service backed by the given executor.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List comments, optionally only those attached to `incident_id`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the executor.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, incident_id: Option<&str>) -> Result<Vec<Row>, IncideskError> {
        let statement = match incident_id {
            Some(incident) => Statement::new(SELECT_BY_INCIDENT).bind(incident),
            None => Statement::new(SELECT_ALL),
        };
        self.executor.execute(statement).await
    }

    /// Every comment whose `created_by` equals `creator`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the executor.
    #[tracing::instrument(skip(self))]
    pub async fn by_creator(&self, creator: &str) -> Result<Vec<Row>, IncideskError> {
        let statement = Statement::new(SELECT_BY_CREATOR).bind(creator);
        self.executor.execute(statement).await
    }

    /// Record a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`IncideskError::WriteFailed`] when the insert yields no row,
    /// or a storage error propagated from the executor.
    #[tracing::instrument(skip(self, new_comment), fields(incident_id = %new_comment.incident_id))]
    pub async fn create(&self, new_comment: NewComment) -> Result<Vec<Row>, IncideskError> {
        let rows = self.executor.execute(insert_statement(new_comment)).await?;
        if rows.is_empty() {
            return Err(IncideskError::WriteFailed(comment::TABLE));
        }
        Ok(rows)
    }

    /// Overwrite the supplied columns of every comment created by `creator`.
    ///
    /// # Errors
    ///
    /// Returns [`IncideskError::Validation`] when no column is supplied,
    /// [`IncideskError::WriteFailed`] when no row matched, or a storage error.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_by_creator(
        &self,
        creator: &str,
        changes: CommentChanges,
    ) -> Result<Vec<Row>, IncideskError> {
        let statement = Statement::update(
            comment::TABLE,
            changes.into_assignments(),
            "created_by",
            Value::from(creator),
        )?;
        let rows = self.executor.execute(statement).await?;
        if rows.is_empty() {
            return Err(IncideskError::WriteFailed(comment::TABLE));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::ScriptedExecutor;
    use incidesk_domain::id::{IncidentId, UserId};

    #[tokio::test]
    async fn should_select_single_comment_by_creator() {
        let svc = CommentService::new(ScriptedExecutor::default());

        svc.by_creator("5").await.unwrap();
        let seen = svc.executor.seen();
        assert_eq!(seen[0].sql(), SELECT_BY_CREATOR);
        assert_eq!(seen[0].params(), &[Value::Text("5".to_string())]);
    }

    #[tokio::test]
    async fn should_update_every_comment_of_creator() {
        let svc = CommentService::new(ScriptedExecutor::answering(vec![Ok(vec![
            Row::new().with("id", 1),
            Row::new().with("id", 2),
        ])]));
        let changes = CommentChanges {
            incident_status: Some("Closed".to_string()),
            ..CommentChanges::default()
        };

        let rows = svc.update_by_creator("5", changes).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            svc.executor.seen()[0].sql(),
            "UPDATE t_comment SET incident_status = ? WHERE created_by = ? RETURNING *"
        );
    }

    #[tokio::test]
    async fn should_filter_by_incident_when_given() {
        let svc = CommentService::new(ScriptedExecutor::default());

        svc.list(Some("9")).await.unwrap();
        assert_eq!(svc.executor.seen()[0].sql(), SELECT_BY_INCIDENT);
    }

    #[tokio::test]
    async fn should_create_comment() {
        let svc = CommentService::new(ScriptedExecutor::answering(vec![Ok(vec![
            Row::new().with("id", 8),
        ])]));
        let comment = NewComment {
            created_by: UserId::from("u-1"),
            incident_id: IncidentId::from("i-2"),
            incident_status: "In Progress".to_string(),
            comment: "looking".to_string(),
        };

        let rows = svc.create(comment).await.unwrap();
        assert_eq!(rows, vec![Row::new().with("id", 8)]);

        let seen = svc.executor.seen();
        assert_eq!(
            seen[0].sql(),
            "INSERT INTO t_comment (id, created_by, incident_id, incident_status, comment) VALUES (?, ?, ?, ?, ?) RETURNING *"
        );
        assert_eq!(seen[0].params()[1], Value::Text("u-1".to_string()));
        assert_eq!(seen[0].params()[2], Value::Text("i-2".to_string()));
    }

    #[tokio::test]
    async fn should_report_write_failure_when_insert_returns_nothing() {
        let svc = CommentService::new(ScriptedExecutor::default());
        let comment = NewComment::initial(UserId::from("u-1"), IncidentId::from("i-2"));

        let result = svc.create(comment).await;
        assert!(matches!(result, Err(IncideskError::WriteFailed("t_comment"))));
    }
}
