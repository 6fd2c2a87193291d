//! User service: use-cases for managing users.

use incidesk_domain::error::IncideskError;
use incidesk_domain::id::UserId;
use incidesk_domain::user::{self, NewUser, UserChanges, UserColumn};
use incidesk_domain::value::{Row, Value};

use crate::ports::StatementExecutor;
use crate::statement::Statement;

const SELECT_ALL: &str = "SELECT * FROM t_user";
const SELECT_BY_ID: &str = "SELECT * FROM t_user WHERE id = ?";
const SELECT_BY_TELEGRAM_ID: &str = "SELECT * FROM t_user WHERE telegram_user_id = ?";
const DELETE_BY_ID: &str = "DELETE FROM t_user WHERE id = ? RETURNING *";

/// Result of an idempotent registration.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// A user with the same `telegram_user_id` was already stored.
    Existing(Vec<Row>),
    /// A new row was inserted.
    Created(Vec<Row>),
}

/// Application service for user CRUD operations.
pub struct UserService<E> {
    executor: E,
}

impl<E: StatementExecutor> UserService<E> {
    /// Create a new service backed by the given executor.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List every user in store order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the executor.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Row>, IncideskError> {
        self.executor.execute(Statement::new(SELECT_ALL)).await
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

    /// Register a user unless one with the same external identity exists.
    ///
    /// The insert skips on a `telegram_user_id` conflict, so a registration
    /// that races another one for the same identity returns the winner's row.
    ///
    /// # Errors
    ///
    /// Returns [`IncideskError::WriteFailed`] when neither the insert nor the
    /// follow-up lookup yields a row, or a storage error from the executor.
    #[tracing::instrument(skip(self, new_user), fields(telegram_user_id = new_user.telegram_user_id))]
    pub async fn create(&self, new_user: NewUser) -> Result<CreateOutcome, IncideskError> {
        let lookup = Statement::new(SELECT_BY_TELEGRAM_ID).bind(new_user.telegram_user_id);
        let existing = self.executor.execute(lookup.clone()).await?;
        if !existing.is_empty() {
            tracing::debug!("user already registered");
            return Ok(CreateOutcome::Existing(existing));
        }

        let insert = Statement::insert_unless_exists(
            user::TABLE,
            new_user.into_assignments(UserId::generate()),
            UserColumn::TelegramUserId.name(),
        );
        let created = self.executor.execute(insert).await?;
        if !created.is_empty() {
            return Ok(CreateOutcome::Created(created));
        }

        tracing::debug!("user registered concurrently");
        let winner = self.executor.execute(lookup).await?;
        if winner.is_empty() {
            return Err(IncideskError::WriteFailed(user::TABLE));
        }
        Ok(CreateOutcome::Existing(winner))
    }

    /// Overwrite the supplied columns of user `id`.
    ///
    /// # Errors
    ///
    /// Returns [`IncideskError::Validation`] when no column is supplied,
    /// [`IncideskError::WriteFailed`] when no row matched, or a storage error.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update(&self, id: &str, changes: UserChanges) -> Result<Vec<Row>, IncideskError> {
        let statement = Statement::update(
            user::TABLE,
            changes.into_assignments(),
            "id",
            Value::from(id),
        )?;
        let rows = self.executor.execute(statement).await?;
        if rows.is_empty() {
            return Err(IncideskError::WriteFailed(user::TABLE));
        }
        Ok(rows)
    }

    /// Delete user `id`, returning the deleted rows (possibly none).
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the executor.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Vec<Row>, IncideskError> {
        let statement = Statement::new(DELETE_BY_ID).bind(id);
        self.executor.execute(statement).await
    }
}
