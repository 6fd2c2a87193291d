//! JSON REST handlers for users.

use incidesk_app::ports::StatementExecutor;
use incidesk_app::services::user_service::CreateOutcome;
use incidesk_domain::user::{NewUser, UserChanges};

use crate::dispatch::Invocation;
use crate::error::ApiError;
use crate::response::Reply;
use crate::state::AppState;

/// `GET /users`
pub async fn list<E>(state: &AppState<E>, _invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let rows = state.user_service.list().await?;
    Ok(Reply::ok(rows))
}

/// `GET /users/{id}`
pub async fn get<E>(state: &AppState<E>, invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let rows = state.user_service.get(invocation.capture(0)?).await?;
    Ok(Reply::ok(rows))
}

/// `POST /users`
///
/// `200` with the stored row when the Telegram identity is already
/// registered, `201` with the new row otherwise.
pub async fn create<E>(state: &AppState<E>, mut invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let new_user: NewUser = invocation.json()?;
    match state.user_service.create(new_user).await? {
        CreateOutcome::Existing(rows) => Ok(Reply::ok(rows)),
        CreateOutcome::Created(rows) => Ok(Reply::created(rows)),
    }
}

/// `PUT /users/{id}`
pub async fn update<E>(state: &AppState<E>, mut invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let changes: UserChanges = invocation.json()?;
    let rows = state
        .user_service
        .update(invocation.capture(0)?, changes)
        .await?;
    Ok(Reply::created(rows))
}

/// `DELETE /users/{id}`
pub async fn delete<E>(state: &AppState<E>, invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let rows = state.user_service.delete(invocation.capture(0)?).await?;
    Ok(Reply::ok(rows))
}
