//! JSON REST handlers for the incident view.

use incidesk_app::ports::StatementExecutor;

use crate::dispatch::Invocation;
use crate::error::ApiError;
use crate::response::Reply;
use crate::state::AppState;

/// `GET /views`
pub async fn list<E>(state: &AppState<E>, _invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let rows = state.view_service.list().await?;
    Ok(Reply::ok(rows))
}

/// `GET /views/{incident_id}` answers with a single object, not an array.
pub async fn get<E>(state: &AppState<E>, invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let row = state.view_service.get(invocation.capture(0)?).await?;
    Ok(Reply::ok(row))
}
