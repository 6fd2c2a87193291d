//! JSON REST handlers for incidents.

use incidesk_app::ports::StatementExecutor;
use incidesk_domain::incident::{IncidentChanges, NewIncident};

use crate::dispatch::Invocation;
use crate::error::ApiError;
use crate::response::Reply;
use crate::state::AppState;

/// `GET /incidents[?reported_by=<user id>]`
///
/// Only the first `reported_by` value filters; later ones are ignored.
pub async fn list<E>(state: &AppState<E>, invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let reported_by = invocation.query.first("reported_by");
    let rows = state.incident_service.list(reported_by).await?;
    Ok(Reply::ok(rows))
}

/// `GET /incidents/{id}`
pub async fn get<E>(state: &AppState<E>, invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let rows = state.incident_service.get(invocation.capture(0)?).await?;
    Ok(Reply::ok(rows))
}

/// `POST /incidents`
///
/// Also records the reporter's initial `Open` comment.
pub async fn create<E>(state: &AppState<E>, mut invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let new_incident: NewIncident = invocation.json()?;
    let rows = state.incident_service.create(new_incident).await?;
    Ok(Reply::created(rows))
}

/// `PUT /incidents/{id}`
pub async fn update<E>(state: &AppState<E>, mut invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let changes: IncidentChanges = invocation.json()?;
    let rows = state
        .incident_service
        .update(invocation.capture(0)?, changes)
        .await?;
    Ok(Reply::created(rows))
}
