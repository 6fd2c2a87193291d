//! JSON REST handlers for comments.
//!
//! The `{id}` segment of `/comments/{id}` selects on the comment's creator,
//! so a single request can read or rewrite several comments.

use incidesk_app::ports::StatementExecutor;
use incidesk_domain::comment::{CommentChanges, NewComment};

use crate::dispatch::Invocation;
use crate::error::ApiError;
use crate::response::Reply;
use crate::state::AppState;

/// `GET /comments[?incident_id=<incident id>]`
pub async fn list<E>(state: &AppState<E>, invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let incident_id = invocation.query.first("incident_id");
    let rows = state.comment_service.list(incident_id).await?;
    Ok(Reply::ok(rows))
}

/// `GET /comments/{creator_id}`
pub async fn by_creator<E>(state: &AppState<E>, invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let rows = state
        .comment_service
        .by_creator(invocation.capture(0)?)
        .await?;
    Ok(Reply::ok(rows))
}

/// `POST /comments`
pub async fn create<E>(state: &AppState<E>, mut invocation: Invocation) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let new_comment: NewComment = invocation.json()?;
    let rows = state.comment_service.create(new_comment).await?;
    Ok(Reply::created(rows))
}

/// `PUT /comments/{creator_id}`
pub async fn update_by_creator<E>(
    state: &AppState<E>,
    mut invocation: Invocation,
) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let changes: CommentChanges = invocation.json()?;
    let rows = state
        .comment_service
        .update_by_creator(invocation.capture(0)?, changes)
        .await?;
    Ok(Reply::created(rows))
}
