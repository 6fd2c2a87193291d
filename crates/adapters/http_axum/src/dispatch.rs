//! Table dispatch: the single axum fallback that serves every request.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;

use incidesk_app::ports::StatementExecutor;
use incidesk_domain::error::ValidationError;
use incidesk_domain::request::parse_body;

use crate::api;
use crate::body::read_body;
use crate::error::ApiError;
use crate::query::QueryParams;
use crate::response::Reply;
use crate::route::Handler;
use crate::state::AppState;

/// What a handler receives besides the shared state.
#[derive(Debug, Default)]
pub struct Invocation {
    /// Positional path captures.
    pub captures: Vec<String>,
    pub query: QueryParams,
    /// Raw body; only read for `POST` and `PUT`.
    pub body: Option<Vec<u8>>,
}

impl Invocation {
    /// Path capture at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingCapture`] when the route pattern has no such
    /// group.
    pub fn capture(&self, index: usize) -> Result<&str, ApiError> {
        self.captures
            .get(index)
            .map(String::as_str)
            .ok_or(ApiError::MissingCapture(index))
    }

    /// Decode the body as a JSON request, consuming it.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the body is not UTF-8 or does not
    /// decode into `T`. A missing body decodes like an empty one.
    pub fn json<T: DeserializeOwned>(&mut self) -> Result<T, ApiError> {
        let bytes = self.body.take().unwrap_or_default();
        let text = String::from_utf8(bytes).map_err(ValidationError::InvalidEncoding)?;
        Ok(parse_body(&text)?)
    }
}

/// Resolve the request against the route table and run the handler.
///
/// Unmatched requests get `501 Not Implemented` without their body being
/// read.
pub async fn dispatch<E>(State(state): State<AppState<E>>, request: Request) -> Response
where
    E: StatementExecutor + Send + Sync + 'static,
{
    let (parts, body) = request.into_parts();
    let Some(matched) = state.routes.resolve(&parts.method, parts.uri.path()) else {
        tracing::debug!(method = %parts.method, path = parts.uri.path(), "no route matched");
        return ApiError::RouteNotFound.into_response();
    };

    let query = match QueryParams::from_uri(&parts.uri) {
        Ok(query) => query,
        Err(err) => return ApiError::from(err).into_response(),
    };
    let body = if reads_body(&parts.method) {
        match read_body(&parts.headers, body, state.body_limit).await {
            Ok(bytes) => Some(bytes),
            Err(err) => return ApiError::from(err).into_response(),
        }
    } else {
        None
    };

    let invocation = Invocation {
        captures: matched.captures,
        query,
        body,
    };
    match invoke(&state, matched.handler, invocation).await {
        Ok(reply) => reply.into_response(),
        Err(err) => err.into_response(),
    }
}

fn reads_body(method: &Method) -> bool {
    method == Method::POST || method == Method::PUT
}

async fn invoke<E>(
    state: &AppState<E>,
    handler: Handler,
    invocation: Invocation,
) -> Result<Reply, ApiError>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    match handler {
        Handler::ListUsers => api::users::list(state, invocation).await,
        Handler::GetUser => api::users::get(state, invocation).await,
        Handler::CreateUser => api::users::create(state, invocation).await,
        Handler::UpdateUser => api::users::update(state, invocation).await,
        Handler::DeleteUser => api::users::delete(state, invocation).await,
        Handler::ListIncidents => api::incidents::list(state, invocation).await,
        Handler::GetIncident => api::incidents::get(state, invocation).await,
        Handler::CreateIncident => api::incidents::create(state, invocation).await,
        Handler::UpdateIncident => api::incidents::update(state, invocation).await,
        Handler::ListComments => api::comments::list(state, invocation).await,
        Handler::GetCommentsByCreator => api::comments::by_creator(state, invocation).await,
        Handler::CreateComment => api::comments::create(state, invocation).await,
        Handler::UpdateCommentsByCreator => {
            api::comments::update_by_creator(state, invocation).await
        }
        Handler::ListViews => api::views::list(state, invocation).await,
        Handler::GetView => api::views::get(state, invocation).await,
    }
}
