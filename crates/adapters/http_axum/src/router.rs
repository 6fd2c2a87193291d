//! Axum router assembly.

use std::any::Any;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use incidesk_app::ports::StatementExecutor;

use crate::dispatch::dispatch;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// axum registers no paths: every request lands in the fallback, which
/// resolves it against the state's route table. Requests are served one at a
/// time across all connections. A [`TraceLayer`] logs each request/response
/// at the `DEBUG` level and a panicking handler is turned into a bodyless
/// `500`.
pub fn build<E>(state: AppState<E>) -> Router
where
    E: StatementExecutor + Send + Sync + 'static,
{
    Router::new()
        .fallback(dispatch::<E>)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(GlobalConcurrencyLimitLayer::new(1))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(_payload: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
