//! Shared application state for the dispatch handler.

use std::sync::Arc;

use incidesk_app::ports::StatementExecutor;
use incidesk_app::services::comment_service::CommentService;
use incidesk_app::services::incident_service::IncidentService;
use incidesk_app::services::user_service::UserService;
use incidesk_app::services::view_service::ViewService;

use crate::body::DEFAULT_BODY_LIMIT;
use crate::route::RouteTable;

/// Application state shared across every request.
///
/// Generic over the statement executor to avoid dynamic dispatch. `Clone` is
/// implemented manually so only the `Arc` wrappers are cloned.
pub struct AppState<E> {
    /// Route table consulted for every request.
    pub routes: Arc<RouteTable>,
    pub user_service: Arc<UserService<E>>,
    pub incident_service: Arc<IncidentService<E>>,
    pub comment_service: Arc<CommentService<E>>,
    pub view_service: Arc<ViewService<E>>,
    /// Largest request body read, in bytes.
    pub body_limit: usize,
}

impl<E> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            routes: Arc::clone(&self.routes),
            user_service: Arc::clone(&self.user_service),
            incident_service: Arc::clone(&self.incident_service),
            comment_service: Arc::clone(&self.comment_service),
            view_service: Arc::clone(&self.view_service),
            body_limit: self.body_limit,
        }
    }
}

impl<E> AppState<E>
where
    E: StatementExecutor + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        routes: RouteTable,
        user_service: UserService<E>,
        incident_service: IncidentService<E>,
        comment_service: CommentService<E>,
        view_service: ViewService<E>,
    ) -> Self {
        Self {
            routes: Arc::new(routes),
            user_service: Arc::new(user_service),
            incident_service: Arc::new(incident_service),
            comment_service: Arc::new(comment_service),
            view_service: Arc::new(view_service),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Replace the request body limit.
    #[must_use]
    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    /// Create every service over clones of one executor.
    pub fn from_executor(routes: RouteTable, executor: E) -> Self
    where
        E: Clone,
    {
        Self::new(
            routes,
            UserService::new(executor.clone()),
            IncidentService::new(executor.clone()),
            CommentService::new(executor.clone()),
            ViewService::new(executor),
        )
    }
}
