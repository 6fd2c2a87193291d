//! Route table: ordered, anchored path patterns per HTTP method.

use std::collections::HashMap;

use axum::http::Method;
use regex::Regex;

/// Every operation the API can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    ListUsers,
    GetUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
    ListIncidents,
    GetIncident,
    CreateIncident,
    UpdateIncident,
    ListComments,
    /// Selects on `created_by`, not the comment id.
    GetCommentsByCreator,
    CreateComment,
    /// Selects on `created_by`, not the comment id.
    UpdateCommentsByCreator,
    ListViews,
    GetView,
}

struct Route {
    pattern: Regex,
    handler: Handler,
}

/// A resolved request: which handler to run and the path captures it gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub handler: Handler,
    /// Capture groups of the matching pattern, left to right.
    pub captures: Vec<String>,
}

/// Per-method list of routes, checked in declaration order.
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<Method, Vec<Route>>,
}

impl RouteTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route for `method`.
    ///
    /// `pattern` is matched against the whole path: it is anchored at both
    /// ends here, so `/users` never matches `/users/1`. Use `([^/]+)` for a
    /// positional path segment.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn route(
        mut self,
        method: Method,
        pattern: &str,
        handler: Handler,
    ) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("^(?:{pattern})$"))?;
        self.routes
            .entry(method)
            .or_default()
            .push(Route { pattern, handler });
        Ok(self)
    }

    /// The incidesk API surface.
    ///
    /// # Errors
    ///
    /// Returns a regex error only if a pattern below is malformed.
    pub fn standard() -> Result<Self, regex::Error> {
        const ID: &str = "([^/]+)";

        Self::new()
            .route(Method::GET, "/users", Handler::ListUsers)?
            .route(Method::GET, &format!("/users/{ID}"), Handler::GetUser)?
            .route(Method::GET, "/incidents", Handler::ListIncidents)?
            .route(Method::GET, &format!("/incidents/{ID}"), Handler::GetIncident)?
            .route(Method::GET, "/comments", Handler::ListComments)?
            .route(Method::GET, &format!("/comments/{ID}"), Handler::GetCommentsByCreator)?
            .route(Method::GET, "/views", Handler::ListViews)?
            .route(Method::GET, &format!("/views/{ID}"), Handler::GetView)?
            .route(Method::POST, "/users", Handler::CreateUser)?
            .route(Method::POST, "/incidents", Handler::CreateIncident)?
            .route(Method::POST, "/comments", Handler::CreateComment)?
            .route(Method::PUT, &format!("/users/{ID}"), Handler::UpdateUser)?
            .route(Method::PUT, &format!("/incidents/{ID}"), Handler::UpdateIncident)?
            .route(
                Method::PUT,
                &format!("/comments/{ID}"),
                Handler::UpdateCommentsByCreator,
            )?
            .route(Method::DELETE, &format!("/users/{ID}"), Handler::DeleteUser)
    }

    /// Find the first route of `method` whose pattern matches `path`.
    ///
    /// `path` must not include the query string.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        self.routes.get(method)?.iter().find_map(|route| {
            let caps = route.pattern.captures(path)?;
            let captures = caps
                .iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect();
            Some(RouteMatch {
                handler: route.handler,
                captures,
            })
        })
    }
}
