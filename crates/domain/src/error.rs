//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`IncideskError`] via `#[from]` or an explicit `From` impl.

/// Top-level error returned by application services.
#[derive(Debug, thiserror::Error)]
pub enum IncideskError {
    /// The caller supplied data that cannot be turned into a statement.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// An insert or update returned no row.
    #[error("write to {0} returned no row")]
    WriteFailed(&'static str),

    /// A lookup that must yield exactly one row yielded none.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// The statement executor failed (connection, credentials, SQL).
    #[error("storage error")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons a request payload is rejected before reaching storage.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The body is not JSON, misses a required key, carries a key outside the
    /// entity's allow-list, or has a value of the wrong type.
    #[error("malformed request body")]
    MalformedBody(#[source] serde_json::Error),

    /// The body is not valid UTF-8.
    #[error("request body is not valid UTF-8")]
    InvalidEncoding(#[source] std::string::FromUtf8Error),

    /// An update named no column at all.
    #[error("no updatable column supplied")]
    EmptyChanges,
}

/// A single-row lookup found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_wrap_validation_error_through_from() {
        let err: IncideskError = ValidationError::EmptyChanges.into();
        assert!(matches!(
            err,
            IncideskError::Validation(ValidationError::EmptyChanges)
        ));
    }

    #[test]
    fn should_describe_missing_row() {
        let err = NotFoundError {
            entity: "incident view",
            id: "12".to_string(),
        };
        assert_eq!(err.to_string(), "incident view 12 not found");
    }
}
