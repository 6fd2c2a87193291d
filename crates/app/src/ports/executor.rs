//! Statement executor port: the only path to the relational store.

use std::future::Future;

use incidesk_domain::error::IncideskError;
use incidesk_domain::value::Row;

use crate::statement::Statement;

/// Runs exactly one statement and returns every row it produced.
///
/// Implementations own their connection scope per call: nothing is pooled,
/// retried, or kept open between calls, and no transaction spans two calls.
pub trait StatementExecutor {
    /// Execute `statement` with its positional parameters.
    ///
    /// Statements that produce no result set return an empty vector.
    fn execute(
        &self,
        statement: Statement,
    ) -> impl Future<Output = Result<Vec<Row>, IncideskError>> + Send;
}
