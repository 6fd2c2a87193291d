//! Scripted executor shared by the service tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use incidesk_domain::error::IncideskError;
use incidesk_domain::value::Row;

use crate::ports::StatementExecutor;
use crate::statement::Statement;

/// Records every statement and answers from a queue of scripted results.
///
/// An exhausted queue answers with no rows.
#[derive(Default)]
pub(crate) struct ScriptedExecutor {
    seen: Mutex<Vec<Statement>>,
    answers: Mutex<VecDeque<Result<Vec<Row>, &'static str>>>,
}

impl ScriptedExecutor {
    pub(crate) fn answering(answers: Vec<Result<Vec<Row>, &'static str>>) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            answers: Mutex::new(answers.into()),
        }
    }

    pub(crate) fn seen(&self) -> Vec<Statement> {
        self.seen.lock().unwrap().clone()
    }
}

impl StatementExecutor for ScriptedExecutor {
    fn execute(
        &self,
        statement: Statement,
    ) -> impl Future<Output = Result<Vec<Row>, IncideskError>> + Send {
        self.seen.lock().unwrap().push(statement);
        let answer = self.answers.lock().unwrap().pop_front().unwrap_or(Ok(vec![]));
        async move { answer.map_err(|msg| IncideskError::Storage(msg.into())) }
    }
}
