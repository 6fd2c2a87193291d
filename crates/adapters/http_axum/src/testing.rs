//! Stub executor shared by the router tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use incidesk_app::ports::StatementExecutor;
use incidesk_app::statement::Statement;
use incidesk_domain::error::IncideskError;
use incidesk_domain::value::Row;

/// One scripted answer.
pub(crate) enum Answer {
    Rows(Vec<Row>),
    Fail(&'static str),
    Panic,
}

/// Records statements and replays scripted answers; clones share the script.
///
/// An exhausted script answers with no rows.
#[derive(Clone, Default)]
pub(crate) struct StubExecutor {
    seen: Arc<Mutex<Vec<Statement>>>,
    answers: Arc<Mutex<VecDeque<Answer>>>,
}

impl StubExecutor {
    pub(crate) fn answering(answers: Vec<Answer>) -> Self {
        Self {
            seen: Arc::default(),
            answers: Arc::new(Mutex::new(answers.into())),
        }
    }

    pub(crate) fn seen(&self) -> Vec<Statement> {
        self.seen.lock().unwrap().clone()
    }
}

impl StatementExecutor for StubExecutor {
    fn execute(
        &self,
        statement: Statement,
    ) -> impl Future<Output = Result<Vec<Row>, IncideskError>> + Send {
        self.seen.lock().unwrap().push(statement);
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Answer::Rows(vec![]));
        async move {
            match answer {
                Answer::Rows(rows) => Ok(rows),
                Answer::Fail(msg) => Err(IncideskError::Storage(msg.into())),
                Answer::Panic => panic!("executor blew up"),
            }
        }
    }
}
