//! `SQLite` implementation of [`StatementExecutor`].

use std::future::Future;

use chrono::NaiveDateTime;
use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteColumn, SqliteConnectOptions, SqliteConnection, SqliteRow,
    SqliteTypeInfo, SqliteValueRef,
};
use sqlx::{Column, ConnectOptions, Connection, Decode, Row as _, Sqlite, TypeInfo, ValueRef};

use incidesk_app::ports::StatementExecutor;
use incidesk_app::statement::Statement;
use incidesk_domain::error::IncideskError;
use incidesk_domain::value::{Row, Value};

use crate::error::StorageError;

const SCHEMA: &str = include_str!("../schema.sql");

/// Executes each statement on its own freshly opened connection.
#[derive(Debug, Clone)]
pub struct SqliteStatementExecutor {
    options: SqliteConnectOptions,
}

impl SqliteStatementExecutor {
    /// Create an executor that connects with `options` on every call.
    #[must_use]
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }

    /// Create any missing table, index, or view.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or any DDL statement fails.
    pub async fn bootstrap_schema(&self) -> Result<(), StorageError> {
        let mut conn = self.options.connect().await?;
        let result = sqlx::raw_sql(SCHEMA).execute(&mut conn).await;
        close(conn).await;
        result?;
        tracing::info!("schema bootstrapped");
        Ok(())
    }

    async fn run(options: SqliteConnectOptions, statement: Statement) -> Result<Vec<Row>, StorageError> {
        let (sql, params) = statement.into_parts();
        let mut conn = options.connect().await?;

        let query = params.into_iter().fold(sqlx::query(&sql), bind);
        let result = query.fetch_all(&mut conn).await;
        close(conn).await;

        result?.iter().map(decode_row).collect()
    }
}

impl StatementExecutor for SqliteStatementExecutor {
    fn execute(
        &self,
        statement: Statement,
    ) -> impl Future<Output = Result<Vec<Row>, IncideskError>> + Send {
        let options = self.options.clone();
        async move {
            tracing::trace!(sql = statement.sql(), "executing statement");
            Ok(Self::run(options, statement).await?)
        }
    }
}

async fn close(conn: SqliteConnection) {
    if let Err(err) = conn.close().await {
        tracing::warn!(%err, "failed to close sqlite connection");
    }
}

fn bind<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(value) => query.bind(value),
        Value::Integer(value) => query.bind(value),
        Value::Real(value) => query.bind(value),
        Value::Text(value) => query.bind(value),
        Value::Timestamp(value) => query.bind(value),
    }
}

/// What the column was declared as, where that changes the decoding.
enum Declared {
    Timestamp,
    Boolean,
    Other,
}

impl Declared {
    fn of(type_info: &SqliteTypeInfo) -> Self {
        match type_info.name() {
            "DATETIME" => Self::Timestamp,
            "BOOLEAN" => Self::Boolean,
            _ => Self::Other,
        }
    }
}

/// Storage class of the actual value in this row.
enum Stored {
    Integer,
    Real,
    Text,
    Blob,
}

impl Stored {
    fn of(raw: &SqliteValueRef<'_>) -> Self {
        match raw.type_info().name() {
            "INTEGER" | "BOOLEAN" => Self::Integer,
            "REAL" => Self::Real,
            "BLOB" => Self::Blob,
            _ => Self::Text,
        }
    }
}

fn decode_row(row: &SqliteRow) -> Result<Row, StorageError> {
    let mut out = Row::new();
    for column in row.columns() {
        let value = decode_column(row, column)?;
        out.push(column.name(), value);
    }
    Ok(out)
}

fn decode_column(row: &SqliteRow, column: &SqliteColumn) -> Result<Value, StorageError> {
    let raw = row.try_get_raw(column.ordinal())?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let value = match (Declared::of(column.type_info()), Stored::of(&raw)) {
        (_, Stored::Blob) => {
            return Err(StorageError::UnsupportedColumn {
                column: column.name().to_string(),
                type_name: "BLOB",
            });
        }
        (Declared::Timestamp, _) => Value::Timestamp(decode::<NaiveDateTime>(raw)?),
        (Declared::Boolean, Stored::Integer) => Value::Bool(decode::<bool>(raw)?),
        (_, Stored::Integer) => Value::Integer(decode::<i64>(raw)?),
        (_, Stored::Real) => Value::Real(decode::<f64>(raw)?),
        (_, Stored::Text) => Value::Text(decode::<String>(raw)?),
    };
    Ok(value)
}

fn decode<'r, T: Decode<'r, Sqlite>>(raw: SqliteValueRef<'r>) -> Result<T, StorageError> {
    T::decode(raw).map_err(|err| StorageError::Database(sqlx::Error::Decode(err)))
}
