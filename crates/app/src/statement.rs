//! SQL statements with positional parameters.

use incidesk_domain::error::ValidationError;
use incidesk_domain::request::Assignment;
use incidesk_domain::value::Value;

/// One SQL statement and the values for its `?` placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    /// Create a statement with no parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append a positional parameter.
    #[must_use]
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// `INSERT INTO <table> (<columns>) VALUES (?, ...) RETURNING *`.
    #[must_use]
    pub fn insert(table: &'static str, assignments: Vec<Assignment>) -> Self {
        Self::render_insert(table, assignments, "")
    }

    /// Like [`Statement::insert`], but yields no row instead of failing when
    /// `unique_column` already holds the inserted value.
    #[must_use]
    pub fn insert_unless_exists(
        table: &'static str,
        assignments: Vec<Assignment>,
        unique_column: &'static str,
    ) -> Self {
        let conflict = format!(" ON CONFLICT ({unique_column}) DO NOTHING");
        Self::render_insert(table, assignments, &conflict)
    }

    fn render_insert(table: &'static str, assignments: Vec<Assignment>, conflict: &str) -> Self {
        let columns: Vec<&str> = assignments.iter().map(|a| a.column).collect();
        let placeholders = vec!["?"; assignments.len()].join(", ");
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({placeholders}){conflict} RETURNING *",
            columns.join(", ")
        );

        Self {
            sql,
            params: assignments.into_iter().map(|a| a.value).collect(),
        }
    }

    /// `UPDATE <table> SET a = ?, ... WHERE <key_column> = ? RETURNING *`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyChanges`] when `assignments` is empty.
    pub fn update(
        table: &'static str,
        assignments: Vec<Assignment>,
        key_column: &'static str,
        key: Value,
    ) -> Result<Self, ValidationError> {
        if assignments.is_empty() {
            return Err(ValidationError::EmptyChanges);
        }

        let set = assignments
            .iter()
            .map(|a| format!("{} = ?", a.column))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {table} SET {set} WHERE {key_column} = ? RETURNING *");

        let mut params: Vec<Value> = assignments.into_iter().map(|a| a.value).collect();
        params.push(key);

        Ok(Self { sql, params })
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Split into SQL text and parameters.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}
