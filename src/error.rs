//! Error type shared by the fetcher and the renderer.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T, E = FixtureError> = std::result::Result<T, E>;

/// Everything that can go wrong between opening a connection and producing
/// fixture text.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The connection string is malformed or the database cannot be opened.
    #[error("WrongConnection: cannot use DSN '{dsn}': {reason}")]
    WrongConnection { dsn: String, reason: String },

    /// The requested table does not exist in the database.
    #[error("NoSuchTable: {0}")]
    NoSuchTable(String),

    /// One or more row-naming columns are not columns of the table.
    #[error("WrongNamingColumn: {}", .0.join(", "))]
    WrongNamingColumn(Vec<String>),

    /// A derived row class name is not a legal identifier.
    #[error("NonValidRowClassName: {0}")]
    NonValidRowClassName(String),

    /// The dataset class name is not a legal identifier.
    #[error("NonValidFixtureClassName: {0}")]
    NonValidFixtureClassName(String),

    /// Two rows produced the same class name.
    #[error("DuplicateRowClassName: {0}")]
    DuplicateRowClassName(String),

    /// A row does not have one value per column.
    #[error("RowLength: row {row} has {found} values, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The engine rejected the generated SELECT statement.
    #[error("Query failed: {message}\n  SQL: {sql}")]
    Query { sql: String, message: String },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FixtureError {
    pub(crate) fn wrong_connection(dsn: &str, reason: impl ToString) -> Self {
        FixtureError::WrongConnection {
            dsn: dsn.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn query(sql: &str, err: impl ToString) -> Self {
        FixtureError::Query {
            sql: sql.to_string(),
            message: err.to_string(),
        }
    }
}
