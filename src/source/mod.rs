//! Data fetching: table reflection and row selection.
//!
//! A connection string picks the backend, the backend reflects the table's
//! columns, and a single SELECT (filter, then order, then limit) produces the
//! rows. Only plain [`Value`] tuples leave this module.
//!
//! # Example
//!
//! ```ignore
//! use fixturegen::source::{fetch_table, FetchOptions};
//!
//! let options = FetchOptions {
//!     order_by: Some("id DESC".to_string()),
//!     ..Default::default()
//! };
//! let result = fetch_table("user", "sqlite:///app.db", &options).unwrap();
//! println!("{} rows", result.row_count());
//! ```

mod dsn;
mod duckdb;
mod query;
mod sqlite;

pub use self::duckdb::DuckDbSource;
pub use dsn::{Backend, Dsn, Location};
pub use query::{quote_identifier, SelectQuery};
pub use sqlite::SqliteSource;

use crate::error::{FixtureError, Result};
use crate::value::Value;
use std::num::NonZeroU64;

/// Optional clauses applied to the SELECT
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Maximum number of rows
    pub limit: Option<NonZeroU64>,
    /// Raw filter expression, e.g. `id > 2`
    pub where_clause: Option<String>,
    /// Raw ordering expression, e.g. `id DESC`
    pub order_by: Option<String>,
}

/// Column names and rows of one table, as fetched
#[derive(Debug, Clone, PartialEq)]
pub struct TableResult {
    table_name: String,
    column_names: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl TableResult {
    pub fn new(
        table_name: impl Into<String>,
        column_names: Vec<String>,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_names,
            rows,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Column names in table declaration order
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Rows in query result order
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A database that can reflect a table and run a SELECT against it
pub trait TableSource {
    /// Short engine name, for logging
    fn backend_name(&self) -> &'static str;

    /// Column names of `table` in declaration order; empty when the table
    /// does not exist.
    fn table_columns(&self, table: &str) -> Result<Vec<String>>;

    /// Run `sql` and collect the first `column_count` values of every row
    fn select_rows(&self, sql: &str, column_count: usize) -> Result<Vec<Vec<Value>>>;
}

/// Open a backend for a parsed connection string
pub fn connect(dsn: &str) -> Result<Box<dyn TableSource>> {
    let parsed = Dsn::parse(dsn)?;
    tracing::debug!(backend = %parsed.backend, "connecting");

    let source: Box<dyn TableSource> = match parsed.backend {
        Backend::Sqlite => Box::new(SqliteSource::open(dsn, &parsed.location)?),
        Backend::DuckDb => Box::new(DuckDbSource::open(dsn, &parsed.location)?),
    };
    Ok(source)
}

/// Fetch `table` through `source`.
pub fn fetch_from(
    source: &dyn TableSource,
    table: &str,
    options: &FetchOptions,
) -> Result<TableResult> {
    let columns = source.table_columns(table)?;
    if columns.is_empty() {
        return Err(FixtureError::NoSuchTable(table.to_string()));
    }

    let sql = SelectQuery::new(table, &columns)
        .filter(options.where_clause.as_deref())
        .order_by(options.order_by.as_deref())
        .limit(options.limit)
        .to_sql();
    tracing::debug!(backend = source.backend_name(), sql = %sql, "selecting rows");

    let rows = source.select_rows(&sql, columns.len())?;
    tracing::debug!(table = %table, rows = rows.len(), "fetched");

    Ok(TableResult::new(table, columns, rows))
}

/// Open `dsn`, reflect `table` and fetch its rows.
///
/// The connection is closed before returning.
pub fn fetch_table(table: &str, dsn: &str, options: &FetchOptions) -> Result<TableResult> {
    let source = connect(dsn)?;
    fetch_from(source.as_ref(), table, options)
}
