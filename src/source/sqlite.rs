//! SQLite backend.

use super::{Location, TableSource};
use crate::error::{FixtureError, Result};
use crate::value::Value;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

/// Read-only SQLite connection
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    /// Open the database read-only. A missing or non-SQLite file is reported
    /// as `WrongConnection`.
    pub fn open(dsn: &str, location: &Location) -> Result<Self> {
        let conn = match location {
            Location::Memory => Connection::open_in_memory(),
            Location::File(path) => {
                tracing::debug!(path = %path.display(), "opening SQLite database");
                Connection::open_with_flags(
                    path,
                    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )
            }
        }
        .map_err(|e| FixtureError::wrong_connection(dsn, e))?;

        // SQLite opens lazily; touch the schema so garbage files fail here
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| FixtureError::wrong_connection(dsn, e))?;

        Ok(Self { conn })
    }
}

impl TableSource for SqliteSource {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        let sql = "SELECT name FROM pragma_table_info(?1) ORDER BY cid";
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| FixtureError::query(sql, e))?;
        let names = stmt
            .query_map([table], |row| row.get::<_, String>(0))
            .map_err(|e| FixtureError::query(sql, e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| FixtureError::query(sql, e))?;
        Ok(names)
    }

    fn select_rows(&self, sql: &str, column_count: usize) -> Result<Vec<Vec<Value>>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| FixtureError::query(sql, e))?;
        let mut query_rows = stmt.query([]).map_err(|e| FixtureError::query(sql, e))?;

        let mut rows = Vec::new();
        while let Some(row) = query_rows.next().map_err(|e| FixtureError::query(sql, e))? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value = row.get_ref(i).map_err(|e| FixtureError::query(sql, e))?;
                values.push(convert_value(value));
            }
            rows.push(values);
        }

        Ok(rows)
    }
}

fn convert_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Int(n),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_is_wrong_connection() {
        let location = Location::File(PathBuf::from("/nonexistent/dir/missing.db"));
        let err = SqliteSource::open("sqlite:////nonexistent/dir/missing.db", &location)
            .err()
            .unwrap();
        assert!(matches!(err, FixtureError::WrongConnection { .. }));
    }

    #[test]
    fn test_in_memory_has_no_tables() {
        let source = SqliteSource::open("sqlite://", &Location::Memory).unwrap();
        assert!(source.table_columns("user").unwrap().is_empty());
    }

    #[test]
    fn test_convert_value() {
        assert_eq!(convert_value(ValueRef::Integer(7)), Value::Int(7));
        assert_eq!(convert_value(ValueRef::Text(b"abc")), Value::from("abc"));
        assert_eq!(convert_value(ValueRef::Null), Value::Null);
    }
}
