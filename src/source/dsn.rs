//! Connection string parsing.
//!
//! Connection strings follow the SQLAlchemy URL layout for file databases:
//! `sqlite:///relative.db`, `sqlite:////absolute/path.db`, `duckdb://` for an
//! in-memory database.

use crate::error::{FixtureError, Result};
use std::path::PathBuf;

/// Database engine selected by the DSN scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    DuckDb,
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Backend::Sqlite),
            "duckdb" => Ok(Backend::DuckDb),
            _ => Err(format!(
                "Unknown database scheme: {}. Valid: sqlite, duckdb",
                s
            )),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Sqlite => write!(f, "sqlite"),
            Backend::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Where the database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Memory,
    File(PathBuf),
}

/// A parsed connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    pub backend: Backend,
    pub location: Location,
}

impl Dsn {
    /// Parse a connection string, failing with `WrongConnection` when it is
    /// malformed.
    pub fn parse(dsn: &str) -> Result<Self> {
        let (scheme, rest) = dsn
            .split_once("://")
            .ok_or_else(|| FixtureError::wrong_connection(dsn, "expected <scheme>://<path>"))?;

        let backend: Backend = scheme
            .parse()
            .map_err(|e: String| FixtureError::wrong_connection(dsn, e))?;

        if rest.contains('?') {
            return Err(FixtureError::wrong_connection(
                dsn,
                "query parameters are not supported",
            ));
        }

        let location = if rest.is_empty() {
            Location::Memory
        } else {
            // The first '/' separates the (empty) host from the path
            let path = rest.strip_prefix('/').ok_or_else(|| {
                FixtureError::wrong_connection(dsn, "host names are not supported for file databases")
            })?;
            match path {
                "" | ":memory:" => Location::Memory,
                p => Location::File(PathBuf::from(p)),
            }
        };

        Ok(Dsn { backend, location })
    }
}

impl std::fmt::Display for Dsn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Location::Memory => write!(f, "{}://", self.backend),
            Location::File(path) => write!(f, "{}:///{}", self.backend, path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_paths() {
        let dsn = Dsn::parse("sqlite:///data/app.db").unwrap();
        assert_eq!(dsn.backend, Backend::Sqlite);
        assert_eq!(dsn.location, Location::File(PathBuf::from("data/app.db")));

        let dsn = Dsn::parse("duckdb:////tmp/warehouse.duckdb").unwrap();
        assert_eq!(dsn.backend, Backend::DuckDb);
        assert_eq!(
            dsn.location,
            Location::File(PathBuf::from("/tmp/warehouse.duckdb"))
        );
    }

    #[test]
    fn test_parse_memory() {
        assert_eq!(Dsn::parse("sqlite://").unwrap().location, Location::Memory);
        assert_eq!(
            Dsn::parse("duckdb:///:memory:").unwrap().location,
            Location::Memory
        );
    }

    #[test]
    fn test_malformed_dsn_is_wrong_connection() {
        for bad in ["", "wrong_dsn", "postgres://localhost/db", "sqlite://host/db", "sqlite:///a.db?mode=ro"] {
            let err = Dsn::parse(bad).unwrap_err();
            assert!(
                matches!(err, FixtureError::WrongConnection { .. }),
                "expected WrongConnection for {:?}, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let dsn = Dsn::parse("sqlite:////tmp/test.db").unwrap();
        assert_eq!(dsn.to_string(), "sqlite:////tmp/test.db");
        assert_eq!(Dsn::parse("duckdb://").unwrap().to_string(), "duckdb://");
    }
}
