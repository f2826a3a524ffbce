//! Row class naming.
//!
//! Each row becomes a nested class named `<table>_<values>`, where the values
//! come from the naming columns (joined with `_`) or, failing that, the row's
//! 1-based position.

use crate::error::{FixtureError, Result};
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;

/// Column used for naming when none are requested
pub const DEFAULT_NAMING_COLUMN: &str = "id";

static RE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[_\p{L}][_\p{L}\p{Nd}]*$").unwrap());

/// Whether `name` is usable as a bare class name
pub fn is_valid_identifier(name: &str) -> bool {
    RE_IDENTIFIER.is_match(name)
}

/// How row class names are built for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowNaming {
    /// 1-based row position
    Positional,
    /// Values of these column indexes, in order
    Columns(Vec<usize>),
}

impl RowNaming {
    /// Resolve requested naming columns against the table's columns.
    ///
    /// `None` means "not specified": use `id` when the table has one,
    /// otherwise positional. An empty list is always positional. Unknown
    /// columns are reported together.
    pub fn resolve(requested: Option<&[String]>, column_names: &[String]) -> Result<Self> {
        let position = |name: &str| column_names.iter().position(|c| c == name);

        match requested {
            None => Ok(match position(DEFAULT_NAMING_COLUMN) {
                Some(idx) => RowNaming::Columns(vec![idx]),
                None => RowNaming::Positional,
            }),
            Some([]) => Ok(RowNaming::Positional),
            Some(names) => {
                let mut indexes = Vec::with_capacity(names.len());
                let mut missing = Vec::new();
                for name in names {
                    match position(name) {
                        Some(idx) => indexes.push(idx),
                        None => missing.push(name.clone()),
                    }
                }
                if !missing.is_empty() {
                    return Err(FixtureError::WrongNamingColumn(missing));
                }
                Ok(RowNaming::Columns(indexes))
            }
        }
    }

    /// Build and validate the class name of the row at `index` (0-based)
    pub fn row_class_name(&self, table_name: &str, index: usize, row: &[Value]) -> Result<String> {
        let suffix = match self {
            RowNaming::Positional => (index + 1).to_string(),
            RowNaming::Columns(indexes) => indexes
                .iter()
                .map(|&i| row.get(i).map(ToString::to_string).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("_"),
        };

        let name = format!("{}_{}", table_name, suffix);
        if !is_valid_identifier(&name) {
            return Err(FixtureError::NonValidRowClassName(name));
        }
        Ok(name)
    }
}
