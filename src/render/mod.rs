//! Fixture rendering.
//!
//! Turns a fetched table into Python source for the `fixture` library: one
//! `DataSet` subclass for the table, one nested class per row, one attribute
//! per column. Layout lives in a MiniJinja template; naming and literal
//! formatting are done here before the template sees the data.
//!
//! # Example
//!
//! ```ignore
//! use fixturegen::render::{generate, RenderOptions};
//! use fixturegen::Value;
//!
//! let columns = vec!["id".to_string(), "name".to_string()];
//! let rows = vec![vec![Value::Int(1), Value::from("first")]];
//! let text = generate("user", &columns, &rows, &RenderOptions::default()).unwrap();
//! assert!(text.contains("class user_1:"));
//! ```

mod literal;
mod naming;

pub use literal::{python_literal, string_literal, LiteralImports};
pub use naming::{is_valid_identifier, RowNaming, DEFAULT_NAMING_COLUMN};

use crate::error::{FixtureError, Result};
use crate::source::TableResult;
use crate::value::Value;
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::collections::HashSet;

/// Import line for the fixture library
pub const FIXTURE_IMPORT: &str = "from fixture import DataSet";

const TEMPLATE_NAME: &str = "fixture.py.j2";
const TEMPLATE_SOURCE: &str = include_str!("templates/fixture.py.j2");

/// Naming and formatting options for the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Columns whose values name each row class. `None` picks `id` when the
    /// table has it, otherwise positional; `Some(vec![])` is positional.
    pub row_naming_columns: Option<Vec<String>>,
    /// Emit the import lines
    pub with_import: bool,
    /// Dataset class name, defaults to `<CapitalizedTable>Data`
    pub fixture_class_name: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            row_naming_columns: None,
            with_import: true,
            fixture_class_name: None,
        }
    }
}

#[derive(Serialize)]
struct FixtureContext<'a> {
    imports: Vec<String>,
    class_name: &'a str,
    rows: Vec<RowContext<'a>>,
}

#[derive(Serialize)]
struct RowContext<'a> {
    name: String,
    attrs: Vec<AttrContext<'a>>,
}

#[derive(Serialize)]
struct AttrContext<'a> {
    name: &'a str,
    value: String,
}

/// Renderer holding the compiled fixture template
pub struct FixtureRenderer {
    env: Environment<'static>,
}

impl FixtureRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;
        Ok(Self { env })
    }

    /// Render rows of `table_name` into fixture source
    pub fn generate(
        &self,
        table_name: &str,
        column_names: &[String],
        rows: &[Vec<Value>],
        options: &RenderOptions,
    ) -> Result<String> {
        let class_name = match &options.fixture_class_name {
            Some(name) => name.clone(),
            None => default_class_name(table_name),
        };
        if !is_valid_identifier(&class_name) {
            return Err(FixtureError::NonValidFixtureClassName(class_name));
        }

        let naming = RowNaming::resolve(options.row_naming_columns.as_deref(), column_names)?;
        tracing::debug!(table = %table_name, naming = ?naming, rows = rows.len(), "rendering fixture");

        let mut seen = HashSet::with_capacity(rows.len());
        let mut imports = LiteralImports::default();
        let mut row_contexts = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            if row.len() != column_names.len() {
                return Err(FixtureError::RowLength {
                    row: index + 1,
                    expected: column_names.len(),
                    found: row.len(),
                });
            }

            let name = naming.row_class_name(table_name, index, row)?;
            tracing::trace!(row = index, class = %name, "named row");
            if !seen.insert(name.clone()) {
                return Err(FixtureError::DuplicateRowClassName(name));
            }

            let attrs = column_names
                .iter()
                .zip(row.iter())
                .map(|(column, value)| {
                    imports.note(value);
                    AttrContext {
                        name: column.as_str(),
                        value: python_literal(value),
                    }
                })
                .collect();

            row_contexts.push(RowContext { name, attrs });
        }

        let imports = if options.with_import {
            let mut lines = imports.lines();
            lines.push(FIXTURE_IMPORT.to_string());
            lines
        } else {
            Vec::new()
        };

        let context = FixtureContext {
            imports,
            class_name: &class_name,
            rows: row_contexts,
        };

        let template = self.env.get_template(TEMPLATE_NAME)?;
        Ok(template.render(&context)?)
    }

    /// Render a fetched table
    pub fn render(&self, table: &TableResult, options: &RenderOptions) -> Result<String> {
        self.generate(table.table_name(), table.column_names(), table.rows(), options)
    }
}

/// Render rows of `table_name` with a one-off renderer
pub fn generate(
    table_name: &str,
    column_names: &[String],
    rows: &[Vec<Value>],
    options: &RenderOptions,
) -> Result<String> {
    FixtureRenderer::new()?.generate(table_name, column_names, rows, options)
}

/// Render a fetched table with a one-off renderer
pub fn render(table: &TableResult, options: &RenderOptions) -> Result<String> {
    FixtureRenderer::new()?.render(table, options)
}

/// `user_account` -> `UserAccountData`
pub fn default_class_name(table_name: &str) -> String {
    let mut name: String = table_name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    name.push_str("Data");
    name
}
