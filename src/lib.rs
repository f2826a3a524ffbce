//! Generate `fixture` DataSet source files from database tables.
//!
//! [`source::fetch_table`] reflects a table and fetches its rows as plain
//! [`Value`] tuples; [`render::generate`] turns those rows into Python source
//! with one nested class per row.

pub mod config;
pub mod error;
pub mod render;
pub mod source;
pub mod value;

pub use error::{FixtureError, Result};
pub use render::{generate, render, FixtureRenderer, RenderOptions};
pub use source::{fetch_table, FetchOptions, TableResult};
pub use value::Value;
