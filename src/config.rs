//! YAML configuration for fixture generation.
//!
//! Supplies defaults for the command line: global render settings and
//! per-table fetch/naming settings.
//!
//! ```yaml
//! with_import: true
//! tables:
//!   user:
//!     naming_columns: [id, name]
//!     fixture_class_name: UserFixture
//!     where: "id > 1"
//!     order_by: "id DESC"
//!     limit: 10
//! ```

use crate::error::{FixtureError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::num::NonZeroU64;
use std::path::Path;

/// Per-table settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Row naming columns (empty list = positional)
    pub naming_columns: Option<Vec<String>>,
    /// Dataset class name override
    pub fixture_class_name: Option<String>,
    /// Filter expression
    #[serde(rename = "where")]
    pub where_clause: Option<String>,
    /// Ordering expression
    pub order_by: Option<String>,
    /// Row limit
    pub limit: Option<NonZeroU64>,
}

/// Complete YAML configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureYamlConfig {
    /// Emit import lines (default: true)
    pub with_import: Option<bool>,
    /// Per-table settings
    pub tables: HashMap<String, TableConfig>,
}

impl FixtureYamlConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| FixtureError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(content)
    }

    /// Get configuration for a specific table
    pub fn get_table_config(&self, table_name: &str) -> Option<&TableConfig> {
        self.tables.get(table_name).or_else(|| {
            // Try case-insensitive match
            let lower = table_name.to_lowercase();
            self.tables
                .iter()
                .find(|(k, _)| k.to_lowercase() == lower)
                .map(|(_, v)| v)
        })
    }
}
