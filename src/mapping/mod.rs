//! Column mapping loader.
//!
//! Parses the declarative `table -> column -> {type, source}` document into a
//! flat list of [`ColumnSpec`]s:
//!
//! ```yaml
//! users:
//!   email:
//!     type: ""
//!     source: email
//!   settings:
//!     type: jsonb
//!     source: words
//!   middle_name: {}        # no source: set to NULL
//! ```

use crate::error::{ObfuscateError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Generator name that every empty or missing `source` normalizes to.
pub const NULL_GENERATOR: &str = "null";

/// Obfuscation intent for one `table.column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub table: String,
    pub column: String,
    /// Declared type hint; only used to pick a trailing cast
    pub sql_type: String,
    /// Generator kind name, never empty
    pub generator: String,
}

impl ColumnSpec {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        sql_type: impl Into<String>,
        generator: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            sql_type: sql_type.into(),
            generator: normalize_generator(generator.into()),
        }
    }
}

/// Map an empty or `"null"` source to the null generator; pass anything else
/// through unchanged, recognized or not.
pub fn normalize_generator(source: String) -> String {
    if source.is_empty() || source == NULL_GENERATOR {
        NULL_GENERATOR.to_string()
    } else {
        source
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ColumnYaml {
    #[serde(rename = "type")]
    sql_type: Option<String>,
    source: Option<String>,
}

type MappingYaml = BTreeMap<String, Option<BTreeMap<String, Option<ColumnYaml>>>>;

/// Read and parse a column mapping file.
pub fn load_column_specs(path: &Path) -> Result<Vec<ColumnSpec>> {
    let content = fs::read_to_string(path).map_err(|e| ObfuscateError::io(path, e))?;
    let specs = parse_column_specs(&content, &path.display().to_string())?;
    debug!("loaded {} column specs from {}", specs.len(), path.display());
    Ok(specs)
}

/// Parse a column mapping document. `origin` is only used in error messages.
///
/// Specs come out ordered by `(table, column)`, but callers must not rely on
/// that: the assembler does its own grouping and sorting.
pub fn parse_column_specs(content: &str, origin: &str) -> Result<Vec<ColumnSpec>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mapping: Option<MappingYaml> =
        serde_yaml_ng::from_str(content).map_err(|e| ObfuscateError::parse(origin, e))?;

    let mut specs = Vec::new();
    for (table, columns) in mapping.unwrap_or_default() {
        if table.is_empty() {
            return Err(ObfuscateError::InvalidMapping {
                origin: origin.to_string(),
                reason: "table name cannot be empty".to_string(),
            });
        }

        for (column, details) in columns.unwrap_or_default() {
            if column.is_empty() {
                return Err(ObfuscateError::InvalidMapping {
                    origin: origin.to_string(),
                    reason: format!("column name cannot be empty in table '{}'", table),
                });
            }

            let details = details.unwrap_or_default();
            specs.push(ColumnSpec::new(
                table.clone(),
                column,
                details.sql_type.unwrap_or_default(),
                details.source.unwrap_or_default(),
            ));
        }
    }

    Ok(specs)
}
