//! SQL expression formatting per dialect.
//!
//! Every dialect provides the same seven strategies, selected by exact match
//! of a column's generator name:
//! - `phone-numbers`: zero-padded digits derived from the row id
//! - `email`: row id at a placeholder domain
//! - `words`: empty string
//! - `null`: NULL
//! - `addresses-1`: row id followed by a seed value of that kind
//! - `businesses`: seed value of that kind followed by the row id
//! - `default`: any other generator name, formatted like `businesses` but
//!   selecting seeds stored under the generator's own name

pub mod postgres;

use crate::error::ObfuscateError;
use crate::mapping::ColumnSpec;
use std::fmt;
use std::str::FromStr;

/// Table the seed rows are inserted into by the script template.
pub const SEED_TABLE: &str = "obfuscator_anon_data";

/// View exposing `(kind, total)` over [`SEED_TABLE`], created by the script
/// template after the inserts so totals always match the inserted rows.
pub const CENSUS_VIEW: &str = "obfuscator_data_census";

/// Column every obfuscated table is expected to key its rows by.
pub const ROW_ID_COLUMN: &str = "id";

/// Formatting strategy selected for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    PhoneNumbers,
    Email,
    Words,
    Null,
    Addresses,
    Businesses,
    /// Fallback for any unrecognized generator name
    Default,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 7] = [
        GeneratorKind::PhoneNumbers,
        GeneratorKind::Email,
        GeneratorKind::Words,
        GeneratorKind::Null,
        GeneratorKind::Addresses,
        GeneratorKind::Businesses,
        GeneratorKind::Default,
    ];

    /// Resolve a generator name. Matching is exact; anything unknown is
    /// `Default`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "phone-numbers" => GeneratorKind::PhoneNumbers,
            "email" => GeneratorKind::Email,
            "words" => GeneratorKind::Words,
            "null" => GeneratorKind::Null,
            "addresses-1" => GeneratorKind::Addresses,
            "businesses" => GeneratorKind::Businesses,
            _ => GeneratorKind::Default,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GeneratorKind::PhoneNumbers => "phone-numbers",
            GeneratorKind::Email => "email",
            GeneratorKind::Words => "words",
            GeneratorKind::Null => "null",
            GeneratorKind::Addresses => "addresses-1",
            GeneratorKind::Businesses => "businesses",
            GeneratorKind::Default => "default",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target database dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Postgres,
}

impl Dialect {
    pub fn all() -> &'static [Dialect] {
        &[Dialect::Postgres]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgresql",
        }
    }

    /// Render `<column> = <expression>` for a column, dispatching on its
    /// generator name.
    pub fn format(&self, spec: &ColumnSpec) -> String {
        self.format_kind(GeneratorKind::from_name(&spec.generator), spec)
    }

    /// Render a column with an explicitly chosen strategy.
    pub fn format_kind(&self, kind: GeneratorKind, spec: &ColumnSpec) -> String {
        match self {
            Dialect::Postgres => postgres::format(kind, spec),
        }
    }

    /// Cast suffix for a declared type hint; empty unless the hint is
    /// `jsonb` or `date`.
    pub fn cast(&self, sql_type: &str) -> &'static str {
        match self {
            Dialect::Postgres => postgres::cast(sql_type),
        }
    }

    /// Quoted table reference used in `UPDATE` statements
    pub fn table_ident(&self, table: &str) -> String {
        match self {
            Dialect::Postgres => postgres::quote_ident(table),
        }
    }

    /// Script template with `{{Inserts}}` and `{{Updates}}` placeholders
    pub fn template(&self) -> &'static str {
        match self {
            Dialect::Postgres => postgres::TEMPLATE,
        }
    }
}

impl FromStr for Dialect {
    type Err = ObfuscateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(Dialect::Postgres),
            _ => Err(ObfuscateError::Dialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Escape a value for use inside a single-quoted SQL string literal.
/// Only `'` is touched.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}
