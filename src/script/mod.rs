//! Script assembly.
//!
//! Turns seed data and column specs into the two SQL blocks of the final
//! script and merges them into the dialect's template:
//! - the insert block loads every seed value as `(idx, kind, value)`
//! - the update block has one `UPDATE` per table, tables and columns in
//!   ascending order
//!
//! Output is byte-identical for identical inputs.

use crate::error::{ObfuscateError, Result};
use crate::formatter::{escape_literal, Dialect, SEED_TABLE};
use crate::mapping::ColumnSpec;
use crate::seeds::SeedData;
use ahash::{AHashMap, AHashSet};
use handlebars::Handlebars;
use serde::Serialize;
use std::fmt::Write;
use tracing::{debug, info};

/// Separator between column assignments of one `UPDATE`
const ASSIGNMENT_SEPARATOR: &str = ",\n  ";

/// Summary of a generated script
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptStats {
    pub dialect: String,
    /// Number of seed kinds inserted
    pub seed_kinds: usize,
    /// Number of seed rows inserted
    pub seed_rows: usize,
    /// Number of `UPDATE` statements
    pub tables: usize,
    /// Number of column assignments across all updates
    pub columns: usize,
    /// Size of the merged script
    pub bytes: usize,
}

/// One `INSERT` per seed value. Within a kind, `idx` is the value's position
/// in the seed list; kinds follow the seed store's iteration order.
pub fn build_insert_block(seeds: &SeedData) -> String {
    let mut out = String::new();

    for (kind, values) in seeds.iter() {
        let kind = escape_literal(kind);
        for (idx, value) in values.iter().enumerate() {
            // Writing to a String cannot fail
            let _ = writeln!(
                out,
                "insert into {} (idx, kind, value) values ({}, '{}', '{}');",
                SEED_TABLE,
                idx,
                kind,
                escape_literal(value)
            );
        }
    }

    out
}

/// One `UPDATE` per table, tables sorted by name and columns sorted by name
/// within each table.
pub fn build_update_block(specs: &[ColumnSpec], dialect: Dialect) -> String {
    let mut grouped: AHashMap<&str, Vec<&ColumnSpec>> = AHashMap::new();
    for spec in specs {
        grouped.entry(spec.table.as_str()).or_default().push(spec);
    }

    let mut tables: Vec<&str> = grouped.keys().copied().collect();
    tables.sort_unstable();

    let mut out = String::new();
    for table in tables {
        let Some(group) = grouped.get_mut(table) else {
            continue;
        };
        group.sort_by(|a, b| a.column.cmp(&b.column));

        let assignments: Vec<String> = group.iter().map(|spec| dialect.format(spec)).collect();
        let _ = writeln!(
            out,
            "update {} set {};",
            dialect.table_ident(table),
            assignments.join(ASSIGNMENT_SEPARATOR)
        );
    }

    out
}

/// Substitute the two blocks into a template's `{{Inserts}}` and
/// `{{Updates}}` placeholders, verbatim.
pub fn merge(template: &str, inserts: &str, updates: &str) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string("script", template)
        .map_err(|e| ObfuscateError::Template(e.to_string()))?;

    let data = serde_json::json!({
        "Inserts": inserts,
        "Updates": updates,
    });

    handlebars
        .render("script", &data)
        .map_err(|e| ObfuscateError::Template(e.to_string()))
}

/// Run the whole assembly for one dialect: inserts, updates, merge.
pub fn generate_script(
    dialect: Dialect,
    seeds: &SeedData,
    specs: &[ColumnSpec],
) -> Result<(String, ScriptStats)> {
    let inserts = build_insert_block(seeds);
    debug!("built {} seed inserts", seeds.value_count());

    let updates = build_update_block(specs, dialect);
    let tables = specs
        .iter()
        .map(|spec| spec.table.as_str())
        .collect::<AHashSet<_>>()
        .len();
    debug!("built updates for {} tables", tables);

    let script = merge(dialect.template(), &inserts, &updates)?;

    let stats = ScriptStats {
        dialect: dialect.name().to_string(),
        seed_kinds: seeds.kind_count(),
        seed_rows: seeds.value_count(),
        tables,
        columns: specs.len(),
        bytes: script.len(),
    };
    info!(
        "generated {} script: {} tables, {} columns, {} seed rows",
        stats.dialect, stats.tables, stats.columns, stats.seed_rows
    );

    Ok((script, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_block_escapes_and_indexes() {
        let mut seeds = SeedData::new();
        seeds.extend("words", ["cat", "o'brien"]);

        let block = build_insert_block(&seeds);
        assert_eq!(
            block,
            "insert into obfuscator_anon_data (idx, kind, value) values (0, 'words', 'cat');\n\
             insert into obfuscator_anon_data (idx, kind, value) values (1, 'words', 'o''brien');\n"
        );
    }

    #[test]
    fn test_insert_block_empty() {
        assert_eq!(build_insert_block(&SeedData::new()), "");
    }

    #[test]
    fn test_update_block_single_column() {
        let specs = vec![ColumnSpec::new("users", "email", "", "email")];
        assert_eq!(
            build_update_block(&specs, Dialect::Postgres),
            "update \"users\" set email = \"users\".id::text || '@example.com';\n"
        );
    }

    #[test]
    fn test_update_block_orders_tables_and_columns() {
        let specs = vec![
            ColumnSpec::new("users", "phone", "", "null"),
            ColumnSpec::new("accounts", "notes", "", "words"),
            ColumnSpec::new("users", "bio", "", "words"),
            ColumnSpec::new("users", "email", "", "null"),
        ];

        let block = build_update_block(&specs, Dialect::Postgres);
        assert_eq!(
            block,
            "update \"accounts\" set notes = '';\n\
             update \"users\" set bio = '',\n  email = NULL,\n  phone = NULL;\n"
        );
    }

    #[test]
    fn test_update_block_empty() {
        assert_eq!(build_update_block(&[], Dialect::Postgres), "");
    }

    #[test]
    fn test_merge_substitutes_verbatim() {
        let merged = merge(
            "-- head\n{{Inserts}}--\n{{Updates}}-- tail\n",
            "insert 'a' & <b>;\n",
            "update \"t\" set c = '';\n",
        )
        .unwrap();

        assert_eq!(
            merged,
            "-- head\ninsert 'a' & <b>;\n--\nupdate \"t\" set c = '';\n-- tail\n"
        );
    }

    #[test]
    fn test_merge_rejects_bad_templates() {
        let err = merge("{{#if}}", "", "").unwrap_err();
        assert!(matches!(err, ObfuscateError::Template(_)));

        let err = merge("{{Inserts}} {{Deletes}}", "", "").unwrap_err();
        assert!(matches!(err, ObfuscateError::Template(_)));
    }

    #[test]
    fn test_generate_script_is_deterministic() {
        let seeds = SeedData::defaults().unwrap();
        let specs = vec![
            ColumnSpec::new("users", "email", "", "email"),
            ColumnSpec::new("companies", "name", "", "businesses"),
            ColumnSpec::new("users", "street", "", "addresses-1"),
        ];

        let (first, stats) = generate_script(Dialect::Postgres, &seeds, &specs).unwrap();
        let (second, _) = generate_script(Dialect::Postgres, &seeds, &specs).unwrap();

        assert_eq!(first, second);
        assert_eq!(stats.tables, 2);
        assert_eq!(stats.columns, 3);
        assert_eq!(stats.seed_rows, seeds.value_count());
        assert_eq!(stats.bytes, first.len());
    }

    #[test]
    fn test_generated_script_creates_seed_table_and_census() {
        let (script, _) = generate_script(Dialect::Postgres, &SeedData::new(), &[]).unwrap();
        assert!(script.contains(&format!("create temporary table {}", SEED_TABLE)));
        assert!(script.contains(&format!(
            "create temporary view {}",
            crate::formatter::CENSUS_VIEW
        )));
        assert!(!script.contains("{{"));
    }
}
