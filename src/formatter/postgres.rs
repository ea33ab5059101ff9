//! PostgreSQL formatting strategies.

use super::{escape_literal, GeneratorKind, CENSUS_VIEW, ROW_ID_COLUMN, SEED_TABLE};
use crate::mapping::ColumnSpec;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const TEMPLATE: &str = include_str!("../../sql/postgres-template.sql");

/// Identifiers that can be written without quotes
static PLAIN_IDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").unwrap());

/// Reserved keywords that must be quoted even when lowercase.
const RESERVED: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric", "both", "case",
    "cast", "check", "collate", "column", "constraint", "create", "current_catalog",
    "current_date", "current_role", "current_time", "current_timestamp", "current_user",
    "default", "deferrable", "desc", "distinct", "do", "else", "end", "except", "false", "fetch",
    "for", "foreign", "from", "grant", "group", "having", "in", "initially", "intersect", "into",
    "lateral", "leading", "limit", "localtime", "localtimestamp", "not", "null", "offset", "on",
    "only", "or", "order", "placing", "primary", "references", "returning", "select",
    "session_user", "some", "symmetric", "table", "then", "to", "trailing", "true", "union",
    "unique", "user", "using", "variadic", "when", "where", "window", "with",
];

pub(crate) fn format(kind: GeneratorKind, spec: &ColumnSpec) -> String {
    let column = column_ident(&spec.column);
    let id = row_id(&spec.table);

    match kind {
        GeneratorKind::PhoneNumbers => {
            format!("{} = lpad({}::text || {}::text, 15, '0')", column, id, id)
        }
        GeneratorKind::Email => format!("{} = {}::text || '@example.com'", column, id),
        GeneratorKind::Words => format!("{} = ''", column),
        GeneratorKind::Null => format!("{} = NULL", column),
        GeneratorKind::Addresses => format!(
            "{} = {}::text || ' ' || {}{}",
            column,
            id,
            seed_lookup(&spec.generator, &id),
            cast(&spec.sql_type)
        ),
        GeneratorKind::Businesses | GeneratorKind::Default => format!(
            "{} = {}{} || ' ' || {}::text",
            column,
            seed_lookup(&spec.generator, &id),
            cast(&spec.sql_type),
            id
        ),
    }
}

/// Subquery picking the seed at `mod(id, total)` for a kind. The total is
/// read from the census view at execution time.
fn seed_lookup(kind: &str, id: &str) -> String {
    let kind = escape_literal(kind);
    format!(
        "(select value from {seeds} where kind = '{kind}' and idx = mod({id}, \
         (select total from {census} where kind = '{kind}')) limit 1)",
        seeds = SEED_TABLE,
        census = CENSUS_VIEW,
        kind = kind,
        id = id,
    )
}

pub(crate) fn cast(sql_type: &str) -> &'static str {
    match sql_type {
        "jsonb" => "::jsonb",
        "date" => "::date",
        _ => "",
    }
}

fn row_id(table: &str) -> String {
    format!("{}.{}", quote_ident(table), ROW_ID_COLUMN)
}

/// Always-quoted identifier with embedded `"` doubled
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Column name as written on the left of `SET`: bare when it is a plain
/// lowercase identifier, quoted otherwise.
pub(crate) fn column_ident(name: &str) -> String {
    if PLAIN_IDENT_RE.is_match(name) && !RESERVED.contains(&name) {
        name.to_string()
    } else {
        quote_ident(name)
    }
}
