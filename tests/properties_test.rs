//! Property tests for ordering, seed indexing and escaping of generated SQL.

use proptest::prelude::*;
use sql_obfuscator::formatter::{Dialect, GeneratorKind};
use sql_obfuscator::mapping::ColumnSpec;
use sql_obfuscator::script::{build_insert_block, build_update_block};
use sql_obfuscator::seeds::SeedData;

/// Split an update block into `(table, [columns])` in emitted order.
fn parse_updates(block: &str) -> Vec<(String, Vec<String>)> {
    block
        .split(";\n")
        .filter(|stmt| !stmt.is_empty())
        .map(|stmt| {
            let rest = stmt.strip_prefix("update \"").unwrap();
            let (table, rest) = rest.split_once("\" set ").unwrap();
            let columns = rest
                .split(",\n  ")
                .map(|assignment| assignment.split_once(" = ").unwrap().0.to_string())
                .collect();
            (table.to_string(), columns)
        })
        .collect()
}

fn is_strictly_ascending(items: &[String]) -> bool {
    items.windows(2).all(|w| w[0] < w[1])
}

proptest! {
    #[test]
    fn updates_are_sorted_by_table_then_column(
        pairs in prop::collection::btree_set(("t_[a-z]{1,3}", "c_[a-z]{1,4}"), 0..40)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
    ) {
        let specs: Vec<ColumnSpec> = pairs
            .iter()
            .map(|(table, column)| ColumnSpec::new(table.as_str(), column.as_str(), "", "words"))
            .collect();

        let parsed = parse_updates(&build_update_block(&specs, Dialect::Postgres));

        let tables: Vec<String> = parsed.iter().map(|(t, _)| t.clone()).collect();
        prop_assert!(is_strictly_ascending(&tables));
        for (_, columns) in &parsed {
            prop_assert!(is_strictly_ascending(columns));
        }

        let emitted: usize = parsed.iter().map(|(_, c)| c.len()).sum();
        prop_assert_eq!(emitted, specs.len());
    }

    #[test]
    fn insert_idx_is_position_after_merge(
        defaults in prop::collection::vec("[a-z' ]{0,8}", 0..10),
        overrides in prop::collection::vec("[a-z' ]{0,8}", 0..10),
    ) {
        let mut seeds = SeedData::new();
        seeds.extend("words", defaults.clone());
        let mut extra = SeedData::new();
        extra.extend("words", overrides.clone());
        seeds.append(extra);

        let expected: Vec<String> = defaults.into_iter().chain(overrides).collect();
        let block = build_insert_block(&seeds);
        let lines: Vec<&str> = block.lines().collect();
        prop_assert_eq!(lines.len(), expected.len());

        for (idx, (line, value)) in lines.iter().zip(&expected).enumerate() {
            let prefix = format!(
                "insert into obfuscator_anon_data (idx, kind, value) values ({}, 'words', '",
                idx
            );
            let literal = line
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_suffix("');"));
            prop_assert!(literal.is_some(), "unexpected insert line: {}", line);

            let literal = literal.unwrap();
            prop_assert_eq!(literal, value.replace('\'', "''"));
            prop_assert_eq!(literal.replace("''", "'"), value.as_str());
        }
    }

    #[test]
    fn unknown_generators_format_like_businesses(
        kind in "[a-z]{1,10}".prop_filter("recognized generator", |k| {
            GeneratorKind::from_name(k) == GeneratorKind::Default
        }),
        sql_type in prop::sample::select(vec!["", "jsonb", "date", "text"]),
    ) {
        let business = ColumnSpec::new("orders", "label", sql_type, "businesses");
        let unknown = ColumnSpec::new("orders", "label", sql_type, kind.as_str());

        let expected = Dialect::Postgres
            .format(&business)
            .replace("'businesses'", &format!("'{}'", kind));
        prop_assert_eq!(Dialect::Postgres.format(&unknown), expected);
    }

    #[test]
    fn only_jsonb_and_date_add_casts(sql_type in "[a-z]{0,8}") {
        let spec = ColumnSpec::new("orders", "label", sql_type.as_str(), "businesses");
        let sql = Dialect::Postgres.format(&spec);

        let expected_cast = match sql_type.as_str() {
            "jsonb" => "::jsonb",
            "date" => "::date",
            _ => "",
        };
        let tail = format!("limit 1){} || ' ' || \"orders\".id::text", expected_cast);
        prop_assert!(sql.ends_with(&tail), "{}", sql);
    }
}
