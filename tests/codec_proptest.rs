//! Property-based tests for the markup codec, the validator and the canonical sort
//!
//! Generated values keep to what the document can carry losslessly: no surrounding
//! whitespace (cells are trimmed on decode).

use collective_actions::{decode, encode, is_valid, sort, Field, Fragment, Record, Table};
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = String> {
    (1990i32..2035, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9]{1,12}",
        "[a-zA-Z0-9][a-zA-Z0-9 ,.&<>'\"/-]{0,30}[a-zA-Z0-9.]",
    ]
}

fn source_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z]{1,10}",
        prop_oneof![Just(""), Just("?a=1&b=2"), Just("?a=1&amp;b=2")],
        "[a-zA-Z][a-zA-Z0-9 ]{0,15}[a-zA-Z0-9]",
        prop_oneof![Just(""), Just(" AT&amp;T"), Just(" &lt;3"), Just(" & <b>")],
    )
        .prop_map(|(path, query, title, suffix)| {
            format!("<a href=\"https://example.com/{path}{query}\">{title}{suffix}</a>")
        })
}

fn meta_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        (
            "[a-z][a-z-]{0,8}".prop_filter("class is reserved", |name| name != "class"),
            "[a-zA-Z0-9 ]{0,10}",
        ),
        0..3,
    )
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        date_strategy(),
        source_strategy(),
        prop::collection::vec(text_strategy(), 6),
        meta_strategy(),
    )
        .prop_map(|(date, source, texts, meta)| {
            let mut record = Record::new()
                .with(Field::Date, date)
                .with(Field::Source, source);
            for (field, text) in Field::ALL[2..].iter().zip(texts) {
                record.set(*field, Some(text));
            }
            for (name, value) in meta {
                record.set_meta(name, value);
            }
            record
        })
}

fn row_markup(key: &str, value: &str) -> String {
    format!("<tr><td class=\"field-key\">{key}</td><td class=\"field-value\">{value}</td></tr>")
}

proptest! {
    #[test]
    fn decode_inverts_encode(records in prop::collection::vec(record_strategy(), 0..5)) {
        let table = Table::from_records(records);
        let fragment = encode(&table, "actions").unwrap();

        prop_assert!(is_valid(&fragment));
        let decoded = decode(&fragment).unwrap();
        prop_assert_eq!(decoded.rows(), table.rows());
    }

    #[test]
    fn empty_values_decode_as_null(record in record_strategy(), blank in 1usize..8) {
        let field = Field::ALL[blank];
        let mut record = record;
        record.set(field, Some(String::new()));

        let decoded = decode(&encode(&Table::from_records([record]), "actions").unwrap()).unwrap();
        prop_assert!(decoded.rows()[0].has(field));
        prop_assert_eq!(decoded.rows()[0].get(field), None);
    }

    #[test]
    fn sort_is_idempotent(dates in prop::collection::vec(date_strategy(), 0..12)) {
        let table = Table::from_records(
            dates
                .into_iter()
                .enumerate()
                .map(|(i, date)| Record::new().with(Field::Date, date).with(Field::WorkerCount, i.to_string())),
        );
        let once = sort(table).unwrap();
        let twice = sort(once.clone()).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn unknown_labels_are_invalid(label in "[a-z_]{1,16}", position in 0usize..3) {
        prop_assume!(Field::lookup(&label).is_none());
        let mut rows: Vec<String> = vec![
            row_markup("date", "2021-01-01 00:00:00"),
            row_markup("company", "Acme"),
        ];
        rows.insert(position.min(rows.len()), row_markup(&label, "x"));

        let fragment = Fragment::new(format!("<div id=\"actions\"><table>{}</table></div>", rows.concat())).unwrap();
        prop_assert!(!is_valid(&fragment));
    }

    #[test]
    fn oversized_tables_are_invalid(extra in 1usize..5) {
        let rows: String = (0..Field::ALL.len() + extra)
            .map(|i| row_markup(Field::ALL[i % Field::ALL.len()].as_str(), "x"))
            .collect();
        let fragment = Fragment::new(format!("<div id=\"actions\"><table>{rows}</table></div>")).unwrap();
        prop_assert!(!is_valid(&fragment));
    }
}
