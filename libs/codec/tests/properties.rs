use nomen_codec::{
    raw_components, CodecError, Components, DocumentTableId, FormatManyOptions, NameCodec,
    PrefixedFileName, Series, StructuredName, Table, Value, WorkspaceName,
};
use proptest::prelude::*;
use rstest::rstest;
use serde_json::json;

fn components(pairs: &[(&str, Option<&str>)]) -> Components {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

proptest! {
    #[test]
    fn dtid_round_trips(
        document_id in "[a-zA-Z0-9_.-]{0,12}",
        tabletype in "[a-z]{1,8}",
        tnum in 0u32..10_000,
    ) {
        let raw = raw_components([
            ("document_id", json!(document_id)),
            ("tabletype", json!(tabletype)),
            ("tnum", json!(tnum)),
        ]);
        let expected = DocumentTableId::parse(raw.clone(), false).unwrap();
        let name = DocumentTableId::format(raw, false).unwrap();
        prop_assert_eq!(DocumentTableId::parse(name.as_str(), false).unwrap(), expected);
    }

    #[test]
    fn prefixed_file_round_trips(prefix in "[a-zA-Z0-9]{3}", fname in "[^|^][^|]{0,20}") {
        let raw = raw_components([("prefix", prefix.as_str()), ("fname", fname.as_str())]);
        let name = PrefixedFileName::format(raw, false).unwrap();
        prop_assert_eq!(
            PrefixedFileName::parse(name.as_str(), false).unwrap(),
            components(&[("prefix", Some(prefix.as_str())), ("fname", Some(fname.as_str()))])
        );
    }
}

#[test]
fn forced_components_are_not_applied_to_parsed_strings() {
    let parsed = WorkspaceName::parse("paused_acme_main", false).unwrap();
    assert_eq!(parsed.get("status"), Some("paused"));
}

#[test]
fn forced_components_fill_but_do_not_override_on_construct() {
    let filled = WorkspaceName::parse(
        raw_components([("client_slug", "acme"), ("workspace", "main")]),
        false,
    )
    .unwrap();
    assert_eq!(filled.get("status"), Some("active"));

    let kept = WorkspaceName::parse(
        raw_components([("status", "paused"), ("client_slug", "acme"), ("workspace", "main")]),
        false,
    )
    .unwrap();
    assert_eq!(kept.get("status"), Some("paused"));
}

#[test]
fn forced_components_override_on_format() {
    let name = StructuredName::<WorkspaceName>::from_name("paused_acme_main", false);
    assert_eq!(name.components().get("status"), Some("paused"));
    assert_eq!(name.name().unwrap(), "active_acme_main");
}

#[test]
fn failed_update_keeps_components_and_name() {
    let mut name = StructuredName::<DocumentTableId>::from_name("a/b/1", false);
    let components_before = name.components().clone();
    let name_before = name.name().unwrap();

    let err = name
        .update(raw_components([("tabletype", Value::Null)]))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(name.components(), &components_before);
    assert_eq!(name.name().unwrap(), name_before);
}

#[test]
fn format_many_fails_fast_on_missing_key() {
    let table = Table::from_records([
        raw_components([("document_id", json!("a")), ("tnum", json!(1))]),
        raw_components([("document_id", json!("b")), ("tnum", json!(2))]),
    ]);
    let err = DocumentTableId::format_many(&table, &FormatManyOptions::new()).unwrap_err();
    assert_eq!(err.missing_components(), Some(&["tabletype".to_string()][..]));
}

#[test]
fn format_many_reports_every_missing_key() {
    let table = Table::from_records([raw_components([("document_id", "a")])]);
    let err = DocumentTableId::format_many(&table, &FormatManyOptions::new()).unwrap_err();
    assert_eq!(
        err,
        CodecError::MissingComponents {
            keys: vec!["tabletype".to_string(), "tnum".to_string()]
        }
    );
}

#[test]
fn format_many_does_no_row_work_before_key_check() {
    // A row that would fail validation must not be reached.
    let table = Table::from_records([raw_components([("document_id", json!(5))])]);
    let err = DocumentTableId::format_many(&table, &FormatManyOptions::new()).unwrap_err();
    assert!(matches!(err, CodecError::MissingComponents { .. }));
}

#[test]
fn format_many_defaults_and_prefix() {
    let table = Table::from_records([
        raw_components([("in_document_id", json!("a")), ("in_tnum", json!(1)), ("note", json!("x"))]),
        raw_components([("in_document_id", json!("b")), ("in_tnum", json!(2)), ("note", json!("y"))]),
    ])
    .with_index(vec![10, 11])
    .unwrap();
    let options = FormatManyOptions::new()
        .with_column_prefix("in_")
        .with_default("tabletype", "balance");
    let out = DocumentTableId::format_many(&table, &options).unwrap();
    assert_eq!(out.index(), &[10, 11]);
    assert_eq!(out.values(), &["a/balance/1", "b/balance/2"]);
}

#[test]
fn format_many_formats_duplicate_rows_once() {
    let mut table = Table::new(["fname"]);
    for _ in 0..50 {
        table.push_row(vec![json!("report.csv")]).unwrap();
    }
    let options = FormatManyOptions::new().with_default("prefix", Value::Null);
    let out = PrefixedFileName::format_many(&table, &options).unwrap();
    assert_eq!(out.len(), 50);

    let first = &out.values()[0];
    let parsed = PrefixedFileName::parse(first.as_str(), false).unwrap();
    let prefix = parsed.get("prefix").unwrap();
    assert_eq!(prefix.len(), 3);
    assert!(prefix.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(parsed.get("fname"), Some("report.csv"));
    assert!(out.values().iter().all(|name| name == first));
}

#[test]
fn format_many_requires_nullable_keys_to_be_supplied() {
    let table = Table::from_records([raw_components([("fname", "report.csv")])]);
    let err = PrefixedFileName::format_many(&table, &FormatManyOptions::new()).unwrap_err();
    assert_eq!(err.missing_components(), Some(&["prefix".to_string()][..]));
}

#[test]
fn parse_many_is_index_aligned() {
    let table = DocumentTableId::parse_many(["a/b/1", "c/d/2"]);
    assert_eq!(table.index(), &[0, 1]);
    assert_eq!(table.columns(), &["document_id", "tabletype", "tnum"]);
    assert_eq!(
        table.row(0).unwrap(),
        raw_components([("document_id", "a"), ("tabletype", "b"), ("tnum", "1")])
    );
    assert_eq!(
        table.row(1).unwrap(),
        raw_components([("document_id", "c"), ("tabletype", "d"), ("tnum", "2")])
    );
}

#[test]
fn parse_series_then_format_many_round_trips() {
    let names = Series::with_index(vec![5, 2, 9], vec!["a/b/1", "c/d/2", "a/b/1"]).unwrap();
    let table = DocumentTableId::parse_series(&names).unwrap();
    let out = DocumentTableId::format_many(&table, &FormatManyOptions::new()).unwrap();
    assert_eq!(out.index(), names.index());
    assert_eq!(out.values(), &["a/b/1", "c/d/2", "a/b/1"]);
}

#[test]
fn unprefixed_file_names_get_distinct_prefixes() {
    let a = PrefixedFileName::format(raw_components([("fname", "report.csv")]), false).unwrap();
    let b = PrefixedFileName::format(raw_components([("fname", "report.csv")]), false).unwrap();
    for name in [&a, &b] {
        assert!(name.starts_with('^'));
        assert!(name.ends_with("|report.csv"));
        assert_eq!(name.len(), "^XXX|report.csv".len());
    }
    // 1 in 62^3 chance of a collision; retry once to keep the test stable.
    let distinct = a != b || {
        let c = PrefixedFileName::format(raw_components([("fname", "report.csv")]), false).unwrap();
        c != a
    };
    assert!(distinct);
}

#[rstest]
#[case("^ab1|data.json", Some("ab1"), "data.json")]
#[case("data.json", None, "data.json")]
#[case("^ab1data.json", None, "^ab1data.json")]
#[case("^a|c|data.json", Some("a|c"), "data.json")]
#[case("^ab1|x|y", Some("ab1"), "x|y")]
fn prefixed_file_parse(#[case] name: &str, #[case] prefix: Option<&str>, #[case] fname: &str) {
    assert_eq!(
        PrefixedFileName::parse(name, false).unwrap(),
        components(&[("prefix", prefix), ("fname", Some(fname))])
    );
}

#[rstest]
#[case(json!(3))]
#[case(json!(true))]
#[case(json!(null))]
#[case(json!([1, 2]))]
fn non_string_non_mapping_input_is_a_shape_error(#[case] input: Value) {
    let err = StructuredName::<DocumentTableId>::from_value(input, false).unwrap_err();
    assert!(matches!(err, CodecError::Shape { .. }));
}

#[test]
fn rename_equals_construct_update_name() {
    let partial = raw_components([("tnum", json!(7))]);

    let mut manual = StructuredName::<DocumentTableId>::construct("a/b/1", false).unwrap();
    manual.update(partial.clone()).unwrap();

    assert_eq!(
        DocumentTableId::rename("a/b/1", partial).unwrap(),
        manual.name().unwrap()
    );
    assert_eq!(manual.name().unwrap(), "a/b/7");
}

#[test]
fn rename_with_misspelled_key_fails() {
    let err = DocumentTableId::rename("a/b/1", raw_components([("tnun", json!(4))])).unwrap_err();
    let CodecError::Validation(v) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(v.undeclared(), vec!["tnun"]);
}

#[test]
fn update_with_misspelled_key_leaves_name_unchanged() {
    let mut name = StructuredName::<DocumentTableId>::from_name("a/b/1", false);
    let err = name
        .update(raw_components([("tnun", "4")]))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(name.name().unwrap(), "a/b/1");
}

#[test]
fn construct_rejects_undeclared_components() {
    let err = WorkspaceName::format(
        raw_components([("client_slug", "acme"), ("workspace", "main"), ("owner", "ann")]),
        false,
    )
    .unwrap_err();
    assert!(err.is_validation());
}
